//! CLI argument definitions
//!
//! Global options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigAuditSource};
use crate::core::{AuditPreference, DEFAULT_TOP_SKILLS};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum AuditSourceArg {
    /// Audit transactions when present, user totals otherwise (default)
    #[default]
    Auto,
    /// Count and sum up/down audit transactions
    Transactions,
    /// Read the user row's totalUp/totalUpBonus/totalDown amounts
    Totals,
}

#[derive(Parser)]
#[command(name = "z01stats")]
#[command(about = "Profile statistics for 01-edu learning platforms", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Read an already-fetched response JSON file instead of calling the API
    #[arg(short, long, global = true, value_name = "FILE")]
    pub(crate) input: Option<PathBuf>,

    /// Filter from date (YYYYMMDD or YYYY-MM-DD)
    #[arg(short, long, global = true)]
    pub(crate) since: Option<String>,

    /// Filter until date (YYYYMMDD or YYYY-MM-DD)
    #[arg(short, long, global = true)]
    pub(crate) until: Option<String>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Platform domain (e.g. learn.zone01kisumu.ke)
    #[arg(long, global = true, value_name = "DOMAIN")]
    pub(crate) domain: Option<String>,

    /// Where audit figures come from
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) audit_source: AuditSourceArg,

    /// Number of skills to keep in the ranking
    #[arg(long, global = true, value_name = "N")]
    pub(crate) top: Option<usize>,

    /// Cap grade-timeline entries (query order) before sorting
    #[arg(long, global = true, value_name = "N")]
    pub(crate) limit: Option<usize>,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Timezone for date display (e.g. "Africa/Nairobi", "UTC")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,
}

impl Cli {
    /// Merge config file values in; CLI args take precedence.
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if self.domain.is_none() {
            self.domain = config.domain.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if self.top.is_none() {
            self.top = config.top_skills;
        }
        if self.limit.is_none() {
            self.limit = config.progress_limit;
        }
        if self.audit_source == AuditSourceArg::Auto
            && let Some(source) = config.audit_source
        {
            self.audit_source = match source {
                ConfigAuditSource::Auto => AuditSourceArg::Auto,
                ConfigAuditSource::Transactions => AuditSourceArg::Transactions,
                ConfigAuditSource::Totals => AuditSourceArg::Totals,
            };
        }
        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub(crate) fn audit_preference(&self) -> AuditPreference {
        match self.audit_source {
            AuditSourceArg::Auto => AuditPreference::Auto,
            AuditSourceArg::Transactions => AuditPreference::Transactions,
            AuditSourceArg::Totals => AuditPreference::Totals,
        }
    }

    pub(crate) fn top_skills(&self) -> usize {
        self.top.unwrap_or(DEFAULT_TOP_SKILLS)
    }
}
