//! CLI subcommand definitions

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show the full profile overview (default)
    Summary,
    /// Show XP totals, per-category breakdown, and the cumulative timeline
    Xp,
    /// Show audit counts, amounts, and the done/received ratio
    Audits,
    /// Show top skills ranked by best demonstrated amount
    Skills,
    /// Show the grade timeline for graded work
    Progress,
    /// Exchange credentials for a session token and store it
    Login {
        /// Platform username (prompted when omitted)
        #[arg(long)]
        user: Option<String>,
        /// Password (prompted when omitted; prefer the prompt)
        #[arg(long)]
        password: Option<String>,
    },
    /// Fetch the raw profile response and print it as JSON
    Fetch,
}

/// The statistics facet a command renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatsCommand {
    Summary,
    Xp,
    Audits,
    Skills,
    Progress,
}

impl StatsCommand {
    /// `None` for commands that do not render statistics (login, fetch).
    pub(crate) fn from_cli(command: &Option<Commands>) -> Option<Self> {
        match command {
            None | Some(Commands::Summary) => Some(StatsCommand::Summary),
            Some(Commands::Xp) => Some(StatsCommand::Xp),
            Some(Commands::Audits) => Some(StatsCommand::Audits),
            Some(Commands::Skills) => Some(StatsCommand::Skills),
            Some(Commands::Progress) => Some(StatsCommand::Progress),
            Some(Commands::Login { .. }) | Some(Commands::Fetch) => None,
        }
    }
}
