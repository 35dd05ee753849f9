//! Raw record models shared by all response shapes
//!
//! These are the four entity kinds the platform returns. Adapters in
//! `crate::source` convert every supported response layout into one
//! `ProfileRecords` bundle; the aggregators never see raw JSON.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::utils::{Timezone, parse_timestamp};

/// A typed ledger entry: XP credit, audit credit (`up`/`down`), or a
/// `skill_*` assessment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Transaction {
    #[serde(default)]
    pub(crate) id: Option<i64>,
    /// Tag such as `"xp"`, `"up"`, `"down"`, or `"skill_go"`. Aliased
    /// collections omit it; adapters default it from the alias.
    #[serde(default, rename = "type")]
    pub(crate) kind: String,
    pub(crate) amount: f64,
    #[serde(default)]
    pub(crate) created_at: String,
    #[serde(default)]
    pub(crate) path: String,
}

impl Transaction {
    pub(crate) fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Amounts must be non-negative and finite; anything else is a
    /// malformed upstream record.
    pub(crate) fn is_well_formed(&self) -> bool {
        self.amount.is_finite() && self.amount >= 0.0
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProgressObject {
    #[serde(default)]
    pub(crate) id: Option<i64>,
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default, rename = "type")]
    pub(crate) kind: Option<String>,
}

/// One graded (or pending) piece of work.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProgressEntry {
    #[serde(default)]
    pub(crate) id: Option<i64>,
    /// Number, numeric string, or null (ungraded/pending work).
    #[serde(default)]
    pub(crate) grade: serde_json::Value,
    #[serde(default)]
    pub(crate) created_at: String,
    #[serde(default)]
    pub(crate) path: Option<String>,
    #[serde(default)]
    pub(crate) object: Option<ProgressObject>,
}

impl ProgressEntry {
    pub(crate) fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Coerce the grade to a number; numeric strings are accepted.
    pub(crate) fn numeric_grade(&self) -> Option<f64> {
        match &self.grade {
            serde_json::Value::Number(n) => n.as_f64().filter(|g| g.is_finite()),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|g| g.is_finite()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuditMember {
    #[serde(default)]
    pub(crate) id: Option<i64>,
    #[serde(default)]
    pub(crate) login: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuditGroup {
    #[serde(default)]
    pub(crate) path: String,
    #[serde(default)]
    pub(crate) captain_login: Option<String>,
    #[serde(default)]
    pub(crate) members: Vec<AuditMember>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuditPrivate {
    #[serde(default)]
    pub(crate) code: Option<String>,
}

/// A peer-review event. `closed_at == None` means the audit is still open.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Audit {
    #[serde(default)]
    pub(crate) id: Option<i64>,
    #[serde(default)]
    pub(crate) grade: Option<f64>,
    #[serde(default)]
    pub(crate) group: Option<AuditGroup>,
    #[serde(default)]
    pub(crate) private: Option<AuditPrivate>,
    #[serde(default)]
    pub(crate) created_at: String,
    #[serde(default)]
    pub(crate) updated_at: Option<String>,
    #[serde(default)]
    pub(crate) closed_at: Option<String>,
}

impl Audit {
    pub(crate) fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }
}

/// The user row, including the pre-aggregated audit totals some queries
/// select instead of audit transactions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserRecord {
    #[serde(default)]
    pub(crate) id: Option<i64>,
    #[serde(default)]
    pub(crate) login: Option<String>,
    #[serde(default)]
    pub(crate) total_up: Option<f64>,
    #[serde(default)]
    pub(crate) total_up_bonus: Option<f64>,
    #[serde(default)]
    pub(crate) total_down: Option<f64>,
}

impl UserRecord {
    /// `(total_up, total_up_bonus, total_down)` when the record carries
    /// any pre-aggregated audit amounts.
    pub(crate) fn audit_totals(&self) -> Option<(f64, f64, f64)> {
        if self.total_up.is_none() && self.total_down.is_none() {
            return None;
        }
        Some((
            self.total_up.unwrap_or(0.0),
            self.total_up_bonus.unwrap_or(0.0),
            self.total_down.unwrap_or(0.0),
        ))
    }
}

/// Normalized bundle produced by a response adapter. Every collection may
/// be empty; the aggregators treat emptiness as "no data", never an error.
#[derive(Debug, Default)]
pub(crate) struct ProfileRecords {
    pub(crate) user: Option<UserRecord>,
    pub(crate) xp_transactions: Vec<Transaction>,
    pub(crate) skill_transactions: Vec<Transaction>,
    pub(crate) audits_done: Vec<Transaction>,
    pub(crate) audits_received: Vec<Transaction>,
    pub(crate) progress: Vec<ProgressEntry>,
    pub(crate) audits: Vec<Audit>,
    /// Records that parsed cleanly.
    pub(crate) valid: u64,
    /// Malformed records dropped during extraction.
    pub(crate) skipped: u64,
}

impl ProfileRecords {
    /// Restrict time-stamped records to the filter's date range, judged by
    /// their calendar date in `tz`. Skills stay unfiltered: the best
    /// demonstrated level is a lifetime statistic.
    pub(crate) fn retain_date_range(&mut self, filter: &DateFilter, tz: Timezone) {
        if filter.is_unbounded() {
            return;
        }
        let in_range = |created_at: &str| {
            parse_timestamp(created_at).is_some_and(|ts| filter.contains(tz.local_date(ts)))
        };
        self.xp_transactions.retain(|t| in_range(&t.created_at));
        self.audits_done.retain(|t| in_range(&t.created_at));
        self.audits_received.retain(|t| in_range(&t.created_at));
        self.progress.retain(|p| in_range(&p.created_at));
    }
}

/// Inclusive date range filter for --since/--until.
#[derive(Debug, Clone, Default)]
pub(crate) struct DateFilter {
    pub(crate) since: Option<chrono::NaiveDate>,
    pub(crate) until: Option<chrono::NaiveDate>,
}

impl DateFilter {
    pub(crate) fn new(since: Option<chrono::NaiveDate>, until: Option<chrono::NaiveDate>) -> Self {
        Self { since, until }
    }

    pub(crate) fn is_unbounded(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }

    pub(crate) fn contains(&self, date: chrono::NaiveDate) -> bool {
        if let Some(s) = self.since
            && date < s
        {
            return false;
        }
        if let Some(u) = self.until
            && date > u
        {
            return false;
        }
        true
    }
}
