//! Audit aggregation: done/received counts, amounts, and the ratio
//!
//! Two source shapes exist upstream and both are supported explicitly:
//! audit transactions (`up`/`down` records) and the user row's
//! pre-aggregated `totalUp`/`totalUpBonus`/`totalDown` amounts. The ratio
//! is always amount-based; a zero received amount yields the `N/A`
//! sentinel, never zero or infinity.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::core::types::Transaction;

/// Where audit figures come from.
#[derive(Debug, Clone, Copy)]
pub(crate) enum AuditSource<'a> {
    /// Count and sum `up` (done) / `down` (received) transactions.
    Transactions {
        done: &'a [Transaction],
        received: &'a [Transaction],
    },
    /// Read the user row's pre-aggregated amounts; record counts are not
    /// recoverable from this shape.
    UserTotals {
        total_up: f64,
        total_up_bonus: f64,
        total_down: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuditCount {
    Known(u64),
    NotAvailable,
}

impl Serialize for AuditCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AuditCount::Known(n) => serializer.serialize_u64(*n),
            AuditCount::NotAvailable => serializer.serialize_str("N/A"),
        }
    }
}

impl fmt::Display for AuditCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditCount::Known(n) => write!(f, "{n}"),
            AuditCount::NotAvailable => write!(f, "N/A"),
        }
    }
}

/// Full-precision ratio; rounding to two decimals happens at display time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum AuditRatio {
    Ratio(f64),
    NotAvailable,
}

impl Serialize for AuditRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AuditRatio::Ratio(r) => serializer.serialize_f64(*r),
            AuditRatio::NotAvailable => serializer.serialize_str("N/A"),
        }
    }
}

impl fmt::Display for AuditRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditRatio::Ratio(r) => write!(f, "{r:.2}"),
            AuditRatio::NotAvailable => write!(f, "N/A"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct AuditSide {
    pub(crate) count: AuditCount,
    pub(crate) amount: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct AuditSummary {
    pub(crate) done: AuditSide,
    pub(crate) received: AuditSide,
    pub(crate) ratio: AuditRatio,
}

impl Default for AuditSummary {
    fn default() -> Self {
        AuditSummary {
            done: AuditSide {
                count: AuditCount::Known(0),
                amount: 0.0,
            },
            received: AuditSide {
                count: AuditCount::Known(0),
                amount: 0.0,
            },
            ratio: AuditRatio::NotAvailable,
        }
    }
}

pub(crate) fn aggregate_audits(source: AuditSource<'_>) -> AuditSummary {
    let (done, received) = match source {
        AuditSource::Transactions { done, received } => (
            AuditSide {
                count: AuditCount::Known(done.len() as u64),
                amount: done.iter().map(|t| t.amount).sum(),
            },
            AuditSide {
                count: AuditCount::Known(received.len() as u64),
                amount: received.iter().map(|t| t.amount).sum(),
            },
        ),
        AuditSource::UserTotals {
            total_up,
            total_up_bonus,
            total_down,
        } => (
            AuditSide {
                count: AuditCount::NotAvailable,
                amount: total_up + total_up_bonus,
            },
            AuditSide {
                count: AuditCount::NotAvailable,
                amount: total_down,
            },
        ),
    };

    let ratio = if received.amount > 0.0 {
        AuditRatio::Ratio(done.amount / received.amount)
    } else {
        AuditRatio::NotAvailable
    };

    AuditSummary {
        done,
        received,
        ratio,
    }
}
