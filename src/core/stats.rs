//! Profile statistics facade
//!
//! One pure function over a `ProfileRecords` bundle. Every sub-collection
//! is independently absent-tolerant: a partial upstream payload degrades
//! individual statistics, never the whole computation. Each call produces
//! a fresh `ProfileStatistics`; nothing here mutates shared state.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::audit::{AuditSource, AuditSummary, aggregate_audits};
use crate::core::skills::{DEFAULT_TOP_SKILLS, SkillScore, rank_skills};
use crate::core::timeline::{GradePoint, average_grade, build_grade_timeline};
use crate::core::types::ProfileRecords;
use crate::core::xp::{CategoryMatcher, XpPoint, aggregate_xp, default_categories};

/// Which audit source shape to read (see DESIGN.md).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum AuditPreference {
    /// Transactions when any are present, user totals otherwise.
    #[default]
    Auto,
    Transactions,
    Totals,
}

#[derive(Debug)]
pub(crate) struct StatsOptions {
    pub(crate) categories: Vec<CategoryMatcher>,
    pub(crate) top_skills: usize,
    pub(crate) progress_limit: Option<usize>,
    pub(crate) audit_preference: AuditPreference,
}

impl Default for StatsOptions {
    fn default() -> Self {
        StatsOptions {
            categories: default_categories(),
            top_skills: DEFAULT_TOP_SKILLS,
            progress_limit: None,
            audit_preference: AuditPreference::Auto,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UserSummary {
    pub(crate) id: Option<i64>,
    pub(crate) login: Option<String>,
}

/// The computed, display-ready statistics. Immutable once produced; a data
/// refresh recomputes from scratch instead of patching a previous value.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ProfileStatistics {
    pub(crate) user: Option<UserSummary>,
    pub(crate) total_xp: f64,
    pub(crate) xp_by_category: BTreeMap<String, f64>,
    pub(crate) xp_timeline: Vec<XpPoint>,
    pub(crate) audits: AuditSummary,
    pub(crate) top_skills: Vec<SkillScore>,
    pub(crate) grade_timeline: Vec<GradePoint>,
    pub(crate) average_grade: Option<f64>,
    pub(crate) open_audits: u64,
    pub(crate) valid_records: u64,
    pub(crate) skipped_records: u64,
}

fn choose_audit_source<'a>(
    records: &'a ProfileRecords,
    preference: AuditPreference,
) -> AuditSource<'a> {
    let transactions = AuditSource::Transactions {
        done: &records.audits_done,
        received: &records.audits_received,
    };
    let totals = records.user.as_ref().and_then(|u| u.audit_totals()).map(
        |(total_up, total_up_bonus, total_down)| AuditSource::UserTotals {
            total_up,
            total_up_bonus,
            total_down,
        },
    );

    match preference {
        AuditPreference::Transactions => transactions,
        AuditPreference::Totals => totals.unwrap_or(transactions),
        AuditPreference::Auto => {
            if records.audits_done.is_empty() && records.audits_received.is_empty() {
                totals.unwrap_or(transactions)
            } else {
                transactions
            }
        }
    }
}

/// Derive all statistics from one normalized response.
pub(crate) fn compute(records: &ProfileRecords, options: &StatsOptions) -> ProfileStatistics {
    let xp = aggregate_xp(&records.xp_transactions, &options.categories);
    let audits = aggregate_audits(choose_audit_source(records, options.audit_preference));
    let top_skills = rank_skills(&records.skill_transactions, options.top_skills);
    let grade_timeline = build_grade_timeline(&records.progress, options.progress_limit);
    let average = average_grade(&grade_timeline);
    let open_audits = records.audits.iter().filter(|a| a.is_open()).count() as u64;

    ProfileStatistics {
        user: records.user.as_ref().map(|u| UserSummary {
            id: u.id,
            login: u.login.clone(),
        }),
        total_xp: xp.total_xp,
        xp_by_category: xp.by_category,
        xp_timeline: xp.timeline,
        audits,
        top_skills,
        grade_timeline,
        average_grade: average,
        open_audits,
        valid_records: records.valid,
        skipped_records: records.skipped,
    }
}
