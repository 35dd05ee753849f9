//! Core module - record models and the aggregation pipeline

mod audit;
mod skills;
mod stats;
mod timeline;
mod types;
mod xp;

pub(crate) use audit::{AuditCount, AuditRatio, AuditSide, AuditSummary};
pub(crate) use skills::{DEFAULT_TOP_SKILLS, SkillScore};
pub(crate) use stats::{AuditPreference, ProfileStatistics, StatsOptions, UserSummary, compute};
pub(crate) use timeline::GradePoint;
pub(crate) use types::{
    Audit, AuditGroup, AuditMember, AuditPrivate, DateFilter, ProfileRecords, ProgressEntry,
    ProgressObject, Transaction, UserRecord,
};
pub(crate) use xp::{CategoryMatcher, PathMatcher, XpPoint, default_categories};
