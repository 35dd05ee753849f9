//! JSON output
//!
//! The summary document is the serialized `ProfileStatistics`; facet
//! commands emit just their slice of it.

use serde_json::json;

use crate::core::ProfileStatistics;

pub(crate) fn output_summary_json(stats: &ProfileStatistics) -> String {
    serde_json::to_string_pretty(stats).unwrap()
}

pub(crate) fn output_xp_json(stats: &ProfileStatistics) -> String {
    let doc = json!({
        "total_xp": stats.total_xp,
        "xp_by_category": stats.xp_by_category,
        "xp_timeline": stats.xp_timeline,
    });
    serde_json::to_string_pretty(&doc).unwrap()
}

pub(crate) fn output_audits_json(stats: &ProfileStatistics) -> String {
    let doc = json!({
        "audits": stats.audits,
        "open_audits": stats.open_audits,
    });
    serde_json::to_string_pretty(&doc).unwrap()
}

pub(crate) fn output_skills_json(stats: &ProfileStatistics) -> String {
    serde_json::to_string_pretty(&stats.top_skills).unwrap()
}

pub(crate) fn output_progress_json(stats: &ProfileStatistics) -> String {
    let doc = json!({
        "grade_timeline": stats.grade_timeline,
        "average_grade": stats.average_grade,
    });
    serde_json::to_string_pretty(&doc).unwrap()
}
