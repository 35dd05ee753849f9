//! Grade timeline: progress records as a plottable series

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::types::ProgressEntry;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct GradePoint {
    pub(crate) at: DateTime<Utc>,
    pub(crate) grade: f64,
}

/// Build a chronologically ordered grade series.
///
/// Entries with an unreadable timestamp or a null/non-numeric grade are
/// dropped (ungraded work is pending, not zero). `limit` truncates to the
/// first N valid entries in input order before sorting, mirroring the
/// upstream "take N most recent via query order" pattern.
pub(crate) fn build_grade_timeline(
    entries: &[ProgressEntry],
    limit: Option<usize>,
) -> Vec<GradePoint> {
    let mut points: Vec<GradePoint> = entries
        .iter()
        .filter_map(|entry| {
            let at = entry.timestamp()?;
            let grade = entry.numeric_grade()?;
            Some(GradePoint { at, grade })
        })
        .collect();

    if let Some(limit) = limit {
        points.truncate(limit);
    }

    points.sort_by_key(|p| p.at);
    points
}

/// Arithmetic mean of the series, `None` when empty.
pub(crate) fn average_grade(points: &[GradePoint]) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    Some(points.iter().map(|p| p.grade).sum::<f64>() / points.len() as f64)
}
