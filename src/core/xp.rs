//! XP aggregation: category totals and the cumulative timeline

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::types::Transaction;

/// Bucket for XP transactions matching no configured category.
pub(crate) const UNCATEGORIZED: &str = "uncategorized";

/// Path predicate mirroring the platform's `_like`/`_nlike` query filters:
/// every `contains` fragment must appear in the path, no `excludes`
/// fragment may.
#[derive(Debug, Clone, Default)]
pub(crate) struct PathMatcher {
    pub(crate) contains: Vec<String>,
    pub(crate) excludes: Vec<String>,
}

impl PathMatcher {
    pub(crate) fn matches(&self, path: &str) -> bool {
        self.contains.iter().all(|needle| path.contains(needle))
            && !self.excludes.iter().any(|needle| path.contains(needle))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CategoryMatcher {
    pub(crate) name: String,
    pub(crate) matcher: PathMatcher,
}

impl CategoryMatcher {
    fn new(name: &str, contains: &[&str], excludes: &[&str]) -> Self {
        CategoryMatcher {
            name: name.to_string(),
            matcher: PathMatcher {
                contains: contains.iter().map(|s| s.to_string()).collect(),
                excludes: excludes.iter().map(|s| s.to_string()).collect(),
            },
        }
    }
}

/// The categories the platform tracks: regular module work plus one bucket
/// per piscine track. Mutually exclusive by construction (module excludes
/// piscine paths).
pub(crate) fn default_categories() -> Vec<CategoryMatcher> {
    vec![
        CategoryMatcher::new("module", &["/module/"], &["piscine"]),
        CategoryMatcher::new("piscine-go", &["piscine-go"], &[]),
        CategoryMatcher::new("piscine-js", &["piscine-js"], &[]),
        CategoryMatcher::new("piscine-ux", &["piscine-ux"], &[]),
        CategoryMatcher::new("piscine-ui", &["piscine-ui"], &[]),
        CategoryMatcher::new("piscine-rust", &["piscine-rust"], &[]),
    ]
}

/// One point of the cumulative XP series.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct XpPoint {
    pub(crate) at: DateTime<Utc>,
    pub(crate) cumulative_xp: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct XpSummary {
    pub(crate) total_xp: f64,
    pub(crate) by_category: BTreeMap<String, f64>,
    pub(crate) timeline: Vec<XpPoint>,
}

/// Sum and time-sort XP-bearing transactions.
///
/// Only `kind == "xp"` records with a parseable timestamp participate;
/// malformed upstream records are expected and dropped silently. Timestamp
/// ties keep the input's relative order (stable sort), so identical input
/// always produces identical output.
pub(crate) fn aggregate_xp(
    transactions: &[Transaction],
    categories: &[CategoryMatcher],
) -> XpSummary {
    let mut included: Vec<(DateTime<Utc>, &Transaction)> = transactions
        .iter()
        .filter(|t| t.kind == "xp")
        .filter_map(|t| t.timestamp().map(|ts| (ts, t)))
        .collect();

    let mut by_category: BTreeMap<String, f64> = categories
        .iter()
        .map(|c| (c.name.clone(), 0.0))
        .collect();
    let mut total_xp = 0.0;

    for (_, t) in &included {
        total_xp += t.amount;
        let bucket = categories
            .iter()
            .find(|c| c.matcher.matches(&t.path))
            .map(|c| c.name.as_str())
            .unwrap_or(UNCATEGORIZED);
        *by_category.entry(bucket.to_string()).or_insert(0.0) += t.amount;
    }

    included.sort_by_key(|(ts, _)| *ts);

    let mut cumulative = 0.0;
    let timeline = included
        .iter()
        .map(|(ts, t)| {
            cumulative += t.amount;
            XpPoint {
                at: *ts,
                cumulative_xp: cumulative,
            }
        })
        .collect();

    XpSummary {
        total_xp,
        by_category,
        timeline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(kind: &str, amount: f64, created_at: &str, path: &str) -> Transaction {
        Transaction {
            id: None,
            kind: kind.to_string(),
            amount,
            created_at: created_at.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn totals_match_sum_of_parseable_xp() {
        let txs = vec![
            tx("xp", 100.0, "2024-01-01", "/kisumu/module/quad"),
            tx("xp", 50.0, "2024-01-03", "/kisumu/module/ascii"),
            tx("up", 999.0, "2024-01-02", "/kisumu/module/quad"),
            tx("xp", 25.0, "not-a-date", "/kisumu/module/quad"),
        ];
        let summary = aggregate_xp(&txs, &default_categories());
        assert_eq!(summary.total_xp, 150.0);
    }

    #[test]
    fn timeline_scenario_sorted_by_date() {
        // Out-of-order input: Jan 1, Jan 3, Jan 2.
        let txs = vec![
            tx("xp", 100.0, "2024-01-01", "/kisumu/module/a"),
            tx("xp", 50.0, "2024-01-03", "/kisumu/module/b"),
            tx("xp", 25.0, "2024-01-02", "/kisumu/module/c"),
        ];
        let summary = aggregate_xp(&txs, &default_categories());
        let cumulative: Vec<f64> = summary.timeline.iter().map(|p| p.cumulative_xp).collect();
        assert_eq!(cumulative, vec![100.0, 125.0, 175.0]);
        assert_eq!(summary.total_xp, 175.0);
    }

    #[test]
    fn timeline_is_monotonically_non_decreasing() {
        let txs = vec![
            tx("xp", 30.0, "2024-02-01", "/kisumu/module/a"),
            tx("xp", 0.0, "2024-02-02", "/kisumu/module/b"),
            tx("xp", 70.0, "2024-02-03", "/kisumu/module/c"),
        ];
        let summary = aggregate_xp(&txs, &default_categories());
        for pair in summary.timeline.windows(2) {
            assert!(pair[0].cumulative_xp <= pair[1].cumulative_xp);
        }
    }

    #[test]
    fn timestamp_ties_keep_input_order() {
        let txs = vec![
            tx("xp", 10.0, "2024-01-01T10:00:00Z", "/kisumu/module/first"),
            tx("xp", 20.0, "2024-01-01T10:00:00Z", "/kisumu/module/second"),
        ];
        let summary = aggregate_xp(&txs, &default_categories());
        assert_eq!(summary.timeline[0].cumulative_xp, 10.0);
        assert_eq!(summary.timeline[1].cumulative_xp, 30.0);
    }

    #[test]
    fn categories_partition_by_path() {
        let txs = vec![
            tx("xp", 100.0, "2024-01-01", "/kisumu/module/quad"),
            tx("xp", 40.0, "2024-01-02", "/kisumu/piscine-go/quest-01"),
            tx("xp", 60.0, "2024-01-03", "/kisumu/module/piscine-js/loops"),
        ];
        let summary = aggregate_xp(&txs, &default_categories());
        assert_eq!(summary.by_category["module"], 100.0);
        assert_eq!(summary.by_category["piscine-go"], 40.0);
        // A piscine path under /module/ belongs to the piscine bucket, not
        // module (module excludes piscine).
        assert_eq!(summary.by_category["piscine-js"], 60.0);
        assert_eq!(summary.total_xp, 200.0);
    }

    #[test]
    fn unmatched_paths_fall_into_uncategorized_but_count_in_total() {
        let txs = vec![tx("xp", 15.0, "2024-01-01", "/kisumu/checkpoint/one")];
        let summary = aggregate_xp(&txs, &default_categories());
        assert_eq!(summary.by_category[UNCATEGORIZED], 15.0);
        assert_eq!(summary.total_xp, 15.0);
    }

    #[test]
    fn configured_categories_always_present_uncategorized_only_when_used() {
        let summary = aggregate_xp(&[], &default_categories());
        assert_eq!(summary.by_category.len(), default_categories().len());
        assert!(!summary.by_category.contains_key(UNCATEGORIZED));
        assert_eq!(summary.by_category["module"], 0.0);
    }

    #[test]
    fn empty_input_yields_zero_total_and_empty_timeline() {
        let summary = aggregate_xp(&[], &default_categories());
        assert_eq!(summary.total_xp, 0.0);
        assert!(summary.timeline.is_empty());
    }

    #[test]
    fn path_matcher_requires_all_contains_and_no_excludes() {
        let m = PathMatcher {
            contains: vec!["/module/".to_string()],
            excludes: vec!["piscine".to_string()],
        };
        assert!(m.matches("/kisumu/module/quad"));
        assert!(!m.matches("/kisumu/module/piscine-js/loops"));
        assert!(!m.matches("/kisumu/checkpoint/one"));
    }
}
