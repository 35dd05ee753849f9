//! Skill ranking
//!
//! Repeated skill assessments supersede rather than accumulate: the score
//! kept per `skill_*` tag is the maximum amount ever observed, not a sum.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::types::Transaction;

pub(crate) const DEFAULT_TOP_SKILLS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct SkillScore {
    pub(crate) name: String,
    pub(crate) amount: f64,
}

/// Strip the `skill_` prefix, turn underscores into spaces, title-case
/// each word: `skill_front_end` becomes `Front End`.
pub(crate) fn normalize_skill_name(tag: &str) -> String {
    let stripped = tag.strip_prefix("skill_").unwrap_or(tag);
    stripped
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rank `skill_*` transactions by best demonstrated amount, descending,
/// truncated to `top_n`. Amount ties break by raw tag lexical order so the
/// result is deterministic. Non-skill records are ignored.
pub(crate) fn rank_skills(transactions: &[Transaction], top_n: usize) -> Vec<SkillScore> {
    // BTreeMap keys give the lexical tie order for free.
    let mut best: BTreeMap<&str, f64> = BTreeMap::new();
    for t in transactions {
        if !t.kind.starts_with("skill_") {
            continue;
        }
        best.entry(t.kind.as_str())
            .and_modify(|amount| *amount = amount.max(t.amount))
            .or_insert(t.amount);
    }

    let mut ranked: Vec<(&str, f64)> = best.into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(top_n);

    ranked
        .into_iter()
        .map(|(tag, amount)| SkillScore {
            name: normalize_skill_name(tag),
            amount,
        })
        .collect()
}
