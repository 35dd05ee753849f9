//! Query-alias response shape
//!
//! The layout produced by the dashboard's aliased GraphQL query: one
//! top-level array per concern (`moduleXP`, `piscineGoXP`, ..., `skills`,
//! `auditsDone`, `auditsReceived`, `progresses`/`exercises`, `audits`)
//! plus a `user` row. XP and audit aliases select no `type` column; the
//! tag is implied by the alias and filled in here.

use serde_json::{Map, Value};

use super::{ResponseShape, parse_array, parse_transactions, parse_user};
use crate::core::{Audit, ProfileRecords, ProgressEntry};
use crate::error::AppError;

pub(crate) struct AliasedShape;

/// XP-bearing aliases end in `XP` (`moduleXP`, `piscineGoXP`, ...).
fn is_xp_alias(key: &str) -> bool {
    key.len() > 2 && key.ends_with("XP")
}

impl ResponseShape for AliasedShape {
    fn name(&self) -> &'static str {
        "aliased"
    }

    /// Catch-all: any object not claimed by a more specific shape.
    fn matches(&self, _raw: &Map<String, Value>) -> bool {
        true
    }

    fn extract(&self, raw: &Map<String, Value>) -> Result<ProfileRecords, AppError> {
        let mut records = ProfileRecords::default();
        let mut skipped = 0u64;

        // Sorted alias order keeps the concatenation deterministic; the
        // timeline's stable sort preserves it on timestamp ties.
        let mut xp_aliases: Vec<&String> = raw.keys().filter(|k| is_xp_alias(k.as_str())).collect();
        xp_aliases.sort();
        for alias in xp_aliases {
            let (mut txs, s) = parse_transactions(raw.get(alias.as_str()), alias, Some("xp"))?;
            records.xp_transactions.append(&mut txs);
            skipped += s;
        }

        let (skills, s) = parse_transactions(raw.get("skills"), "skills", None)?;
        records.skill_transactions = skills;
        skipped += s;

        let (done, s) = parse_transactions(raw.get("auditsDone"), "auditsDone", Some("up"))?;
        records.audits_done = done;
        skipped += s;

        let (received, s) =
            parse_transactions(raw.get("auditsReceived"), "auditsReceived", Some("down"))?;
        records.audits_received = received;
        skipped += s;

        for field in ["progresses", "exercises"] {
            let (mut entries, s) = parse_array::<ProgressEntry>(raw.get(field), field)?;
            records.progress.append(&mut entries);
            skipped += s;
        }

        let (audits, s) = parse_array::<Audit>(raw.get("audits"), "audits")?;
        records.audits = audits;
        skipped += s;

        let (user, s) = parse_user(raw.get("user"), "user")?;
        records.user = user;
        skipped += s;

        records.valid = (records.xp_transactions.len()
            + records.skill_transactions.len()
            + records.audits_done.len()
            + records.audits_received.len()
            + records.progress.len()
            + records.audits.len()) as u64;
        records.skipped = skipped;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extract(raw: Value) -> ProfileRecords {
        AliasedShape.extract(raw.as_object().unwrap()).unwrap()
    }

    #[test]
    fn xp_aliases_concatenate_in_sorted_order() {
        let records = extract(json!({
            "piscineGoXP": [{"amount": 40.0, "createdAt": "2024-01-01", "path": "/kisumu/piscine-go/a"}],
            "moduleXP": [{"amount": 100.0, "createdAt": "2024-01-01", "path": "/kisumu/module/a"}]
        }));
        assert_eq!(records.xp_transactions.len(), 2);
        // moduleXP sorts before piscineGoXP.
        assert_eq!(records.xp_transactions[0].amount, 100.0);
        assert!(records.xp_transactions.iter().all(|t| t.kind == "xp"));
    }

    #[test]
    fn audit_aliases_get_up_down_tags() {
        let records = extract(json!({
            "auditsDone": [{"amount": 30.0, "createdAt": "2024-01-01", "path": "/kisumu/module/a"}],
            "auditsReceived": [{"amount": 10.0, "createdAt": "2024-01-01", "path": "/kisumu/module/a"}]
        }));
        assert_eq!(records.audits_done[0].kind, "up");
        assert_eq!(records.audits_received[0].kind, "down");
    }

    #[test]
    fn progresses_and_exercises_both_collected() {
        let records = extract(json!({
            "progresses": [{"grade": 1.0, "createdAt": "2024-01-01"}],
            "exercises": [{"grade": 0.5, "createdAt": "2024-01-02"}]
        }));
        assert_eq!(records.progress.len(), 2);
    }

    #[test]
    fn user_row_and_audits_parse() {
        let records = extract(json!({
            "user": [{"id": 7, "login": "jdoe", "totalUp": 30.0, "totalDown": 10.0}],
            "audits": [{"createdAt": "2024-01-01", "closedAt": null}]
        }));
        let user = records.user.unwrap();
        assert_eq!(user.login.as_deref(), Some("jdoe"));
        assert_eq!(user.audit_totals(), Some((30.0, 0.0, 10.0)));
        assert_eq!(records.audits.len(), 1);
    }

    #[test]
    fn malformed_elements_counted_not_fatal() {
        let records = extract(json!({
            "moduleXP": [
                {"amount": 100.0, "createdAt": "2024-01-01", "path": "/kisumu/module/a"},
                {"amount": "broken"},
                {"amount": -3.0, "createdAt": "2024-01-01", "path": "/kisumu/module/a"}
            ]
        }));
        assert_eq!(records.xp_transactions.len(), 1);
        assert_eq!(records.valid, 1);
        assert_eq!(records.skipped, 2);
    }

    #[test]
    fn wrong_typed_collection_is_an_error() {
        let raw = json!({"skills": {"unexpected": "object"}});
        let err = AliasedShape.extract(raw.as_object().unwrap()).unwrap_err();
        assert!(err.to_string().contains("skills"));
    }

    #[test]
    fn unknown_keys_ignored() {
        let records = extract(json!({"somethingElse": [1, 2, 3], "level": 12}));
        assert_eq!(records.valid, 0);
        assert_eq!(records.skipped, 0);
    }
}
