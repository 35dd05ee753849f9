//! User-scoped response shape
//!
//! Some query variants nest everything under the user row instead of
//! top-level aliases: `user[0].profile.xps`, `user[0].profile.audits`,
//! or a flat `user[0].transactions` ledger carrying explicit type tags,
//! alongside the pre-aggregated `totalUp`/`totalDown` amounts.

use serde_json::{Map, Value};

use super::{ResponseShape, json_type_name, parse_array, parse_transactions, parse_user};
use crate::core::{ProfileRecords, ProgressEntry};
use crate::error::AppError;

pub(crate) struct UserScopedShape;

fn first_user(raw: &Map<String, Value>) -> Option<&Map<String, Value>> {
    match raw.get("user") {
        Some(Value::Array(items)) => items.first().and_then(Value::as_object),
        Some(Value::Object(obj)) => Some(obj),
        _ => None,
    }
}

impl ResponseShape for UserScopedShape {
    fn name(&self) -> &'static str {
        "user-scoped"
    }

    fn matches(&self, raw: &Map<String, Value>) -> bool {
        first_user(raw)
            .is_some_and(|user| user.contains_key("profile") || user.contains_key("transactions"))
    }

    fn extract(&self, raw: &Map<String, Value>) -> Result<ProfileRecords, AppError> {
        let mut records = ProfileRecords::default();
        let mut skipped = 0u64;

        let (user, s) = parse_user(raw.get("user"), "user")?;
        records.user = user;
        skipped += s;

        let Some(scope) = first_user(raw) else {
            records.skipped = skipped;
            return Ok(records);
        };

        match scope.get("profile") {
            None | Some(Value::Null) => {}
            Some(Value::Object(profile)) => {
                // Profile collections carry no type column: xps are XP by
                // construction, audits are audits the user performed.
                let (mut xps, s) =
                    parse_transactions(profile.get("xps"), "user[0].profile.xps", Some("xp"))?;
                records.xp_transactions.append(&mut xps);
                skipped += s;

                let (mut done, s) =
                    parse_transactions(profile.get("audits"), "user[0].profile.audits", Some("up"))?;
                records.audits_done.append(&mut done);
                skipped += s;
            }
            Some(other) => {
                return Err(AppError::InvalidShape {
                    field: "user[0].profile".to_string(),
                    expected: "an object",
                    found: json_type_name(other),
                });
            }
        }

        // The flat ledger routes by its explicit type tags.
        let (ledger, s) =
            parse_transactions(scope.get("transactions"), "user[0].transactions", None)?;
        skipped += s;
        for t in ledger {
            match t.kind.as_str() {
                "xp" => records.xp_transactions.push(t),
                "up" => records.audits_done.push(t),
                "down" => records.audits_received.push(t),
                kind if kind.starts_with("skill_") => records.skill_transactions.push(t),
                _ => {}
            }
        }

        let (mut progress, s) =
            parse_array::<ProgressEntry>(scope.get("progresses"), "user[0].progresses")?;
        records.progress.append(&mut progress);
        skipped += s;

        records.valid = (records.xp_transactions.len()
            + records.skill_transactions.len()
            + records.audits_done.len()
            + records.audits_received.len()
            + records.progress.len()) as u64;
        records.skipped = skipped;
        Ok(records)
    }
}
