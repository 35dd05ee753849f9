//! Response shape abstraction layer
//!
//! The platform's GraphQL responses come in more than one layout: the
//! query-alias shape (top-level `moduleXP`, `piscineGoXP`, `auditsDone`,
//! ...) and the user-scoped shape (collections nested under `user[0]`).
//! Each layout gets its own adapter; detection is explicit instead of
//! field-by-field probing.

pub(crate) mod aliased;
pub(crate) mod scoped;

use std::sync::LazyLock;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::core::{
    DateFilter, ProfileRecords, ProfileStatistics, StatsOptions, Transaction, UserRecord, compute,
};
use crate::error::AppError;
use crate::utils::Timezone;

/// One supported raw response layout.
pub(crate) trait ResponseShape: Send + Sync {
    /// Shape name for diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this adapter recognizes the response object.
    fn matches(&self, raw: &Map<String, Value>) -> bool;

    /// Extract the normalized record bundle. Malformed array elements are
    /// dropped and counted; a present-but-wrong-typed field is a contract
    /// violation and errors.
    fn extract(&self, raw: &Map<String, Value>) -> Result<ProfileRecords, AppError>;
}

/// All registered shapes, most specific first. The aliased shape is the
/// catch-all and must stay last.
static SHAPES: LazyLock<Vec<Box<dyn ResponseShape>>> = LazyLock::new(|| {
    vec![
        Box::new(scoped::UserScopedShape),
        Box::new(aliased::AliasedShape),
    ]
});

pub(crate) fn detect_shape(raw: &Map<String, Value>) -> &'static dyn ResponseShape {
    SHAPES
        .iter()
        .find(|shape| shape.matches(raw))
        .map(|shape| shape.as_ref())
        .expect("the aliased shape matches every object")
}

/// Normalize a raw response into `ProfileRecords`.
///
/// Accepts either the bare `data` object or a full `{"data": ...}`
/// GraphQL envelope. Errs only on contract violations (non-object input,
/// a known field with the wrong JSON type); missing collections are
/// business data absence and yield empty records.
pub(crate) fn extract_records(raw: &Value) -> Result<ProfileRecords, AppError> {
    let Some(mut obj) = raw.as_object() else {
        return Err(AppError::ResponseNotObject);
    };
    if let Some(inner) = obj.get("data").and_then(Value::as_object) {
        obj = inner;
    }
    detect_shape(obj).extract(obj)
}

/// Shape detection, extraction, date filtering, and the stats facade in
/// one call.
pub(crate) fn load_statistics(
    raw: &Value,
    options: &StatsOptions,
    filter: &DateFilter,
    timezone: Timezone,
) -> Result<ProfileStatistics, AppError> {
    let mut records = extract_records(raw)?;
    records.retain_date_range(filter, timezone);
    Ok(compute(&records, options))
}

pub(super) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse an optional array field element-tolerantly: absent or null means
/// empty, a non-array is a contract violation, and individual elements
/// that fail to deserialize are dropped and counted.
pub(super) fn parse_array<T: DeserializeOwned>(
    value: Option<&Value>,
    field: &str,
) -> Result<(Vec<T>, u64), AppError> {
    match value {
        None | Some(Value::Null) => Ok((Vec::new(), 0)),
        Some(Value::Array(items)) => {
            let mut parsed = Vec::with_capacity(items.len());
            let mut skipped = 0;
            for item in items {
                match serde_json::from_value::<T>(item.clone()) {
                    Ok(record) => parsed.push(record),
                    Err(_) => skipped += 1,
                }
            }
            Ok((parsed, skipped))
        }
        Some(other) => Err(AppError::InvalidShape {
            field: field.to_string(),
            expected: "an array",
            found: json_type_name(other),
        }),
    }
}

/// Parse a transaction array, enforcing the amount invariant and filling
/// in the kind tag that aliased collections omit.
pub(super) fn parse_transactions(
    value: Option<&Value>,
    field: &str,
    default_kind: Option<&str>,
) -> Result<(Vec<Transaction>, u64), AppError> {
    let (mut transactions, mut skipped) = parse_array::<Transaction>(value, field)?;
    let before = transactions.len();
    transactions.retain(Transaction::is_well_formed);
    skipped += (before - transactions.len()) as u64;
    if let Some(kind) = default_kind {
        for t in &mut transactions {
            if t.kind.is_empty() {
                t.kind = kind.to_string();
            }
        }
    }
    Ok((transactions, skipped))
}

/// Read the user record from a `user` field that is either a Hasura-style
/// one-element array or a bare object.
pub(super) fn parse_user(
    value: Option<&Value>,
    field: &str,
) -> Result<(Option<UserRecord>, u64), AppError> {
    let first = match value {
        None | Some(Value::Null) => return Ok((None, 0)),
        Some(Value::Array(items)) => match items.first() {
            Some(first) => first,
            None => return Ok((None, 0)),
        },
        Some(obj @ Value::Object(_)) => obj,
        Some(other) => {
            return Err(AppError::InvalidShape {
                field: field.to_string(),
                expected: "an array or object",
                found: json_type_name(other),
            });
        }
    };
    match serde_json::from_value::<UserRecord>(first.clone()) {
        Ok(user) => Ok((Some(user), 0)),
        Err(_) => Ok((None, 1)),
    }
}
