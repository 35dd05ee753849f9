//! GraphQL transport
//!
//! One POST with the aliased profile query. The aggregation core never
//! sees this layer; it only receives the already-fetched response value.

use std::time::Duration;

use serde_json::Value;

use crate::error::AppError;

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// The aliased profile query. Path filters are campus-independent:
/// module XP lives under `/<campus>/module/`, piscine XP under paths
/// containing the track name.
pub(crate) const PROFILE_QUERY: &str = r#"
query {
    user {
        id
        login
        totalUp
        totalUpBonus
        totalDown
    }

    moduleXP: transaction(
        where: {
            type: {_eq: "xp"},
            path: {_like: "%/module/%"},
            _and: {path: {_nlike: "%piscine%"}}
        }
    ) {
        amount
        createdAt
        path
    }

    piscineGoXP: transaction(
        where: {type: {_eq: "xp"}, path: {_like: "%piscine-go%"}}
    ) {
        amount
        createdAt
        path
    }

    piscineJsXP: transaction(
        where: {type: {_eq: "xp"}, path: {_like: "%piscine-js%"}}
    ) {
        amount
        createdAt
        path
    }

    piscineUxXP: transaction(
        where: {type: {_eq: "xp"}, path: {_like: "%piscine-ux%"}}
    ) {
        amount
        createdAt
        path
    }

    piscineUiXP: transaction(
        where: {type: {_eq: "xp"}, path: {_like: "%piscine-ui%"}}
    ) {
        amount
        createdAt
        path
    }

    piscineRustXP: transaction(
        where: {type: {_eq: "xp"}, path: {_like: "%piscine-rust%"}}
    ) {
        amount
        createdAt
        path
    }

    skills: transaction(
        where: {type: {_like: "skill_%"}},
        order_by: {createdAt: desc}
    ) {
        type
        amount
        createdAt
    }

    auditsDone: transaction(
        where: {type: {_eq: "up"}, path: {_like: "%/module/%"}}
    ) {
        amount
        createdAt
        path
    }

    auditsReceived: transaction(
        where: {type: {_eq: "down"}, path: {_like: "%/module/%"}}
    ) {
        amount
        createdAt
        path
    }

    progresses: progress(
        where: {object: {type: {_eq: "exercise"}}},
        order_by: {createdAt: desc}
    ) {
        id
        grade
        createdAt
        object {
            id
            name
            type
        }
    }

    audits {
        id
        grade
        createdAt
        updatedAt
        closedAt
        group {
            path
            captainLogin
            members {
                login
            }
        }
    }
}
"#;

/// POST the profile query and return the full response document.
///
/// A response-level `errors` array (auth expiry, bad query) surfaces as
/// `AppError::GraphQl`; shape problems in `data` are left to the response
/// adapters.
pub(crate) fn fetch_profile(domain: &str, token: &str) -> Result<Value, AppError> {
    let url = format!("https://{domain}/api/graphql-engine/v1/graphql");

    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(FETCH_TIMEOUT))
        .build()
        .into();

    let response = agent
        .post(&url)
        .header("Authorization", &format!("Bearer {token}"))
        .send_json(serde_json::json!({"query": PROFILE_QUERY}))?;

    let mut body = response.into_body();
    let document: Value = serde_json::from_reader(body.as_reader())?;

    if let Some(message) = first_error_message(&document) {
        return Err(AppError::GraphQl { message });
    }
    Ok(document)
}

fn first_error_message(document: &Value) -> Option<String> {
    let errors = document.get("errors")?.as_array()?;
    let first = errors.first()?;
    let message = first
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown GraphQL error");
    Some(message.to_string())
}
