//! Sign-in and token storage
//!
//! Credentials are exchanged once for an opaque bearer token via the
//! platform's Basic-Auth endpoint; the token is the only persisted
//! artifact besides the config file.

use base64::Engine as _;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

const SIGNIN_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn signin(domain: &str, login: &str, password: &str) -> Result<String, AppError> {
    let url = format!("https://{domain}/api/auth/signin");
    let credentials =
        base64::engine::general_purpose::STANDARD.encode(format!("{login}:{password}"));

    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(SIGNIN_TIMEOUT))
        .build()
        .into();

    let response = agent
        .post(&url)
        .header("Authorization", &format!("Basic {credentials}"))
        .send_empty()
        .map_err(|e| match e {
            ureq::Error::StatusCode(401) => AppError::InvalidCredentials,
            ureq::Error::StatusCode(status) => AppError::SigninFailed { status },
            other => AppError::Http(other),
        })?;

    let mut body = String::new();
    response.into_body().as_reader().read_to_string(&mut body)?;
    let token = clean_token(&body);
    if token.is_empty() {
        return Err(AppError::SigninFailed { status: 200 });
    }
    Ok(token)
}

/// The endpoint answers with the bare token, sometimes JSON-quoted.
fn clean_token(raw: &str) -> String {
    raw.trim().trim_matches('"').trim().to_string()
}

pub(crate) fn token_cache_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".cache").join("z01stats").join("token"))
}

pub(crate) fn store_token(token: &str) -> Result<PathBuf, AppError> {
    let Some(path) = token_cache_path() else {
        return Err(AppError::MissingToken);
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, token)?;
    Ok(path)
}

pub(crate) fn load_token() -> Option<String> {
    let path = token_cache_path()?;
    let raw = fs::read_to_string(path).ok()?;
    let token = clean_token(&raw);
    if token.is_empty() { None } else { Some(token) }
}
