use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Response is not a JSON object")]
    ResponseNotObject,

    #[error("Field \"{field}\" should be {expected}, found {found}")]
    InvalidShape {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("No stored session token. Run `z01stats login` first or pass --input.")]
    MissingToken,

    #[error("Sign-in failed: invalid username or password")]
    InvalidCredentials,

    #[error("Sign-in failed with status {status}")]
    SigninFailed { status: u16 },

    #[error("GraphQL error: {message}")]
    GraphQl { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
