//! API failure classification.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use catalog::envelope::ErrorBody;

/// Failure of a single API request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, DNS...).
    #[error("network error: {0}")]
    Network(String),
    /// The session token is missing, expired or rejected.
    #[error("your session has expired, please log in again")]
    Unauthorized,
    /// The server answered with a non-success status.
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
    /// The server answered 2xx but the body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// HTTP is only wired up in the browser build.
    #[error("not available outside the browser")]
    Unavailable,
}

impl ApiError {
    /// Build an error from a non-success status and its raw body.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            return Self::Unauthorized;
        }
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.text().map(str::to_owned))
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty() && trimmed.len() <= 200 && !trimmed.starts_with('<')).then(|| trimmed.to_owned())
            })
            .unwrap_or_else(|| default_status_message(status).to_owned());
        Self::Status { status, message }
    }

    /// Whether the session must be discarded and the user sent to login.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// HTTP status, when the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }
}

fn default_status_message(status: u16) -> &'static str {
    match status {
        400 => "bad request",
        403 => "you do not have permission for this action",
        404 => "not found",
        409 => "conflicting update",
        422 => "the server rejected the submitted values",
        500..=599 => "server error",
        _ => "unexpected status",
    }
}

impl From<catalog::CatalogError> for ApiError {
    fn from(err: catalog::CatalogError) -> Self {
        Self::Decode(err.to_string())
    }
}
