//! Error types shared by the configuration loader and the API client.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

// =============================================================================
// API
// =============================================================================

/// Errors produced by backend API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// An endpoint path could not be joined onto the base URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request never produced a response (connect, timeout, fetch abort).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the caller's identity.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Errors produced while reading [`crate::config::ClientConfig`] from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to a value that does not parse.
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },

    /// `TRAINER_ADMIN_ROUTES` named a route that is not in the table.
    #[error("unknown route name in {var}: {name}")]
    UnknownRoute { var: &'static str, name: String },
}
