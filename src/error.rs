//! Error taxonomy for session and API operations.
//!
//! ERROR HANDLING
//! ==============
//! `ApiError` is what every outbound call returns and is propagated to call
//! sites unchanged. `AuthenticationError` is the only error a login caller
//! sees. Session expiry is never surfaced as its own error: it is recorded as
//! an [`InvalidationReason`] when the store resets itself to anonymous.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Maximum number of error body characters surfaced to callers.
pub const MAX_ERROR_CHARS: usize = 200;

// =============================================================================
// API ERROR
// =============================================================================

/// Errors produced by a single outbound API call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server could not be reached.
    #[error("unable to reach the server: {0}")]
    Network(String),

    /// The request was aborted after the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The request could not be constructed or encoded.
    #[error("request could not be built: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("request failed ({status}): {message}")]
    Http { status: u16, message: String },

    /// The response body did not match the expected schema.
    #[error("response could not be decoded: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build an HTTP error from a status code and a raw response body.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Http { status, message: sanitize_body(body) }
    }

    /// HTTP status carried by the error, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server declared the presented credential invalid.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Whether the failure happened below HTTP (no response was received).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_) | Self::Request(_))
    }
}

/// Trim and truncate an error body for display.
pub(crate) fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_owned()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

// =============================================================================
// AUTHENTICATION ERROR
// =============================================================================

/// Failure of a credential exchange, surfaced to the caller of `login`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    /// The authentication endpoint refused the supplied credentials.
    #[error("credentials rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The authentication endpoint could not be reached.
    #[error("authentication endpoint unreachable: {0}")]
    Unreachable(#[source] ApiError),

    /// The endpoint answered successfully but without a usable token.
    #[error("authentication response malformed: {0}")]
    MalformedResponse(String),

    /// A token was issued but the identity behind it could not be loaded.
    #[error("identity could not be loaded after login")]
    IdentityUnavailable,
}

impl From<ApiError> for AuthenticationError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http { status, message } => Self::Rejected { status, message },
            ApiError::Decode(message) => Self::MalformedResponse(message),
            other => Self::Unreachable(other),
        }
    }
}

// =============================================================================
// INVALIDATION REASON
// =============================================================================

/// Why the session was reset to anonymous.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidationReason {
    /// The user logged out.
    Logout,
    /// A credential exchange failed.
    LoginFailed,
    /// A call carrying the credential came back 401.
    Unauthorized,
    /// The identity endpoint answered with a failure status or bad payload.
    IdentityRejected,
    /// The identity endpoint could not be reached.
    IdentityUnreachable,
}

impl InvalidationReason {
    /// Stable label used in log lines.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Logout => "logout",
            Self::LoginFailed => "login_failed",
            Self::Unauthorized => "unauthorized",
            Self::IdentityRejected => "identity_rejected",
            Self::IdentityUnreachable => "identity_unreachable",
        }
    }

    /// Classify an identity-fetch failure.
    #[must_use]
    pub fn for_identity_failure(err: &ApiError) -> Self {
        if err.is_unauthorized() {
            Self::Unauthorized
        } else if err.is_transport() {
            Self::IdentityUnreachable
        } else {
            Self::IdentityRejected
        }
    }
}

// =============================================================================
// CONFIG ERROR
// =============================================================================

/// Errors produced while parsing [`crate::config::ClientConfig`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A configuration value could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}
