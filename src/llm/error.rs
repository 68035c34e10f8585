//! LLM error types

use thiserror::Error;

/// LLM error with classification
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct LlmError {
    pub kind: LlmErrorKind,
    pub message: String,
}

impl LlmError {
    pub fn new(kind: LlmErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Network, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::RateLimit, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::ServerError, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Auth, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::InvalidRequest, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Unknown, message)
    }
}

/// Error classification.
///
/// Nothing in this crate retries; the kind only feeds logs and lets callers
/// decide what to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Network issues, timeouts
    Network,
    /// Rate limited or quota exhausted (429)
    RateLimit,
    /// Server error (5xx)
    ServerError,
    /// Missing or rejected credential (401, 403)
    Auth,
    /// Bad request (400), including unknown model names
    InvalidRequest,
    /// Unknown error, including malformed responses
    Unknown,
}

impl LlmErrorKind {
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Network | Self::RateLimit | Self::ServerError)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::RateLimit => "rate_limit",
            Self::ServerError => "server_error",
            Self::Auth => "auth",
            Self::InvalidRequest => "invalid_request",
            Self::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_kinds() {
        assert!(LlmErrorKind::Network.is_transient());
        assert!(LlmErrorKind::RateLimit.is_transient());
        assert!(LlmErrorKind::ServerError.is_transient());
        assert!(!LlmErrorKind::Auth.is_transient());
        assert!(!LlmErrorKind::InvalidRequest.is_transient());
        assert!(!LlmErrorKind::Unknown.is_transient());
    }

    #[test]
    fn test_display_is_message() {
        let err = LlmError::auth("GOOGLE_API_KEY is not set");
        assert_eq!(err.to_string(), "GOOGLE_API_KEY is not set");
        assert_eq!(err.kind, LlmErrorKind::Auth);
    }
}
