//! Error type shared by the transport, ceremony and view layers. Display text is
//! what ends up in the result banners, so it must stay short and must never carry
//! ceremony payloads.

use thiserror::Error;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("HTTP {status}: {}", sanitize_body(.body))]
    Transport { status: u16, body: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("{message}")]
    Ceremony { name: String, message: String },
    #[error("Element with id '{0}' not found")]
    ElementNotFound(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error(transparent)]
    Registration(Box<AppError>),
    #[error(transparent)]
    Authentication(Box<AppError>),
}

impl AppError {
    /// Wraps a failure from any registration step.
    #[must_use]
    pub fn registration(cause: Self) -> Self {
        Self::Registration(Box::new(cause))
    }

    /// Wraps a failure from any authentication step.
    #[must_use]
    pub fn authentication(cause: Self) -> Self {
        Self::Authentication(Box::new(cause))
    }

    /// Returns the innermost error, skipping orchestrator wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Registration(inner) | Self::Authentication(inner) => inner.root_cause(),
            other => other,
        }
    }
}

/// Trims and truncates HTTP error bodies for user-facing messages.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_displays_status_and_body() {
        let err = AppError::Transport {
            status: 500,
            body: "  server error\n".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: server error");
    }

    #[test]
    fn transport_error_truncates_long_bodies() {
        let err = AppError::Transport {
            status: 502,
            body: "x".repeat(500),
        };
        assert_eq!(err.to_string().len(), "HTTP 502: ".len() + MAX_ERROR_CHARS);
    }

    #[test]
    fn transport_error_with_empty_body_has_placeholder() {
        let err = AppError::Transport {
            status: 404,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Request failed.");
    }

    #[test]
    fn wrappers_are_transparent() {
        let cause = AppError::Ceremony {
            name: "NotAllowedError".to_string(),
            message: "User cancelled".to_string(),
        };
        let err = AppError::registration(cause);
        assert_eq!(err.to_string(), "User cancelled");
        assert!(matches!(err.root_cause(), AppError::Ceremony { .. }));

        let err = AppError::authentication(AppError::Network("offline".to_string()));
        assert_eq!(err.to_string(), "Network error: offline");
    }
}
