//! Error types for upstream calls and for what the dashboard shows.

use thiserror::Error;

/// Failure talking to the upstream weather API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-success status; `message` is the body's `error.message` when present.
    #[error("HTTP error! status: {status}. {}", .message.as_deref().unwrap_or_default())]
    Http { status: u16, message: Option<String> },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse weather response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The error half of the dashboard view state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Configuration error: API key is missing. Please set {}.", crate::config::API_KEY_ENV)]
    Configuration,

    #[error("{0}")]
    Transport(String),

    #[error("No weather data available.")]
    EmptyResult,
}

impl ViewError {
    const UNKNOWN: &'static str = "An unknown error occurred while fetching weather data.";

    /// Remediation line shown under the error message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Configuration => None,
            Self::Transport(_) => Some(
                "Please ensure your API key is correct and you have a stable internet connection.",
            ),
            Self::EmptyResult => Some("Please try again later or check the location."),
        }
    }

    /// Only transport-like failures can be fixed by searching again.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Configuration)
    }
}

impl From<ApiError> for ViewError {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        let message = message.trim();
        if message.is_empty() {
            Self::Transport(Self::UNKNOWN.to_string())
        } else {
            Self::Transport(message.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_embeds_upstream_message() {
        let err = ApiError::Http { status: 400, message: Some("No matching location found.".into()) };
        assert_eq!(err.to_string(), "HTTP error! status: 400. No matching location found.");
    }

    #[test]
    fn http_error_without_body_message() {
        let err = ApiError::Http { status: 503, message: None };
        let view: ViewError = err.into();
        assert_eq!(view, ViewError::Transport("HTTP error! status: 503.".into()));
    }

    #[test]
    fn configuration_error_is_terminal() {
        let err = ViewError::Configuration;
        assert!(err.to_string().starts_with("Configuration error"));
        assert!(err.to_string().contains("TEMPYST_API_KEY"));
        assert!(!err.is_recoverable());
        assert!(err.hint().is_none());
    }

    #[test]
    fn transport_and_empty_errors_carry_hints() {
        assert!(ViewError::Transport("boom".into()).hint().is_some());
        assert!(ViewError::EmptyResult.is_recoverable());
        assert!(ViewError::EmptyResult.hint().is_some());
    }
}
