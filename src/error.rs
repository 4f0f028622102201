use thiserror::Error;

/// Message shown to the user whenever recipe generation fails, whatever the cause.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate recipes. Please try again.";

/// Errors that can occur while producing recipe recommendations
#[derive(Error, Debug)]
pub enum RecommendError {
    /// Credential missing or the recommender was assembled without what it needs
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Configuration file or environment could not be read
    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    /// The completion call failed: non-success status, network failure or deadline
    #[error("Transport error: {reason}")]
    Transport {
        /// HTTP status code, when the server answered at all
        status: Option<u16>,
        reason: String,
    },

    /// The completion succeeded but its payload does not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The request cannot be sent as-is
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request was superseded or cancelled before it finished
    #[error("Request was cancelled")]
    Cancelled,
}

impl RecommendError {
    /// Short name of the error kind, used when logging failures.
    pub fn kind(&self) -> &'static str {
        match self {
            RecommendError::Configuration(_) | RecommendError::ConfigLoad(_) => "configuration",
            RecommendError::Transport { .. } => "transport",
            RecommendError::MalformedResponse(_) => "malformed_response",
            RecommendError::InvalidRequest(_) => "invalid_request",
            RecommendError::Cancelled => "cancelled",
        }
    }

    /// The actionable text to surface to an end user after a failed generation.
    pub fn user_message(&self) -> &'static str {
        GENERATION_FAILED_MESSAGE
    }
}

impl From<reqwest::Error> for RecommendError {
    fn from(err: reqwest::Error) -> Self {
        RecommendError::Transport {
            status: err.status().map(|s| s.as_u16()),
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            RecommendError::Configuration("no key".to_string()).kind(),
            "configuration"
        );
        assert_eq!(
            RecommendError::Transport {
                status: Some(500),
                reason: "boom".to_string()
            }
            .kind(),
            "transport"
        );
        assert_eq!(
            RecommendError::MalformedResponse("bad".to_string()).kind(),
            "malformed_response"
        );
        assert_eq!(RecommendError::Cancelled.kind(), "cancelled");
    }

    #[test]
    fn test_user_message_is_the_same_for_every_kind() {
        let errors = [
            RecommendError::Configuration("no key".to_string()),
            RecommendError::MalformedResponse("bad".to_string()),
            RecommendError::Transport {
                status: None,
                reason: "timed out".to_string(),
            },
        ];
        for err in errors {
            assert_eq!(err.user_message(), GENERATION_FAILED_MESSAGE);
        }
    }

    #[test]
    fn test_transport_display_carries_reason() {
        let err = RecommendError::Transport {
            status: Some(503),
            reason: "OpenAI API error: 503 Service Unavailable".to_string(),
        };
        assert!(err.to_string().contains("503 Service Unavailable"));
    }
}
