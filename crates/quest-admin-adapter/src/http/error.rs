/*
[INPUT]:  Error sources (HTTP, API, serialization, auth)
[OUTPUT]: Structured error types with context
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
[UPDATE]: Dropped retry hints; nothing in the admin flow retries
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the quest admin adapter
#[derive(Error, Debug)]
pub enum QuestAdminError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// Authentication failed or no token configured
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Admin JWT is expired
    #[error("admin token expired, please sign in again")]
    TokenExpired,

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record does not exist
    #[error("{0} not found")]
    NotFound(String),
}

impl QuestAdminError {
    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            QuestAdminError::Authentication { .. } | QuestAdminError::TokenExpired
        )
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        QuestAdminError::Api {
            code: status.as_u16() as i32,
            message: message.into(),
        }
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, QuestAdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_auth_error() {
        assert!(QuestAdminError::TokenExpired.is_auth_error());
        assert!(
            QuestAdminError::Authentication {
                message: "missing token".to_string()
            }
            .is_auth_error()
        );
        assert!(!QuestAdminError::NotFound("quest 4".to_string()).is_auth_error());
    }

    #[test]
    fn test_api_error_creation() {
        let err = QuestAdminError::api_error(StatusCode::BAD_REQUEST, "invalid quest id");
        match err {
            QuestAdminError::Api { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "invalid quest id");
            }
            _ => panic!("Expected Api error variant"),
        }
    }

    #[test]
    fn test_error_display_names_the_record() {
        let err = QuestAdminError::NotFound("quest 12".to_string());
        assert_eq!(err.to_string(), "quest 12 not found");
    }
}
