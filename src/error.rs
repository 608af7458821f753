//! Error types for BunnyCDN operations

use thiserror::Error;

/// Errors that can occur while talking to BunnyCDN
#[derive(Debug, Error)]
pub enum BunnyError {
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Action '{action}' requires an id")]
    MissingId { action: &'static str },

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid remote path: {0}")]
    InvalidPath(String),
}

impl From<config::ConfigError> for BunnyError {
    fn from(err: config::ConfigError) -> Self {
        BunnyError::Config(err.to_string())
    }
}

impl BunnyError {
    /// HTTP status of the failed request, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            BunnyError::Api { status, .. } => Some(*status),
            BunnyError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the failure was rejected locally before any request was sent
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            BunnyError::UnknownAction(_)
                | BunnyError::MissingId { .. }
                | BunnyError::MissingField { .. }
                | BunnyError::Config(_)
                | BunnyError::InvalidUrl(_)
                | BunnyError::InvalidPath(_)
        )
    }
}

/// Result type for BunnyCDN operations
pub type BunnyResult<T> = Result<T, BunnyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status() {
        let err = BunnyError::Api {
            status: 404,
            body: r#"{"HttpCode":404,"Message":"Object Not Found"}"#.to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_local());
        assert!(err.to_string().contains("Object Not Found"));
    }

    #[test]
    fn test_local_errors_have_no_status() {
        let err = BunnyError::MissingId { action: "get" };
        assert_eq!(err.status(), None);
        assert!(err.is_local());
        assert_eq!(err.to_string(), "Action 'get' requires an id");
    }
}
