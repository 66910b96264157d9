//! Error types for the account service

use thiserror::Error;

/// Main error type for the account service
#[derive(Error, Debug)]
pub enum AccountServiceError {
    /// Request body could not be decoded into an account
    #[error("Invalid account payload: {0}")]
    InvalidPayload(String),

    /// No account is stored under the requested id
    #[error("Account not found: {id}")]
    NotFound { id: String },
}

/// Configuration specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Parse error
    #[error("Configuration parse error: {0}")]
    ParseError(String),

    /// Validation error
    #[error("Configuration validation error: {field}: {message}")]
    ValidationError { field: String, message: String },
}

impl From<serde_json::Error> for AccountServiceError {
    fn from(err: serde_json::Error) -> Self {
        AccountServiceError::InvalidPayload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::ValidationError {
            field: "server.port".to_string(),
            message: "Server port cannot be 0".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Configuration validation error: server.port: Server port cannot be 0"
        );
    }

    #[test]
    fn test_decode_error_becomes_invalid_payload() {
        let decode_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AccountServiceError = decode_err.into();
        assert!(matches!(err, AccountServiceError::InvalidPayload(_)));
    }
}
