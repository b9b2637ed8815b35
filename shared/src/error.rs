//! Error types for the calendar service.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Client-facing text for failures whose details must stay server-side.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Errors that can occur while serving calendar requests.
#[derive(Error, Debug)]
pub enum Error {
    /// Request input could not be parsed or failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// A singular lookup matched no rows
    #[error("Not found: {0}")]
    NotFound(String),

    /// The route exists but does not accept this method
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// A store call did not finish within its budget
    #[error("Deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// AWS SDK error
    #[error("AWS error: {0}")]
    Aws(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Response could not be assembled
    #[error("HTTP error: {0}")]
    Http(#[from] lambda_http::http::Error),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::NotFound(_) => 404,
            Error::MethodNotAllowed(_) => 405,
            Error::DeadlineExceeded(_) => 504,
            _ => 500,
        }
    }

    /// Message that is safe to return to clients.
    ///
    /// Driver, AWS and serialization failures collapse into
    /// [`INTERNAL_ERROR_MESSAGE`]; their details only reach the logs.
    pub fn public_message(&self) -> String {
        match self {
            Error::Validation(message)
            | Error::NotFound(message)
            | Error::MethodNotAllowed(message) => message.clone(),
            Error::DeadlineExceeded(_) => "request deadline exceeded".to_string(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        Error::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::Validation("bad".into()).status_code(), 400);
        assert_eq!(Error::NotFound("event 7".into()).status_code(), 404);
        assert_eq!(Error::MethodNotAllowed("GET".into()).status_code(), 405);
        assert_eq!(Error::DeadlineExceeded(Duration::from_secs(1)).status_code(), 504);
        assert_eq!(Error::Database(sqlx::Error::PoolTimedOut).status_code(), 500);
        assert_eq!(Error::Config("missing".into()).status_code(), 500);
    }

    #[test]
    fn test_driver_errors_are_not_leaked() {
        let error = Error::Database(sqlx::Error::Protocol("relation \"events\" does not exist".into()));
        assert_eq!(error.public_message(), INTERNAL_ERROR_MESSAGE);
        assert!(error.to_string().contains("relation"));
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let error = Error::Validation("date must use the YYYY-MM-DD format".into());
        assert_eq!(error.public_message(), "date must use the YYYY-MM-DD format");
    }
}
