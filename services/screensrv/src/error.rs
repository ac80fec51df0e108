//! Error handling for the Screen Position Service
//!
//! Frame, parse and link failures have their own types next to the code that
//! produces them; they are absorbed by the link loop. `ScreenSrvError` covers
//! the startup path (configuration, binding the API) where failing is the
//! right answer.

use thiserror::Error;

use crate::transport::LinkError;

/// Screen Position Service error type
#[derive(Error, Debug, Clone)]
pub enum ScreenSrvError {
    /// Configuration file missing fields, unreadable or inconsistent
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Input/Output operation errors
    #[error("IO error: {0}")]
    IoError(String),

    /// Serial link errors surfaced outside the reconnect loop
    #[error("Link error: {0}")]
    LinkError(#[from] LinkError),

    /// HTTP API setup errors
    #[error("API error: {0}")]
    ApiError(String),
}

/// Result type alias for the Screen Position Service
pub type Result<T> = std::result::Result<T, ScreenSrvError>;

impl ScreenSrvError {
    pub fn config(msg: impl Into<String>) -> Self {
        ScreenSrvError::ConfigError(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        ScreenSrvError::IoError(msg.into())
    }

    pub fn api(msg: impl Into<String>) -> Self {
        ScreenSrvError::ApiError(msg.into())
    }
}

impl From<std::io::Error> for ScreenSrvError {
    fn from(err: std::io::Error) -> Self {
        ScreenSrvError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ScreenSrvError {
    fn from(err: serde_json::Error) -> Self {
        ScreenSrvError::ConfigError(format!("JSON: {}", err))
    }
}

impl From<figment::Error> for ScreenSrvError {
    fn from(err: figment::Error) -> Self {
        ScreenSrvError::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ScreenSrvError::config("maxPosition must exceed minPosition").to_string(),
            "Configuration error: maxPosition must exceed minPosition"
        );
        assert_eq!(
            ScreenSrvError::from(LinkError::NotOpen).to_string(),
            "Link error: Serial port not open"
        );
    }

    #[test]
    fn test_io_conversion() {
        let err: ScreenSrvError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "config.json").into();
        assert!(matches!(err, ScreenSrvError::IoError(_)));
    }
}
