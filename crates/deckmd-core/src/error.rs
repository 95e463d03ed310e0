//! Error types module
//!
//! All failures are unified under the `AppError` enum. Every failure is
//! terminal for its request; there are no retries anywhere in the service.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like resource limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "INVALID_INPUT")
    fn error_code(&self) -> &'static str;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;

    /// Client-facing message
    fn client_message(&self) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Error during conversion: {0}")]
    Conversion(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_) => 400,
            AppError::Conversion(_) => 500,
            AppError::Internal(_) => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Conversion(_) => "CONVERSION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_) => LogLevel::Debug,
            AppError::Conversion(_) | AppError::Internal(_) => LogLevel::Error,
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}
