//! Unified error types for the customer-tui application.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Customer data error: {0}")]
    Customer(#[from] CustomerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Errors raised while loading customer records
#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("Customer file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse customer file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Customer not found: {0}")]
    UnknownId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for customer data operations
pub type CustomerResult<T> = std::result::Result<T, CustomerError>;
