//! Error types for the tracker_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for tracker_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Record has the wrong number of comma-separated fields
    #[error("malformed input: expected {expected} fields, found {found}")]
    MalformedInput { expected: usize, found: usize },

    /// Steps are missing, non-numeric or not positive
    #[error("invalid steps: {0}")]
    InvalidSteps(String),

    /// Duration is unparseable or not positive
    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    /// Training record without an activity label
    #[error("activity kind is empty")]
    EmptyActivityKind,

    /// Activity label is neither walking nor running
    #[error("unknown training type: {0:?}")]
    UnknownActivityKind(String),

    /// Profile weight or height is not positive
    #[error("invalid profile field {field}: {value}")]
    InvalidProfileField { field: &'static str, value: f64 },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
