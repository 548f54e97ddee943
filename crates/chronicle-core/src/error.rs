//! Error types and exit codes for chronicle
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data/store error (missing store, corrupt record, etc.)

mod macros;

use thiserror::Error;

/// Exit codes for the chronicle CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for ChronicleError {
    fn from(err: rusqlite::Error) -> Self {
        ChronicleError::storage("query database", err)
    }
}

/// Errors that can occur during chronicle operations
#[derive(Error, Debug)]
pub enum ChronicleError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data/store errors (exit code 3)
    #[error("store not found at {path}")]
    StoreNotFound { path: String },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("storage failure during {operation}: {reason}")]
    Storage { operation: String, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl ChronicleError {
    /// Create an error for a failed storage operation
    pub fn storage(operation: &str, error: impl std::fmt::Display) -> Self {
        ChronicleError::Storage {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        ChronicleError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        ChronicleError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ChronicleError::UnknownFormat(_)
            | ChronicleError::UsageError(_)
            | ChronicleError::InvalidValue { .. } => ExitCode::Usage,

            ChronicleError::StoreNotFound { .. }
            | ChronicleError::NotFound { .. }
            | ChronicleError::Storage { .. } => ExitCode::Data,

            ChronicleError::Io(_)
            | ChronicleError::Json(_)
            | ChronicleError::Toml(_)
            | ChronicleError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            ChronicleError::UnknownFormat(_) => "unknown_format",
            ChronicleError::UsageError(_) => "usage_error",
            ChronicleError::InvalidValue { .. } => "invalid_value",
            ChronicleError::StoreNotFound { .. } => "store_not_found",
            ChronicleError::NotFound { .. } => "not_found",
            ChronicleError::Storage { .. } => "storage_failure",
            ChronicleError::Io(_) => "io_error",
            ChronicleError::Json(_) => "json_error",
            ChronicleError::Toml(_) => "toml_error",
            ChronicleError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for chronicle operations
pub type Result<T> = std::result::Result<T, ChronicleError>;
