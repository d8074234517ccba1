//! Error types for the board library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all board operations.
#[derive(Error, Debug)]
pub enum BoardError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Business-rule conflict: a new plan cannot be created while another is
    /// active
    #[error("An active plan already exists (ID {id})")]
    ActivePlanExists { id: u64 },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Task not found for the given ID
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: u64 },
    /// Task template not found for the given ID
    #[error("Template with ID {id} not found")]
    TemplateNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl BoardError {
    /// Creates a new database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.to_string(),
            source,
        }
    }

    /// Creates an input validation error for a field.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| BoardError::database_error(message, e))
    }
}

/// Specialized extension trait for configuration-related Results.
pub trait ConfigResultExt<T> {
    /// Map configuration errors with a message.
    fn config_context(self, message: &str) -> Result<T>;
}

impl<T, E> ConfigResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn config_context(self, message: &str) -> Result<T> {
        self.map_err(|e| BoardError::Configuration {
            message: format!("{message}: {e}"),
        })
    }
}

/// Result type alias for board operations
pub type Result<T> = std::result::Result<T, BoardError>;
