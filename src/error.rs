//! Error types for `todo_rpc`.

/// Errors that can occur while serving or calling todo procedures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input was rejected before reaching a handler.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The targeted todo does not exist.
    #[error("Todo with id {id} not found")]
    NotFound {
        /// The identifier that matched no record.
        id: i64,
    },

    /// No procedure is registered under this name.
    #[error("Unknown procedure: {0}")]
    UnknownProcedure(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON encoding error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A `SQLite` database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A template error occurred.
    #[error("Template error: {0}")]
    Template(String),

    /// Logging could not be set up.
    #[error("Logging error: {0}")]
    Logging(String),
}

impl Error {
    /// Whether this error was raised by input validation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether this error reports a missing todo.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
