//! Error types for nodedb-pg

use nodedb_core::CoreError;
use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection settings could not be turned into a connection descriptor (D001)
    #[error("[D001] Invalid database config: {0}")]
    ConfigError(String),

    /// Database unreachable or credentials rejected (D002)
    #[error("[D002] Database connection failed: {0}")]
    ConnectionError(String),

    /// No migration set registered under the requested name (D003)
    #[error("[D003] Migration set not found with name: {0}")]
    MigrationSetNotFound(String),

    /// Migration execution error (D004)
    #[error("[D004] Migration failed: {0}")]
    MigrationError(String),

    /// Migration plan could not be computed (D005)
    #[error("[D005] Migration planning failed: {0}")]
    PlanError(String),

    /// Schema is out of date (D006)
    #[error("[D006] The component needs to run {pending} migrations before starting. DB only contains {applied} migrations")]
    PendingMigrations { pending: usize, applied: usize },

    /// Migration bookkeeping table could not be read (D007)
    #[error("[D007] Failed to read migration records: {0}")]
    RecordsError(String),

    /// Migration scripts could not be loaded from disk (D008)
    #[error("[D008] Failed to load migrations from '{path}': {message}")]
    SourceError { path: String, message: String },

    /// Driver error with preserved source chain (D009)
    #[error("[D009] PostgreSQL error")]
    Sqlx(#[source] sqlx::Error),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        DbError::Sqlx(err)
    }
}

impl From<CoreError> for DbError {
    fn from(err: CoreError) -> Self {
        DbError::ConfigError(err.to_string())
    }
}
