//! Repository Module
//!
//! Module-level async functions over sqlx executors. Functions take
//! `impl SqliteExecutor` so services can run them against the pool or
//! inside an open transaction — every mutating service operation runs in
//! exactly one transaction.

pub mod department;
pub mod dining_table;
pub mod guest_session;
pub mod menu;
pub mod order;
pub mod reservation;
pub mod settings;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A unique index rejected the write. The message names the columns
    /// involved (SQLite format: "UNIQUE constraint failed: table.column");
    /// services map these back to business errors via [`RepoError::violates`].
    #[error("Unique constraint violated: {0}")]
    Unique(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err
            && db.is_unique_violation()
        {
            return RepoError::Unique(db.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

impl RepoError {
    /// Whether this is a unique violation on the given column path
    /// (e.g. "guest_sessions.table_id").
    pub fn violates(&self, column: &str) -> bool {
        matches!(self, RepoError::Unique(msg) if msg.contains(column))
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
