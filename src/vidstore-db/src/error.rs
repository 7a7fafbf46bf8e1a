//! Database error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("video {0} not found")]
    NotFound(i64),

    #[error("video {0} already exists")]
    Conflict(i64),
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
