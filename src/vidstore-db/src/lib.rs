//! vidstore-db - Row store for Vidstore
//!
//! Keeps video records in a single SQLite table.

mod schema;
mod migrations;
mod queries;
mod error;

pub use schema::*;
pub use queries::*;
pub use error::{DatabaseError, Result};
pub use migrations::SCHEMA_VERSION;

use rusqlite::Connection;
use std::path::Path;
use tracing::{info, debug};

/// Database connection wrapper with initialization
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create the database file at the given path and apply the schema
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("initializing database at {:?}", path);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        configure(&conn)?;
        migrations::run_all(&conn)?;

        Ok(Self { conn })
    }

    /// Open an existing, initialized database
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("opening database at {:?}", path);

        let conn = Connection::open(path)?;
        configure(&conn)?;

        let version = migrations::get_schema_version(&conn)?;
        if version < SCHEMA_VERSION {
            return Err(DatabaseError::Migration(format!(
                "schema is at v{}, expected v{} (database not initialized?)",
                version, SCHEMA_VERSION
            )));
        }

        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        debug!("opening in-memory database");
        let conn = Connection::open_in_memory()?;
        migrations::run_all(&conn)?;

        Ok(Self { conn })
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consume the wrapper, handing out the connection
    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

fn configure(conn: &Connection) -> Result<()> {
    // Enable WAL mode for concurrent reads
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    conn.execute_batch("PRAGMA synchronous=NORMAL;")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.connection().is_autocommit());
        assert_eq!(get_video_count(db.connection()).unwrap(), 0);
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("database.db");

        {
            let db = Database::create(&path).unwrap();
            let video = Video { id: 1, name: "intro".into(), views: 10, likes: 2 };
            insert_video(db.connection(), &video).unwrap();
        }

        let db = Database::open(&path).unwrap();
        let video = get_video(db.connection(), 1).unwrap().unwrap();
        assert_eq!(video.name, "intro");
        assert_eq!(video.views, 10);
        assert_eq!(video.likes, 2);
    }

    #[test]
    fn test_open_uninitialized_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.db");

        let result = Database::open(&path);
        assert!(matches!(result, Err(DatabaseError::Migration(_))));
    }
}
