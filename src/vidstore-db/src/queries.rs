//! Database query functions

use rusqlite::{params, Connection, ErrorCode, Row};
use tracing::debug;

use crate::error::{DatabaseError, Result};
use crate::schema::*;

/// Get video by ID
pub fn get_video(conn: &Connection, id: i64) -> Result<Option<Video>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, views, likes FROM videos WHERE id = ?1",
    )?;

    let video = stmt.query_row(params![id], row_to_video);

    match video {
        Ok(v) => Ok(Some(v)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Insert a new video with its caller-supplied ID
///
/// Uniqueness is enforced by the primary key, so a concurrent insert of the
/// same ID fails here rather than in a separate existence check.
pub fn insert_video(conn: &Connection, video: &Video) -> Result<()> {
    debug!(id = video.id, "inserting video");

    let result = conn.execute(
        "INSERT INTO videos (id, name, views, likes) VALUES (?1, ?2, ?3, ?4)",
        params![video.id, video.name, video.views, video.likes],
    );

    match result {
        Ok(_) => Ok(()),
        Err(e) if is_primary_key_violation(&e) => Err(DatabaseError::Conflict(video.id)),
        Err(e) => Err(e.into()),
    }
}

/// Apply the supplied fields of `patch` and return the updated row
pub fn update_video(conn: &Connection, id: i64, patch: &VideoPatch) -> Result<Video> {
    debug!(id, ?patch, "updating video");

    let mut stmt = conn.prepare_cached(
        r#"UPDATE videos SET
           name = COALESCE(?2, name),
           views = COALESCE(?3, views),
           likes = COALESCE(?4, likes)
           WHERE id = ?1
           RETURNING id, name, views, likes"#,
    )?;

    let video = stmt.query_row(
        params![id, patch.name, patch.views, patch.likes],
        row_to_video,
    );

    match video {
        Ok(v) => Ok(v),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(DatabaseError::NotFound(id)),
        Err(e) => Err(e.into()),
    }
}

/// Delete video by ID
pub fn delete_video(conn: &Connection, id: i64) -> Result<()> {
    debug!(id, "deleting video");

    let deleted = conn.execute("DELETE FROM videos WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound(id));
    }

    Ok(())
}

/// Get total video count
pub fn get_video_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM videos", [], |row| row.get(0))?;
    Ok(count)
}

// Helper functions

fn row_to_video(row: &Row) -> rusqlite::Result<Video> {
    Ok(Video {
        id: row.get(0)?,
        name: row.get(1)?,
        views: row.get(2)?,
        likes: row.get(3)?,
    })
}

fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    fn video(id: i64, name: &str, views: i64, likes: i64) -> Video {
        Video { id, name: name.to_string(), views, likes }
    }

    #[test]
    fn test_insert_then_get() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();

        insert_video(conn, &video(5, "A", 2, 1)).unwrap();

        assert_eq!(get_video(conn, 5).unwrap(), Some(video(5, "A", 2, 1)));
        assert_eq!(get_video(conn, 6).unwrap(), None);
    }

    #[test]
    fn test_duplicate_insert_conflicts() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();

        insert_video(conn, &video(5, "first", 1, 1)).unwrap();
        let err = insert_video(conn, &video(5, "second", 9, 9)).unwrap_err();

        assert!(matches!(err, DatabaseError::Conflict(5)));
        assert_eq!(get_video(conn, 5).unwrap(), Some(video(5, "first", 1, 1)));
        assert_eq!(get_video_count(conn).unwrap(), 1);
    }

    #[test]
    fn test_update_is_sparse() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        insert_video(conn, &video(1, "clip", 100, 3)).unwrap();

        let patch = VideoPatch { likes: Some(10), ..Default::default() };
        let updated = update_video(conn, 1, &patch).unwrap();

        assert_eq!(updated, video(1, "clip", 100, 10));
        assert_eq!(get_video(conn, 1).unwrap(), Some(updated));
    }

    #[test]
    fn test_update_accepts_zero() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        insert_video(conn, &video(1, "clip", 100, 3)).unwrap();

        let patch = VideoPatch { views: Some(0), likes: Some(0), ..Default::default() };
        let updated = update_video(conn, 1, &patch).unwrap();

        assert_eq!(updated, video(1, "clip", 0, 0));
    }

    #[test]
    fn test_empty_patch_returns_current_row() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        insert_video(conn, &video(3, "same", 4, 5)).unwrap();

        let patch = VideoPatch::default();
        assert!(patch.is_empty());
        assert_eq!(update_video(conn, 3, &patch).unwrap(), video(3, "same", 4, 5));
    }

    #[test]
    fn test_update_missing_row() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();

        let patch = VideoPatch { name: Some("x".into()), ..Default::default() };
        let err = update_video(conn, 99, &patch).unwrap_err();

        assert!(matches!(err, DatabaseError::NotFound(99)));
        assert_eq!(get_video_count(conn).unwrap(), 0);
    }

    #[test]
    fn test_delete() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        insert_video(conn, &video(7, "gone", 0, 0)).unwrap();

        delete_video(conn, 7).unwrap();
        assert_eq!(get_video(conn, 7).unwrap(), None);

        let err = delete_video(conn, 7).unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(7)));
    }
}
