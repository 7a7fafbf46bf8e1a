//! Shared application state

use std::sync::{Arc, Mutex, MutexGuard};
use rusqlite::Connection;

use crate::ApiError;

/// Shared state across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection (wrapped for thread safety)
    pub db: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Lock the connection for the duration of one store operation
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal(anyhow::anyhow!("database lock poisoned")))
    }
}
