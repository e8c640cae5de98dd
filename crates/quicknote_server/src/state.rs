//! Shared request state: one SQLite connection behind a lock.
//!
//! # Invariants
//! - Each request holds the connection lock for the duration of its store
//!   work, serializing writes per the single-writer model.

use crate::error::ApiError;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle given to every handler via axum state.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps an opened, migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Acquires the connection for one request's store work.
    pub fn lock(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.conn.lock().map_err(|_| ApiError::LockPoisoned)
    }
}
