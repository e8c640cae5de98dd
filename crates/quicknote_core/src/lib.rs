//! Core domain logic for QuickNote.
//! This crate is the single source of truth for note lifecycle invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteDraft, NoteId, NotePatch, NoteValidationError};
pub use service::note_service::NoteService;
pub use store::note_store::{NoteStore, SqliteNoteStore, StoreError, StoreResult, WriteOutcome};

/// Minimal health-check API surfaced by the HTTP layer.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
