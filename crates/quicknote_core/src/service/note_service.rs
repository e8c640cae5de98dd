//! Note use-case service.
//!
//! # Responsibility
//! - Provide the note create/list/update/delete API used by the HTTP layer.
//! - Emit structured per-operation diagnostic events.
//!
//! # Invariants
//! - The service adds no semantics on top of the store contract: validation
//!   happens in the store, no-op writes stay no-op successes here.

use crate::model::note::{Note, NoteDraft, NoteId, NotePatch};
use crate::store::note_store::{NoteStore, StoreResult, WriteOutcome};
use log::{debug, info, warn};

/// Note service facade over store implementations.
pub struct NoteService<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> NoteService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and persists one note.
    pub fn create_note(&self, draft: &NoteDraft) -> StoreResult<Note> {
        match self.store.create(draft) {
            Ok(note) => {
                info!(
                    "event=note_create module=service status=ok id={}",
                    note.id
                );
                Ok(note)
            }
            Err(err) => {
                warn!("event=note_create module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Lists every stored note.
    pub fn list_notes(&self) -> StoreResult<Vec<Note>> {
        let notes = self.store.list()?;
        debug!(
            "event=note_list module=service status=ok count={}",
            notes.len()
        );
        Ok(notes)
    }

    /// Applies the provided patch fields to one note.
    pub fn update_note(&self, id: NoteId, patch: &NotePatch) -> StoreResult<WriteOutcome> {
        let outcome = self.store.update(id, patch)?;
        if outcome == WriteOutcome::NoopMissing {
            debug!("event=note_update module=service status=noop id={id}");
        } else {
            info!("event=note_update module=service status=ok id={id}");
        }
        Ok(outcome)
    }

    /// Removes one note if present.
    pub fn delete_note(&self, id: NoteId) -> StoreResult<WriteOutcome> {
        let outcome = self.store.delete(id)?;
        if outcome == WriteOutcome::NoopMissing {
            debug!("event=note_delete module=service status=noop id={id}");
        } else {
            info!("event=note_delete module=service status=ok id={id}");
        }
        Ok(outcome)
    }
}
