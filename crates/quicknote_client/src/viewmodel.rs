//! Client view-model: cached snapshot plus UI-intent state.
//!
//! # Responsibility
//! - Mirror the server's note list after every mutation via full refetch.
//! - Hold the two-mode form state (create vs edit) and search/filter intent.
//!
//! # Invariants
//! - `visible_notes` is a pure projection; it never mutates the snapshot.
//! - A failed call leaves all local state unchanged.
//! - `editing_id` is cleared only by a successful submit or `cancel_edit`.

use crate::api::{ApiError, ApiResult, NotesApi};
use log::warn;
use quicknote_core::{Note, NoteDraft, NoteId, NotePatch, NoteValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Completion-status filter applied to the visible list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    fn allows(self, note: &Note) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !note.is_completed,
            Self::Completed => note.is_completed,
        }
    }
}

/// Submit failure: local validation or the network call itself.
#[derive(Debug)]
pub enum SubmitError {
    Validation(NoteValidationError),
    Api(ApiError),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Api(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Api(err) => Some(err),
        }
    }
}

/// View-model over an API implementation.
///
/// The snapshot in `notes` is transient and disposable: every mutating call
/// triggers a full refetch instead of patching the cache in place.
pub struct NotesViewModel<A: NotesApi> {
    api: A,
    notes: Vec<Note>,
    editing_id: Option<NoteId>,
    /// Draft title bound to the form.
    pub title: String,
    /// Draft content bound to the form.
    pub content: String,
    /// Case-insensitive substring match against note titles.
    pub search_query: String,
    /// Completion filter intersected with the search match.
    pub filter: StatusFilter,
}

impl<A: NotesApi> NotesViewModel<A> {
    /// Creates an empty view-model over the given API client.
    pub fn new(api: A) -> Self {
        Self {
            api,
            notes: Vec::new(),
            editing_id: None,
            title: String::new(),
            content: String::new(),
            search_query: String::new(),
            filter: StatusFilter::All,
        }
    }

    /// The underlying API client.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Last fetched snapshot.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Id of the note currently in edit mode, if any.
    pub fn editing_id(&self) -> Option<NoteId> {
        self.editing_id
    }

    /// Whether the form is in edit mode rather than create mode.
    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Replaces the local snapshot with the server list.
    ///
    /// Last write wins: the fetched list supersedes local state with no
    /// merging. On failure the previous snapshot stays.
    pub fn refresh(&mut self) -> ApiResult<()> {
        match self.api.list_notes() {
            Ok(notes) => {
                self.notes = notes;
                Ok(())
            }
            Err(err) => {
                warn!("event=notes_refresh module=viewmodel status=error error={err}");
                Err(err)
            }
        }
    }

    /// Saves the draft: update when in edit mode, create otherwise.
    ///
    /// Blank fields are rejected before any network call. On success the
    /// draft is cleared and the snapshot refreshed.
    pub fn submit(&mut self) -> Result<(), SubmitError> {
        let draft = NoteDraft::new(self.title.clone(), self.content.clone());
        draft.validate().map_err(SubmitError::Validation)?;

        if let Some(id) = self.editing_id {
            // The edit form never touches the completion flag.
            let patch = NotePatch {
                title: Some(draft.title),
                content: Some(draft.content),
                is_completed: None,
            };
            self.api.update_note(id, &patch).map_err(SubmitError::Api)?;
            self.editing_id = None;
        } else {
            self.api.create_note(&draft).map_err(SubmitError::Api)?;
        }

        self.title.clear();
        self.content.clear();
        // The save itself succeeded; a failed refetch is logged by refresh
        // and leaves the snapshot stale until the next one.
        let _ = self.refresh();
        Ok(())
    }

    /// Loads a note into the form and enters edit mode.
    pub fn start_edit(&mut self, note: &Note) {
        self.title = note.title.clone();
        self.content = note.content.clone();
        self.editing_id = Some(note.id);
    }

    /// Leaves edit mode and clears the draft without any network call.
    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
        self.title.clear();
        self.content.clear();
    }

    /// Inverts a note's completion flag, keeping its text as-is.
    pub fn toggle_completed(&mut self, note: &Note) -> ApiResult<()> {
        let patch = NotePatch {
            title: Some(note.title.clone()),
            content: Some(note.content.clone()),
            is_completed: Some(!note.is_completed),
        };
        self.api.update_note(note.id, &patch)?;
        let _ = self.refresh();
        Ok(())
    }

    /// Deletes a note and refreshes the snapshot.
    pub fn remove(&mut self, id: NoteId) -> ApiResult<()> {
        self.api.delete_note(id)?;
        let _ = self.refresh();
        Ok(())
    }

    /// Derived view: search match intersected with the status filter.
    ///
    /// Purely a projection over the snapshot; recomputed on every read.
    pub fn visible_notes(&self) -> Vec<&Note> {
        let query = self.search_query.to_lowercase();
        self.notes
            .iter()
            .filter(|note| note.title.to_lowercase().contains(&query))
            .filter(|note| self.filter.allows(note))
            .collect()
    }
}
