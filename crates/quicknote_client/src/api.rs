//! Client API contract for the notes HTTP service.
//!
//! # Responsibility
//! - Define the transport-agnostic operations the view-model depends on.
//! - Define the client-side error taxonomy.
//!
//! # Invariants
//! - Implementations surface failures as values; no call retries or panics.

use quicknote_core::{Note, NoteDraft, NoteId, NotePatch};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ApiResult<T> = Result<T, ApiError>;

/// Client-side call failure, surfaced to the user as a generic alert.
#[derive(Debug)]
pub enum ApiError {
    /// Transport-level failure (server unreachable, connection dropped).
    Http(reqwest::Error),
    /// Server answered with a non-success status.
    Status { status: u16, message: String },
    /// Response body could not be decoded.
    Decode(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "request failed: {err}"),
            Self::Status { status, message } => {
                write!(f, "server returned {status}: {message}")
            }
            Self::Decode(message) => write!(f, "invalid response body: {message}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Status { .. } | Self::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Operations the view-model performs against the notes service.
pub trait NotesApi {
    /// Health probe; returns the server's message text.
    fn ping(&self) -> ApiResult<String>;
    /// Fetches the full note list.
    fn list_notes(&self) -> ApiResult<Vec<Note>>;
    /// Creates one note and returns the persisted record.
    fn create_note(&self, draft: &NoteDraft) -> ApiResult<Note>;
    /// Applies a patch to one note; unknown ids succeed silently.
    fn update_note(&self, id: NoteId, patch: &NotePatch) -> ApiResult<()>;
    /// Deletes one note; unknown ids succeed silently.
    fn delete_note(&self, id: NoteId) -> ApiResult<()>;
}
