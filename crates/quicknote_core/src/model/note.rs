//! Note domain model and wire payloads.
//!
//! # Responsibility
//! - Define the canonical note record and its creation defaults.
//! - Define the create/update payload shapes shared by server and client.
//! - Enforce the non-blank `title`/`content` rule in one place.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `created_at` is assigned once at creation and never rewritten.
//! - `is_completed` is an orthogonal flag; edits to text never imply it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every persisted note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Canonical persisted note record.
///
/// Serialized field names follow the wire contract
/// (`{id, title, content, isCompleted, createdAt}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable global ID used for addressing and client reconciliation.
    pub id: NoteId,
    /// Non-blank display title.
    pub title: String,
    /// Free-form body text.
    pub content: String,
    /// Completion flag, toggled independently of text edits.
    pub is_completed: bool,
    /// Creation timestamp, RFC 3339 over the wire.
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Creates a new note with a generated stable ID and creation timestamp.
    ///
    /// # Invariants
    /// - `is_completed` starts as `false`.
    /// - Field text is stored exactly as provided (no trimming).
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            is_completed: false,
            created_at: Utc::now(),
        }
    }
}

/// Creation payload: both fields required and non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Rejects drafts whose trimmed `title` or `content` is empty.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::BlankTitle);
        }
        if self.content.trim().is_empty() {
            return Err(NoteValidationError::BlankContent);
        }
        Ok(())
    }
}

/// Update payload with field-provided-overwrites semantics.
///
/// A field left as `None` is omitted from the wire body and leaves the
/// stored column untouched; a `Some` value overwrites it. There is no merge
/// logic beyond that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl NotePatch {
    /// Returns whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.is_completed.is_none()
    }
}

/// Validation failure for required note fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// `title` is missing or blank after trimming.
    BlankTitle,
    /// `content` is missing or blank after trimming.
    BlankContent,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::BlankContent => write!(f, "content must not be blank"),
        }
    }
}

impl Error for NoteValidationError {}
