//! Note store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the create/list/update/delete persistence API for notes.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Create paths validate the draft before any SQL mutation.
//! - Update applies only the fields present in the patch.
//! - Update/delete against an unknown id succeed as explicit no-ops,
//!   reported via [`WriteOutcome::NoopMissing`] rather than an error.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::note::{Note, NoteDraft, NoteId, NotePatch, NoteValidationError};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    is_completed,
    created_at
FROM notes";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for note persistence operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(NoteValidationError),
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Result reported by update/delete writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A matching row was changed (or removed).
    Applied,
    /// No row matched the id; the write succeeded without touching data.
    NoopMissing,
}

impl WriteOutcome {
    fn from_changed_rows(changed: usize) -> Self {
        if changed == 0 {
            Self::NoopMissing
        } else {
            Self::Applied
        }
    }
}

/// Store interface for note CRUD operations.
pub trait NoteStore {
    /// Validates and persists a new note, returning it with generated
    /// `id` and `created_at`.
    fn create(&self, draft: &NoteDraft) -> StoreResult<Note>;
    /// Returns all notes in insertion order.
    fn list(&self) -> StoreResult<Vec<Note>>;
    /// Overwrites the fields present in `patch` on the note with `id`.
    fn update(&self, id: NoteId, patch: &NotePatch) -> StoreResult<WriteOutcome>;
    /// Hard-deletes the note with `id` if present.
    fn delete(&self, id: NoteId) -> StoreResult<WriteOutcome>;
}

/// SQLite-backed note store.
pub struct SqliteNoteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    ///
    /// Rejects connections whose schema version or `notes` table shape does
    /// not match what this binary expects.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteStore for SqliteNoteStore<'_> {
    fn create(&self, draft: &NoteDraft) -> StoreResult<Note> {
        draft.validate()?;

        let note = Note::new(draft.title.clone(), draft.content.clone());
        self.conn.execute(
            "INSERT INTO notes (id, title, content, is_completed, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                note.id.to_string(),
                note.title.as_str(),
                note.content.as_str(),
                bool_to_int(note.is_completed),
                note.created_at.to_rfc3339(),
            ],
        )?;

        Ok(note)
    }

    fn list(&self) -> StoreResult<Vec<Note>> {
        // No ordering is promised by the contract; created_at + id keeps
        // the practical insertion order deterministic.
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY created_at ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();

        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }

    fn update(&self, id: NoteId, patch: &NotePatch) -> StoreResult<WriteOutcome> {
        if patch.is_empty() {
            // Nothing to write; still report whether the row was there.
            return Ok(if note_exists(self.conn, id)? {
                WriteOutcome::Applied
            } else {
                WriteOutcome::NoopMissing
            });
        }

        let mut assignments: Vec<&str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = patch.title.as_ref() {
            assignments.push("title = ?");
            bind_values.push(Value::Text(title.clone()));
        }
        if let Some(content) = patch.content.as_ref() {
            assignments.push("content = ?");
            bind_values.push(Value::Text(content.clone()));
        }
        if let Some(is_completed) = patch.is_completed {
            assignments.push("is_completed = ?");
            bind_values.push(Value::Integer(bool_to_int(is_completed)));
        }

        let sql = format!(
            "UPDATE notes SET {} WHERE id = ?;",
            assignments.join(", ")
        );
        bind_values.push(Value::Text(id.to_string()));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        Ok(WriteOutcome::from_changed_rows(changed))
    }

    fn delete(&self, id: NoteId) -> StoreResult<WriteOutcome> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id.to_string()])?;
        Ok(WriteOutcome::from_changed_rows(changed))
    }
}

fn parse_note_row(row: &Row<'_>) -> StoreResult<Note> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        StoreError::InvalidData(format!("invalid uuid value `{id_text}` in notes.id"))
    })?;

    let created_at_text: String = row.get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_text)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|_| {
            StoreError::InvalidData(format!(
                "invalid timestamp `{created_at_text}` in notes.created_at"
            ))
        })?;

    let is_completed = match row.get::<_, i64>("is_completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid is_completed value `{other}` in notes.is_completed"
            )));
        }
    };

    Ok(Note {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
        is_completed,
        created_at,
    })
}

fn note_exists(conn: &Connection, id: NoteId) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM notes WHERE id = ?1);",
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "notes")? {
        return Err(StoreError::MissingRequiredTable("notes"));
    }

    for column in ["id", "title", "content", "is_completed", "created_at"] {
        if !table_has_column(conn, "notes", column)? {
            return Err(StoreError::MissingRequiredColumn {
                table: "notes",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
