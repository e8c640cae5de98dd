//! REST routes and handlers for the notes service.
//!
//! # Responsibility
//! - Expose the `/api` wire contract over the note store.
//! - Validate create payloads before any store call.
//!
//! # Invariants
//! - Update/delete against an unknown or unparseable id succeed silently.
//! - Create validation rejects missing fields the same way as blank ones.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use log::debug;
use quicknote_core::{
    ping as core_ping, Note, NoteDraft, NoteId, NotePatch, NoteService, SqliteNoteStore,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// JSON message envelope: `{"message": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Create payload with optional fields so a missing key surfaces as a 400
/// validation error instead of a body-deserialization rejection.
#[derive(Debug, Deserialize)]
struct CreateNoteBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Builds the full API router over the given state.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/ping", get(ping))
        .route("/api/notes", get(list_notes).post(create_note))
        .route("/api/notes/:id", put(update_note).delete(delete_note))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn ping() -> Json<MessageBody> {
    Json(MessageBody {
        message: core_ping().to_string(),
    })
}

async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    let conn = state.lock()?;
    let service = NoteService::new(SqliteNoteStore::try_new(&conn)?);
    let notes = service.list_notes()?;
    Ok(Json(notes))
}

async fn create_note(
    State(state): State<AppState>,
    Json(body): Json<CreateNoteBody>,
) -> Result<Json<Note>, ApiError> {
    let draft = NoteDraft::new(
        body.title.unwrap_or_default(),
        body.content.unwrap_or_default(),
    );
    // Reject here so an invalid payload never reaches the store.
    draft.validate().map_err(ApiError::Validation)?;

    let conn = state.lock()?;
    let service = NoteService::new(SqliteNoteStore::try_new(&conn)?);
    let note = service.create_note(&draft)?;
    Ok(Json(note))
}

async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<NotePatch>,
) -> Result<Json<MessageBody>, ApiError> {
    match parse_note_id(&id) {
        Some(id) => {
            let conn = state.lock()?;
            let service = NoteService::new(SqliteNoteStore::try_new(&conn)?);
            service.update_note(id, &patch)?;
        }
        None => debug!("event=note_update module=http status=noop reason=unparseable_id"),
    }

    Ok(Json(MessageBody {
        message: "note updated".to_string(),
    }))
}

async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match parse_note_id(&id) {
        Some(id) => {
            let conn = state.lock()?;
            let service = NoteService::new(SqliteNoteStore::try_new(&conn)?);
            service.delete_note(id)?;
        }
        None => debug!("event=note_delete module=http status=noop reason=unparseable_id"),
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Ids that do not parse are treated as unknown ids, keeping the
/// silent-no-op contract for any id-shaped path segment.
fn parse_note_id(raw: &str) -> Option<NoteId> {
    Uuid::parse_str(raw).ok()
}
