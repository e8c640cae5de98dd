//! Blocking HTTP implementation of [`NotesApi`].
//!
//! Request/response only: no retry, no cancellation, no caching. A failed
//! call is returned to the caller and leaves nothing behind.

use crate::api::{ApiError, ApiResult, NotesApi};
use quicknote_core::{Note, NoteDraft, NoteId, NotePatch};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for a notes service rooted at `base_url`.
pub struct HttpNotesApi {
    base_url: String,
    client: Client,
}

impl HttpNotesApi {
    /// Creates a client for the given base URL (trailing slashes ignored).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: Client::new(),
        }
    }

    fn notes_url(&self) -> String {
        format!("{}/api/notes", self.base_url)
    }

    fn note_url(&self, id: NoteId) -> String {
        format!("{}/api/notes/{id}", self.base_url)
    }
}

impl NotesApi for HttpNotesApi {
    fn ping(&self) -> ApiResult<String> {
        let url = format!("{}/api/ping", self.base_url);
        let response = check_status(self.client.get(url).send()?)?;
        let body: MessageBody = decode(response)?;
        Ok(body.message)
    }

    fn list_notes(&self) -> ApiResult<Vec<Note>> {
        let response = check_status(self.client.get(self.notes_url()).send()?)?;
        decode(response)
    }

    fn create_note(&self, draft: &NoteDraft) -> ApiResult<Note> {
        let response = check_status(self.client.post(self.notes_url()).json(draft).send()?)?;
        decode(response)
    }

    fn update_note(&self, id: NoteId, patch: &NotePatch) -> ApiResult<()> {
        check_status(self.client.put(self.note_url(id)).json(patch).send()?)?;
        Ok(())
    }

    fn delete_note(&self, id: NoteId) -> ApiResult<()> {
        check_status(self.client.delete(self.note_url(id)).send()?)?;
        Ok(())
    }
}

fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .map(|body| body.error)
        .unwrap_or_else(|_| status.to_string());
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

fn decode<T: serde::de::DeserializeOwned>(response: Response) -> ApiResult<T> {
    response
        .json()
        .map_err(|err| ApiError::Decode(err.to_string()))
}
