//! Client-side cache and UI-intent state for the notes service.
//! The view-model is deterministic and testable without a UI harness.

pub mod api;
pub mod http;
pub mod viewmodel;

pub use api::{ApiError, ApiResult, NotesApi};
pub use http::HttpNotesApi;
pub use viewmodel::{NotesViewModel, StatusFilter, SubmitError};
