//! Handler-boundary error conversion.
//!
//! # Responsibility
//! - Map store failures onto the wire status/body contract.
//! - Keep persistence details out of client-visible error text.
//!
//! # Invariants
//! - Validation failures become 400 with the validation message.
//! - Every other failure becomes 500 with a generic body; the detail is
//!   logged server-side only.
//! - No handler error propagates as a process crash.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use quicknote_core::{NoteValidationError, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// JSON error envelope: `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Request-handling failure.
#[derive(Debug)]
pub enum ApiError {
    Validation(NoteValidationError),
    Store(StoreError),
    LockPoisoned,
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::LockPoisoned => write!(f, "database connection lock poisoned"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::LockPoisoned => None,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(err) => Self::Validation(err),
            other => Self::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Store(_) | Self::LockPoisoned => {
                error!("event=request_failed module=http status=error error={self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal storage error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
