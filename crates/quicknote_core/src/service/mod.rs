//! Use-case facades over the persistence layer.

pub mod note_service;
