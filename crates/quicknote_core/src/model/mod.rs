//! Domain model types shared by the store, HTTP layer and client.

pub mod note;
