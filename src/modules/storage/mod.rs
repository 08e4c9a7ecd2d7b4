//! Storage module for report photos
//!
//! Photos are the only artifacts written to durable storage; report records
//! themselves live in process memory.

mod local_storage;

pub use local_storage::{content_type_for, LocalPhotoStorage, StoredPhoto};
