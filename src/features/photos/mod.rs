//! Retrieval of stored report photos by their public reference.

pub mod handlers;
pub mod routes;

pub use routes::routes;
