//! Backend communication.
//!
//! `types` holds the JSON wire shapes, `api` the configured HTTP client
//! that every backend call (including the guard's session check) goes
//! through.

pub mod api;
pub mod types;
