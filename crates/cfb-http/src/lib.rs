//! HTTP adapter (axum).
//!
//! Serves the Chatfuel JSON plugin endpoints. Every handler builds a
//! `cfb_core::chatfuel::Response` and returns its finalized payload.

pub mod error;
pub mod handlers;
pub mod router;

pub use error::AppError;
pub use router::{build_router, serve, AppState};
