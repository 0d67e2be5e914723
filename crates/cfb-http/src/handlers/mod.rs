//! Endpoint handlers.
//!
//! Each handler:
//! - reads the user's attributes from the query string
//! - builds a `Response` with the core builders
//! - returns the finalized payload (or a 422 if a builder rejected it)

use std::collections::HashMap;

use axum::Json;
use serde_json::Value;

use cfb_core::chatfuel::Response;

use crate::error::AppError;

pub mod attributes;
pub mod blocks;
pub mod cards;
pub mod media;
pub mod text;

/// User attributes Chatfuel appends to the plugin URL.
pub type Params = HashMap<String, String>;

pub type Reply = Result<Json<Value>, AppError>;

/// The user's first name, or a neutral greeting when Chatfuel did not send one.
pub fn first_name(params: &Params) -> &str {
    ["first name", "first_name"]
        .iter()
        .filter_map(|key| params.get(*key))
        .map(|name| name.trim())
        .find(|name| !name.is_empty())
        .unwrap_or("there")
}

pub fn reply(response: Response) -> Reply {
    Ok(Json(response.finalize()?))
}
