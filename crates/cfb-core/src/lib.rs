//! Core of the Chatfuel JSON plugin: validated builders for response payloads.
//!
//! This crate is framework-agnostic and does no I/O besides loading its
//! configuration. The HTTP surface lives in `cfb-http`.
//!
//! ```
//! use cfb_core::chatfuel::{Button, HasButtons, Message, Response};
//!
//! let button = Button::new().title("Docs")?.url("https://example.com/docs")?;
//! let message = Message::create("Need help?")?.buttons(vec![button])?;
//! let body = Response::create(Some(vec![message]))?.to_json()?;
//! assert!(body.contains("\"template_type\":\"button\""));
//! # Ok::<(), cfb_core::Error>(())
//! ```

pub mod chatfuel;
pub mod config;
pub mod errors;
pub mod logging;

pub use errors::{Error, Result};
