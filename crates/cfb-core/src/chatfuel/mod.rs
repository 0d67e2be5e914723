//! Builders for Chatfuel JSON API responses.
//!
//! Leaf to root: [`enums`] → [`button::Button`] → [`message::Message`] →
//! [`response::Response`]. Every builder is mutated through validating
//! setters and turned into a plain `serde_json::Value` by `finalize()`.

pub mod button;
pub mod buttons;
pub mod card;
pub mod enums;
pub mod limits;
pub mod message;
pub mod quick_reply;
pub mod response;

pub use button::{Button, ButtonData};
pub use buttons::{ButtonSet, HasButtons};
pub use card::Card;
pub use enums::{AttachmentType, ButtonType};
pub use message::Message;
pub use quick_reply::QuickReply;
pub use response::Response;

/// Serde map type used for every finalized payload and for user attributes.
pub type Map = serde_json::Map<String, serde_json::Value>;

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
