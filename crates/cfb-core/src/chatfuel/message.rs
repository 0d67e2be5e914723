//! Outgoing message builder.
//!
//! A message can carry several kinds of content at once, but only one of them
//! decides the output shape. See [`MessageShape::PRECEDENCE`].

use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use crate::{
    chatfuel::{
        buttons::{ButtonSet, HasButtons},
        card::Card,
        char_len,
        enums::AttachmentType,
        limits::{MAX_CARDS, MAX_REPLIES, MAX_TEXT_CHARS},
        quick_reply::QuickReply,
        Map,
    },
    errors::MessageError,
};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Attachment {
    kind: AttachmentType,
    url: String,
}

/// Output shape of a finalized message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageShape {
    Attachment,
    ButtonTemplate,
    GenericTemplate,
    QuickReplies,
    Text,
}

impl MessageShape {
    /// First populated shape wins.
    pub const PRECEDENCE: [MessageShape; 5] = [
        Self::Attachment,
        Self::ButtonTemplate,
        Self::GenericTemplate,
        Self::QuickReplies,
        Self::Text,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attachment => "attachment",
            Self::ButtonTemplate => "button_template",
            Self::GenericTemplate => "generic_template",
            Self::QuickReplies => "quick_replies",
            Self::Text => "text",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Message {
    text: Option<String>,
    cards: Vec<Value>,
    replies: Vec<Value>,
    buttons: ButtonSet,
    attachment: Option<Attachment>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message with `text`; an empty string leaves the text unset.
    pub fn create(text: impl Into<String>) -> Result<Self, MessageError> {
        let text = text.into();
        if text.is_empty() {
            return Ok(Self::new());
        }
        Self::new().text(text)
    }

    pub fn text(mut self, text: impl Into<String>) -> Result<Self, MessageError> {
        let text = text.into();
        let len = char_len(&text);
        if len > MAX_TEXT_CHARS {
            return Err(MessageError::TextTooLong(len));
        }
        self.text = Some(text);
        Ok(self)
    }

    pub fn attach(
        mut self,
        kind: AttachmentType,
        url: impl Into<String>,
    ) -> Result<Self, MessageError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(MessageError::MissingAttachmentUrl);
        }
        self.attachment = Some(Attachment { kind, url });
        Ok(self)
    }

    /// Like [`Message::attach`] with the type given by its wire name (`image`, `audio`, ...).
    pub fn attach_named(self, kind: &str, url: impl Into<String>) -> Result<Self, MessageError> {
        let kind = kind.parse::<AttachmentType>()?;
        self.attach(kind, url)
    }

    /// Carousel cards, passed through untouched. At most ten.
    pub fn cards(mut self, cards: Vec<Value>) -> Result<Self, MessageError> {
        if cards.len() > MAX_CARDS {
            return Err(MessageError::TooManyCards(cards.len()));
        }
        self.cards = cards;
        Ok(self)
    }

    pub fn cards_from(self, cards: Vec<Card>) -> Result<Self, MessageError> {
        if cards.len() > MAX_CARDS {
            return Err(MessageError::TooManyCards(cards.len()));
        }
        let cards = cards
            .iter()
            .map(Card::finalize)
            .collect::<Result<Vec<_>, _>>()?;
        self.cards(cards)
    }

    /// Quick replies, passed through untouched. At most three.
    pub fn replies(mut self, replies: Vec<Value>) -> Result<Self, MessageError> {
        if replies.len() > MAX_REPLIES {
            return Err(MessageError::TooManyReplies(replies.len()));
        }
        self.replies = replies;
        Ok(self)
    }

    pub fn replies_from(self, replies: Vec<QuickReply>) -> Result<Self, MessageError> {
        if replies.len() > MAX_REPLIES {
            return Err(MessageError::TooManyReplies(replies.len()));
        }
        let replies = replies
            .iter()
            .map(QuickReply::finalize)
            .collect::<Result<Vec<_>, _>>()?;
        self.replies(replies)
    }

    /// Shape `finalize()` will produce, if any content is set.
    pub fn shape(&self) -> Option<MessageShape> {
        MessageShape::PRECEDENCE
            .into_iter()
            .find(|shape| self.has(*shape))
    }

    fn has(&self, shape: MessageShape) -> bool {
        match shape {
            MessageShape::Attachment => self.attachment.is_some(),
            MessageShape::ButtonTemplate => !self.buttons.is_empty(),
            MessageShape::GenericTemplate => !self.cards.is_empty(),
            MessageShape::QuickReplies => !self.replies.is_empty(),
            MessageShape::Text => self.text.is_some(),
        }
    }

    pub fn finalize(&self) -> Result<Value, MessageError> {
        let shape = self.shape().ok_or(MessageError::NoContentProvided)?;

        let mut out = Map::new();
        if let Some(text) = &self.text {
            out.insert("text".into(), text.as_str().into());
        }

        match shape {
            MessageShape::Attachment => {
                if let Some(att) = &self.attachment {
                    out.insert(
                        "attachment".into(),
                        json!({ "type": att.kind.as_str(), "payload": { "url": att.url } }),
                    );
                }
            }
            MessageShape::ButtonTemplate => {
                let buttons = self.buttons.finalize()?;
                out.insert(
                    "attachment".into(),
                    json!({
                        "type": "template",
                        "payload": {
                            "template_type": "button",
                            "text": self.text,
                            "buttons": buttons,
                        }
                    }),
                );
            }
            MessageShape::GenericTemplate => {
                out.insert(
                    "attachment".into(),
                    json!({
                        "type": "template",
                        "payload": { "template_type": "generic", "elements": self.cards }
                    }),
                );
            }
            MessageShape::QuickReplies => {
                out.insert("quick_replies".into(), Value::from(self.replies.clone()));
            }
            MessageShape::Text => {}
        }

        tracing::debug!(shape = shape.as_str(), "message finalized");
        Ok(Value::Object(out))
    }
}

impl HasButtons for Message {
    fn button_set(&self) -> &ButtonSet {
        &self.buttons
    }

    fn button_set_mut(&mut self) -> &mut ButtonSet {
        &mut self.buttons
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.finalize()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}
