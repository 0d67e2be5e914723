//! Top-level response envelope returned to the platform.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{
    chatfuel::{limits::MAX_MESSAGES, message::Message, Map},
    errors::ResponseError,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    messages: Vec<Message>,
    user_attributes: Map,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(messages: Option<Vec<Message>>) -> Result<Self, ResponseError> {
        match messages {
            Some(messages) => Self::new().messages(messages),
            None => Ok(Self::new()),
        }
    }

    /// Replaces the messages. At most ten.
    pub fn messages(mut self, messages: Vec<Message>) -> Result<Self, ResponseError> {
        check_count(messages.len())?;
        self.messages = messages;
        Ok(self)
    }

    /// Attributes stored on the user without any visible message.
    pub fn user_attributes(mut self, attributes: Map) -> Self {
        self.user_attributes = attributes;
        self
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn finalize(&self) -> Result<Value, ResponseError> {
        check_count(self.messages.len())?;

        let messages = self
            .messages
            .iter()
            .map(Message::finalize)
            .collect::<Result<Vec<_>, _>>()?;

        let mut out = Map::new();
        out.insert("messages".into(), Value::from(messages));
        if !self.user_attributes.is_empty() {
            out.insert(
                "set_attributes".into(),
                Value::Object(self.user_attributes.clone()),
            );
        }

        tracing::debug!(
            messages = self.messages.len(),
            attributes = self.user_attributes.len(),
            "response finalized"
        );
        Ok(Value::Object(out))
    }

    /// Finalized response as a JSON body.
    pub fn to_json(&self) -> crate::Result<String> {
        let value = self.finalize()?;
        Ok(serde_json::to_string(&value)?)
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.finalize()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

fn check_count(count: usize) -> Result<(), ResponseError> {
    if count > MAX_MESSAGES {
        return Err(ResponseError::TooManyMessages(count));
    }
    Ok(())
}
