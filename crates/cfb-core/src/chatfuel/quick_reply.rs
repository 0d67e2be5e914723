//! Quick reply helper.
//!
//! A quick reply either jumps to blocks (`block_names`, always a list) or
//! calls our JSON plugin endpoint (`url` with `type: json_plugin_url`).

use serde_json::Value;

use crate::{
    chatfuel::{
        button::{check_block_link, check_data, ButtonData},
        char_len,
        enums::ButtonType,
        limits::MAX_TITLE_CHARS,
        Map,
    },
    errors::ButtonError,
};

#[derive(Clone, Debug, PartialEq)]
enum Target {
    Blocks(Vec<String>),
    Postback(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuickReply {
    title: String,
    target: Option<Target>,
    user_attributes: Map,
}

impl QuickReply {
    pub fn new(title: impl Into<String>) -> Result<Self, ButtonError> {
        let title = title.into();
        if title.is_empty() {
            return Err(ButtonError::EmptyTitle);
        }
        if char_len(&title) > MAX_TITLE_CHARS {
            return Err(ButtonError::TitleTooLong(title));
        }
        Ok(Self {
            title,
            target: None,
            user_attributes: Map::new(),
        })
    }

    pub fn block_link(mut self, blocks: impl Into<ButtonData>) -> Result<Self, ButtonError> {
        let blocks = blocks.into();
        check_block_link(&blocks)?;
        let names = match blocks {
            ButtonData::One(name) => vec![name],
            ButtonData::Many(names) => names,
        };
        self.target = Some(Target::Blocks(names));
        Ok(self)
    }

    pub fn postback(mut self, url: impl Into<String>) -> Result<Self, ButtonError> {
        let data = ButtonData::One(url.into());
        check_data(ButtonType::Postback, &data)?;
        if let ButtonData::One(url) = data {
            self.target = Some(Target::Postback(url));
        }
        Ok(self)
    }

    pub fn user_attributes(mut self, attributes: Map) -> Self {
        self.user_attributes = attributes;
        self
    }

    /// Fails with `EmptyBlockLink` when neither blocks nor a postback were set.
    pub fn finalize(&self) -> Result<Value, ButtonError> {
        let mut out = Map::new();
        out.insert("title".into(), self.title.as_str().into());
        match &self.target {
            Some(Target::Blocks(names)) => {
                out.insert("block_names".into(), Value::from(names.clone()));
            }
            Some(Target::Postback(url)) => {
                out.insert("url".into(), url.as_str().into());
                out.insert("type".into(), ButtonType::Postback.as_str().into());
            }
            None => return Err(ButtonError::EmptyBlockLink),
        }
        if !self.user_attributes.is_empty() {
            out.insert(
                "set_attributes".into(),
                Value::Object(self.user_attributes.clone()),
            );
        }
        Ok(Value::Object(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_block_is_emitted_as_list() {
        let v = QuickReply::new("Yes")
            .unwrap()
            .block_link("Confirm")
            .unwrap()
            .finalize()
            .unwrap();
        assert_eq!(v, json!({ "title": "Yes", "block_names": ["Confirm"] }));
    }

    #[test]
    fn postback_reply_with_attributes() {
        let mut attrs = Map::new();
        attrs.insert("answer".into(), json!("no"));
        let v = QuickReply::new("No")
            .unwrap()
            .postback("https://example.com/answer")
            .unwrap()
            .user_attributes(attrs)
            .finalize()
            .unwrap();
        assert_eq!(
            v,
            json!({
                "title": "No",
                "url": "https://example.com/answer",
                "type": "json_plugin_url",
                "set_attributes": { "answer": "no" }
            })
        );
    }

    #[test]
    fn validation() {
        assert_eq!(QuickReply::new(""), Err(ButtonError::EmptyTitle));
        assert!(matches!(
            QuickReply::new("x".repeat(21)),
            Err(ButtonError::TitleTooLong(_))
        ));
        assert!(matches!(
            QuickReply::new("ok").unwrap().block_link("a b"),
            Err(ButtonError::InvalidBlockLink(_))
        ));
        assert_eq!(
            QuickReply::new("ok").unwrap().postback(""),
            Err(ButtonError::EmptyPostback)
        );
        assert_eq!(
            QuickReply::new("ok").unwrap().finalize(),
            Err(ButtonError::EmptyBlockLink)
        );
    }
}
