//! Generic template (carousel) card.
//!
//! `Message::cards` treats cards as opaque mappings; this helper is the usual
//! way to produce one.

use serde_json::Value;

use crate::{
    chatfuel::{
        button::is_well_formed_url,
        buttons::{ButtonSet, HasButtons},
        char_len,
        limits::{MAX_CARD_SUBTITLE_CHARS, MAX_CARD_TITLE_CHARS},
        Map,
    },
    errors::MessageError,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Card {
    title: String,
    subtitle: Option<String>,
    image_url: Option<String>,
    item_url: Option<String>,
    buttons: ButtonSet,
}

impl Card {
    pub fn new(title: impl Into<String>) -> Result<Self, MessageError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(MessageError::InvalidCard("title not provided".to_string()));
        }
        if char_len(&title) > MAX_CARD_TITLE_CHARS {
            return Err(MessageError::InvalidCard(format!(
                "title exceeds {MAX_CARD_TITLE_CHARS} characters"
            )));
        }
        Ok(Self {
            title,
            ..Self::default()
        })
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Result<Self, MessageError> {
        let subtitle = subtitle.into();
        if char_len(&subtitle) > MAX_CARD_SUBTITLE_CHARS {
            return Err(MessageError::InvalidCard(format!(
                "subtitle exceeds {MAX_CARD_SUBTITLE_CHARS} characters"
            )));
        }
        self.subtitle = Some(subtitle);
        Ok(self)
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Result<Self, MessageError> {
        self.image_url = Some(checked_url("image_url", url.into())?);
        Ok(self)
    }

    /// Opened when the card itself is tapped.
    pub fn item_url(mut self, url: impl Into<String>) -> Result<Self, MessageError> {
        self.item_url = Some(checked_url("item_url", url.into())?);
        Ok(self)
    }

    pub fn finalize(&self) -> Result<Value, MessageError> {
        let mut out = Map::new();
        out.insert("title".into(), self.title.as_str().into());
        for (key, value) in [
            ("subtitle", &self.subtitle),
            ("image_url", &self.image_url),
            ("item_url", &self.item_url),
        ] {
            if let Some(v) = value {
                out.insert(key.into(), v.as_str().into());
            }
        }
        if !self.buttons.is_empty() {
            out.insert("buttons".into(), Value::from(self.buttons.finalize()?));
        }
        Ok(Value::Object(out))
    }
}

impl HasButtons for Card {
    fn button_set(&self) -> &ButtonSet {
        &self.buttons
    }

    fn button_set_mut(&mut self) -> &mut ButtonSet {
        &mut self.buttons
    }
}

fn checked_url(field: &str, url: String) -> Result<String, MessageError> {
    if !is_well_formed_url(&url) {
        return Err(MessageError::InvalidCard(format!("invalid {field} `{url}`")));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chatfuel::Button;
    use serde_json::json;

    #[test]
    fn full_card() {
        let card = Card::new("Rust mug")
            .unwrap()
            .subtitle("Ceramic, 350 ml")
            .unwrap()
            .image_url("https://example.com/mug.png")
            .unwrap()
            .item_url("https://example.com/mug")
            .unwrap()
            .buttons(vec![Button::new()
                .title("Buy")
                .unwrap()
                .postback("https://example.com/buy")
                .unwrap()])
            .unwrap();
        assert_eq!(
            card.finalize().unwrap(),
            json!({
                "title": "Rust mug",
                "subtitle": "Ceramic, 350 ml",
                "image_url": "https://example.com/mug.png",
                "item_url": "https://example.com/mug",
                "buttons": [
                    { "type": "json_plugin_url", "title": "Buy", "url": "https://example.com/buy" }
                ]
            })
        );
    }

    #[test]
    fn title_only_card_has_no_optional_keys() {
        assert_eq!(
            Card::new("Plain").unwrap().finalize().unwrap(),
            json!({ "title": "Plain" })
        );
    }

    #[test]
    fn rejects_bad_fields() {
        assert!(matches!(Card::new(" "), Err(MessageError::InvalidCard(_))));
        assert!(matches!(
            Card::new("x".repeat(81)),
            Err(MessageError::InvalidCard(_))
        ));
        assert!(matches!(
            Card::new("ok").unwrap().image_url("mug.png"),
            Err(MessageError::InvalidCard(_))
        ));
        let four: Vec<Button> = (0..4).map(|_| Button::new()).collect();
        assert_eq!(
            Card::new("ok").unwrap().buttons(four),
            Err(MessageError::TooManyButtons(4))
        );
    }
}
