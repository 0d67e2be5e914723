//! Call-to-action button builder.
//!
//! Data setters double as type selectors: `url()` makes a `web_url` button,
//! `phone()` a `phone_number` button and so on. `kind()` overrides the type
//! without touching the stored data, so `finalize()` re-checks the data
//! against whatever type the button ends up with.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use url::Url;

use crate::{
    chatfuel::{
        char_len,
        enums::ButtonType,
        limits::{MAX_PAYLOAD_CHARS, MAX_TITLE_CHARS},
        Map,
    },
    errors::ButtonError,
};

/// Type-specific button data: a URL, a phone number, or one or more block names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ButtonData {
    One(String),
    Many(Vec<String>),
}

impl ButtonData {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(s) => s.is_empty(),
            Self::Many(v) => v.is_empty(),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::One(s) => Value::String(s.clone()),
            Self::Many(v) => Value::from(v.clone()),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::One(s) => s.clone(),
            Self::Many(v) => v.join(","),
        }
    }
}

impl From<&str> for ButtonData {
    fn from(s: &str) -> Self {
        Self::One(s.to_string())
    }
}

impl From<String> for ButtonData {
    fn from(s: String) -> Self {
        Self::One(s)
    }
}

impl From<Vec<String>> for ButtonData {
    fn from(v: Vec<String>) -> Self {
        Self::Many(v)
    }
}

impl From<Vec<&str>> for ButtonData {
    fn from(v: Vec<&str>) -> Self {
        Self::Many(v.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ButtonData {
    fn from(v: [&str; N]) -> Self {
        Self::Many(v.into_iter().map(str::to_string).collect())
    }
}

/// A single call-to-action attached to a message, card or quick reply.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Button {
    title: Option<String>,
    kind: ButtonType,
    data: Option<ButtonData>,
    payload: Option<String>,
    user_attributes: Map,
}

impl Button {
    /// Empty `web_url` button.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores title and data as-is; both are validated by `finalize()`.
    pub fn create(title: impl Into<String>, data: Option<ButtonData>, kind: ButtonType) -> Self {
        let title = title.into();
        Self {
            title: (!title.is_empty()).then_some(title),
            kind,
            data,
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Result<Self, ButtonError> {
        if self.kind == ButtonType::ElementShare {
            return Ok(self);
        }
        let title = title.into();
        check_title(&title)?;
        self.title = Some(title);
        Ok(self)
    }

    pub fn url(self, url: impl Into<String>) -> Result<Self, ButtonError> {
        self.set_data(ButtonType::WebUrl, ButtonData::One(url.into()))
    }

    pub fn phone(self, phone: impl Into<String>) -> Result<Self, ButtonError> {
        self.set_data(ButtonType::PhoneNumber, ButtonData::One(phone.into()))
    }

    pub fn postback(self, url: impl Into<String>) -> Result<Self, ButtonError> {
        self.set_data(ButtonType::Postback, ButtonData::One(url.into()))
    }

    /// Links to one block (`block_name`) or several (`block_names`).
    pub fn block_link(self, blocks: impl Into<ButtonData>) -> Result<Self, ButtonError> {
        self.set_data(ButtonType::ShowBlock, blocks.into())
    }

    /// Raw payload forwarded verbatim under the `payload` key.
    pub fn payload(mut self, payload: impl Into<String>) -> Result<Self, ButtonError> {
        let payload = payload.into();
        check_payload(&payload)?;
        self.payload = Some(payload);
        Ok(self)
    }

    /// Overrides the button type without re-validating the stored data.
    ///
    /// A mismatch (say, `url()` followed by `kind(PhoneNumber)`) is reported by
    /// `finalize()`, which checks the data against the final type.
    pub fn kind(mut self, kind: ButtonType) -> Self {
        self.kind = kind;
        self
    }

    pub fn is_type_web_url(self) -> Self {
        self.kind(ButtonType::WebUrl)
    }

    pub fn is_type_postback(self) -> Self {
        self.kind(ButtonType::Postback)
    }

    pub fn is_type_phone_number(self) -> Self {
        self.kind(ButtonType::PhoneNumber)
    }

    pub fn is_type_block_link(self) -> Self {
        self.kind(ButtonType::ShowBlock)
    }

    pub fn is_type_element_share(self) -> Self {
        self.kind(ButtonType::ElementShare)
    }

    /// Attributes the platform stores on the user when the button is pressed.
    pub fn user_attributes(mut self, attributes: Map) -> Self {
        self.user_attributes = attributes;
        self
    }

    pub fn button_type(&self) -> ButtonType {
        self.kind
    }

    pub fn data(&self) -> Option<&ButtonData> {
        self.data.as_ref()
    }

    /// Builds the button mapping from the current fields.
    pub fn finalize(&self) -> Result<Value, ButtonError> {
        let mut out = Map::new();
        out.insert("type".into(), self.kind.as_str().into());

        if self.kind != ButtonType::ElementShare {
            let title = self.title.as_deref().unwrap_or_default();
            check_title(title)?;
            out.insert("title".into(), title.into());
        }

        if let Some(data) = self.data.as_ref().filter(|d| !d.is_empty()) {
            check_data(self.kind, data)?;
            if let Some(key) = data_key(self.kind, data) {
                out.insert(key.into(), data.to_value());
            }
        }

        if let Some(payload) = &self.payload {
            check_payload(payload)?;
            out.insert("payload".into(), payload.as_str().into());
        }

        if !self.user_attributes.is_empty() {
            out.insert(
                "set_attributes".into(),
                Value::Object(self.user_attributes.clone()),
            );
        }

        Ok(Value::Object(out))
    }

    fn set_data(mut self, kind: ButtonType, data: ButtonData) -> Result<Self, ButtonError> {
        check_data(kind, &data)?;
        self.data = Some(data);
        Ok(self.kind(kind))
    }
}

impl Serialize for Button {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.finalize()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

fn check_title(title: &str) -> Result<(), ButtonError> {
    if title.is_empty() {
        return Err(ButtonError::EmptyTitle);
    }
    if char_len(title) > MAX_TITLE_CHARS {
        return Err(ButtonError::TitleTooLong(title.to_string()));
    }
    Ok(())
}

fn check_payload(payload: &str) -> Result<(), ButtonError> {
    let len = char_len(payload);
    if len > MAX_PAYLOAD_CHARS {
        return Err(ButtonError::PayloadTooLong(len));
    }
    Ok(())
}

/// Validates `data` as the value of a `kind` button.
pub(crate) fn check_data(kind: ButtonType, data: &ButtonData) -> Result<(), ButtonError> {
    match kind {
        ButtonType::WebUrl => check_url(data, ButtonError::EmptyUrl),
        ButtonType::Postback => check_url(data, ButtonError::EmptyPostback),
        ButtonType::PhoneNumber => match data {
            _ if data.is_empty() => Err(ButtonError::EmptyPhone),
            ButtonData::One(phone) if phone.starts_with('+') => Ok(()),
            other => Err(ButtonError::InvalidPhone(other.describe())),
        },
        ButtonType::ShowBlock => check_block_link(data),
        ButtonType::ElementShare => Ok(()),
    }
}

fn check_url(data: &ButtonData, when_empty: ButtonError) -> Result<(), ButtonError> {
    match data {
        _ if data.is_empty() => Err(when_empty),
        ButtonData::One(url) if is_well_formed_url(url) => Ok(()),
        other => Err(ButtonError::InvalidUrl(other.describe())),
    }
}

pub(crate) fn check_block_link(data: &ButtonData) -> Result<(), ButtonError> {
    if data.is_empty() {
        return Err(ButtonError::EmptyBlockLink);
    }
    let names: &[String] = match data {
        ButtonData::One(name) => std::slice::from_ref(name),
        ButtonData::Many(names) => names,
    };
    if names.iter().any(|name| name.contains(' ')) {
        return Err(ButtonError::InvalidBlockLink(data.describe()));
    }
    Ok(())
}

/// Absolute `scheme://host...` URL with no embedded whitespace.
pub(crate) fn is_well_formed_url(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    match Url::parse(s) {
        // the parser repairs `https:host` and `http:/host`; the raw input must not need it
        Ok(url) => {
            url.has_host()
                && s.get(url.scheme().len()..)
                    .is_some_and(|rest| rest.starts_with("://"))
        }
        Err(_) => false,
    }
}

fn data_key(kind: ButtonType, data: &ButtonData) -> Option<&'static str> {
    match (kind, data) {
        (ButtonType::WebUrl | ButtonType::Postback, _) => Some("url"),
        (ButtonType::PhoneNumber, _) => Some("phone_number"),
        (ButtonType::ShowBlock, ButtonData::One(_)) => Some("block_name"),
        (ButtonType::ShowBlock, ButtonData::Many(_)) => Some("block_names"),
        (ButtonType::ElementShare, _) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn title_up_to_twenty_chars_is_kept() {
        for len in [1, 10, 20] {
            let t = "a".repeat(len);
            let v = Button::new()
                .title(t.clone())
                .unwrap()
                .url("https://example.com")
                .unwrap()
                .finalize()
                .unwrap();
            assert_eq!(v["title"], json!(t));
        }
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        let t = "é".repeat(20);
        assert!(Button::new().title(t).is_ok());
        assert_eq!(
            Button::new().title("é".repeat(21)),
            Err(ButtonError::TitleTooLong("é".repeat(21)))
        );
    }

    #[test]
    fn title_of_21_chars_fails() {
        let err = Button::new().title("a".repeat(21)).unwrap_err();
        assert!(matches!(err, ButtonError::TitleTooLong(_)));
    }

    #[test]
    fn empty_title_fails() {
        assert_eq!(Button::new().title(""), Err(ButtonError::EmptyTitle));
    }

    #[test]
    fn title_is_ignored_for_element_share() {
        let b = Button::new()
            .is_type_element_share()
            .title("a".repeat(40))
            .unwrap();
        assert_eq!(b.finalize().unwrap(), json!({ "type": "element_share" }));
    }

    #[test]
    fn url_sets_web_url_type() {
        let v = Button::new()
            .is_type_phone_number()
            .title("Open")
            .unwrap()
            .url("https://example.com/page?x=1")
            .unwrap()
            .finalize()
            .unwrap();
        assert_eq!(
            v,
            json!({ "type": "web_url", "title": "Open", "url": "https://example.com/page?x=1" })
        );
    }

    #[test]
    fn url_rejects_empty_and_malformed() {
        assert_eq!(Button::new().url(""), Err(ButtonError::EmptyUrl));
        for bad in [
            "example.com",
            "not a url",
            "https://exa mple.com",
            "mailto:x@y.z",
            "https:example.com",
            "http:/example.com",
            "https:\\\\example.com",
        ] {
            assert_eq!(
                Button::new().url(bad),
                Err(ButtonError::InvalidUrl(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn phone_requires_leading_plus() {
        let v = Button::new()
            .title("Call")
            .unwrap()
            .phone("+15551234567")
            .unwrap()
            .finalize()
            .unwrap();
        assert_eq!(
            v,
            json!({ "type": "phone_number", "title": "Call", "phone_number": "+15551234567" })
        );

        assert_eq!(
            Button::new().phone("5551234567"),
            Err(ButtonError::InvalidPhone("5551234567".to_string()))
        );
        assert_eq!(Button::new().phone(""), Err(ButtonError::EmptyPhone));
    }

    #[test]
    fn postback_uses_json_plugin_url() {
        let v = Button::new()
            .title("Buy")
            .unwrap()
            .postback("https://api.example.com/buy?item=1")
            .unwrap()
            .finalize()
            .unwrap();
        assert_eq!(v["type"], json!("json_plugin_url"));
        assert_eq!(v["url"], json!("https://api.example.com/buy?item=1"));

        assert_eq!(Button::new().postback(""), Err(ButtonError::EmptyPostback));
        assert!(matches!(
            Button::new().postback("nope"),
            Err(ButtonError::InvalidUrl(_))
        ));
    }

    #[test]
    fn block_link_list_and_single() {
        let v = Button::new()
            .title("Go")
            .unwrap()
            .block_link(["a", "b"])
            .unwrap()
            .finalize()
            .unwrap();
        assert_eq!(
            v,
            json!({ "type": "show_block", "title": "Go", "block_names": ["a", "b"] })
        );

        let v = Button::new()
            .title("Go")
            .unwrap()
            .block_link("Welcome")
            .unwrap()
            .finalize()
            .unwrap();
        assert_eq!(v["block_name"], json!("Welcome"));
        assert!(v.get("block_names").is_none());
    }

    #[test]
    fn block_link_rejects_spaces_and_empty() {
        assert_eq!(
            Button::new().block_link(["a b"]),
            Err(ButtonError::InvalidBlockLink("a b".to_string()))
        );
        assert_eq!(
            Button::new().block_link(" leading"),
            Err(ButtonError::InvalidBlockLink(" leading".to_string()))
        );
        assert_eq!(
            Button::new().block_link(Vec::<String>::new()),
            Err(ButtonError::EmptyBlockLink)
        );
        assert_eq!(Button::new().block_link(""), Err(ButtonError::EmptyBlockLink));
    }

    #[test]
    fn kind_override_is_caught_at_finalize() {
        let b = Button::new()
            .title("Call")
            .unwrap()
            .url("https://example.com")
            .unwrap()
            .kind(ButtonType::PhoneNumber);
        assert_eq!(b.button_type(), ButtonType::PhoneNumber);
        assert_eq!(
            b.finalize(),
            Err(ButtonError::InvalidPhone("https://example.com".to_string()))
        );
    }

    #[test]
    fn kind_override_to_compatible_type_switches_output() {
        let v = Button::new()
            .title("Hook")
            .unwrap()
            .url("https://example.com/hook")
            .unwrap()
            .is_type_postback()
            .finalize()
            .unwrap();
        assert_eq!(
            v,
            json!({ "type": "json_plugin_url", "title": "Hook", "url": "https://example.com/hook" })
        );
    }

    #[test]
    fn create_defers_validation_to_finalize() {
        let b = Button::create("", Some("https://example.com".into()), ButtonType::WebUrl);
        assert_eq!(b.finalize(), Err(ButtonError::EmptyTitle));

        let b = Button::create("Menu", Some(["Menu"].into()), ButtonType::ShowBlock);
        assert_eq!(
            b.finalize().unwrap(),
            json!({ "type": "show_block", "title": "Menu", "block_names": ["Menu"] })
        );

        let b = Button::create("Call", Some("555".into()), ButtonType::PhoneNumber);
        assert!(matches!(b.finalize(), Err(ButtonError::InvalidPhone(_))));
    }

    #[test]
    fn output_only_carries_the_current_data_key() {
        let v = Button::new()
            .title("Call")
            .unwrap()
            .url("https://example.com")
            .unwrap()
            .phone("+100")
            .unwrap()
            .finalize()
            .unwrap();
        assert_eq!(
            v,
            json!({ "type": "phone_number", "title": "Call", "phone_number": "+100" })
        );
    }

    #[test]
    fn user_attributes_only_when_non_empty() {
        let b = Button::new().title("Go").unwrap().block_link("Next").unwrap();
        assert!(b
            .clone()
            .user_attributes(Map::new())
            .finalize()
            .unwrap()
            .get("set_attributes")
            .is_none());

        let mut attrs = Map::new();
        attrs.insert("plan".into(), json!("pro"));
        let v = b.user_attributes(attrs).finalize().unwrap();
        assert_eq!(v["set_attributes"], json!({ "plan": "pro" }));
    }

    #[test]
    fn payload_limit() {
        assert!(Button::new().payload("p".repeat(1000)).is_ok());
        assert_eq!(
            Button::new().payload("p".repeat(1001)),
            Err(ButtonError::PayloadTooLong(1001))
        );
        let v = Button::new()
            .title("Go")
            .unwrap()
            .payload("ORDER_42")
            .unwrap()
            .finalize()
            .unwrap();
        assert_eq!(v, json!({ "type": "web_url", "title": "Go", "payload": "ORDER_42" }));
    }

    #[test]
    fn finalize_is_idempotent() {
        let b = Button::new()
            .title("Site")
            .unwrap()
            .url("https://example.com")
            .unwrap();
        assert_eq!(b.finalize().unwrap(), b.finalize().unwrap());
    }

    #[test]
    fn serializes_through_finalize() {
        let b = Button::new().title("Site").unwrap().url("https://example.com").unwrap();
        assert_eq!(serde_json::to_value(&b).unwrap(), b.finalize().unwrap());
        assert!(serde_json::to_string(&Button::new()).is_err());
    }
}
