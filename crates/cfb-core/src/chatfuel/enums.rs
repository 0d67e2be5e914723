use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::MessageError;

/// Button kinds understood by the platform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonType {
    #[default]
    #[serde(rename = "web_url")]
    WebUrl,
    /// Calls back into our JSON plugin endpoint.
    #[serde(rename = "json_plugin_url")]
    Postback,
    #[serde(rename = "phone_number")]
    PhoneNumber,
    #[serde(rename = "show_block")]
    ShowBlock,
    #[serde(rename = "element_share")]
    ElementShare,
}

impl ButtonType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WebUrl => "web_url",
            Self::Postback => "json_plugin_url",
            Self::PhoneNumber => "phone_number",
            Self::ShowBlock => "show_block",
            Self::ElementShare => "element_share",
        }
    }
}

impl fmt::Display for ButtonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media kinds accepted by attachment messages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentType {
    Image,
    Audio,
    Video,
    #[default]
    File,
}

impl AttachmentType {
    pub const ALL: [AttachmentType; 4] = [Self::Image, Self::Audio, Self::Video, Self::File];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::File => "file",
        }
    }
}

impl fmt::Display for AttachmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttachmentType {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| MessageError::InvalidAttachmentType(s.to_string()))
    }
}
