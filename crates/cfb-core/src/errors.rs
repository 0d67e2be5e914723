/// Core error type for the response builder.
///
/// Builder failures carry their own layered enums (`ButtonError` inside
/// `MessageError` inside `ResponseError`) so callers can match on the exact
/// rule that rejected the input; everything else funnels through here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Button(#[from] ButtonError),

    #[error(transparent)]
    Message(#[from] MessageError),

    #[error(transparent)]
    Response(#[from] ResponseError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Validation failures raised by the button builder.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ButtonError {
    #[error("button title not provided")]
    EmptyTitle,

    #[error("button title `{0}` exceeds {max} characters", max = crate::chatfuel::limits::MAX_TITLE_CHARS)]
    TitleTooLong(String),

    #[error("button url not provided")]
    EmptyUrl,

    #[error("invalid url provided: `{0}`")]
    InvalidUrl(String),

    #[error("button phone number not provided")]
    EmptyPhone,

    #[error("invalid phone number `{0}`: must start with `+`")]
    InvalidPhone(String),

    #[error("button postback url not provided")]
    EmptyPostback,

    #[error("block link not provided")]
    EmptyBlockLink,

    #[error("invalid block link `{0}`: block names cannot contain spaces")]
    InvalidBlockLink(String),

    #[error("button payload exceeds {max} characters (got {0})", max = crate::chatfuel::limits::MAX_PAYLOAD_CHARS)]
    PayloadTooLong(usize),
}

/// Validation failures raised by the message builder (and the card helper).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error("message text exceeds {max} characters (got {0})", max = crate::chatfuel::limits::MAX_TEXT_CHARS)]
    TextTooLong(usize),

    #[error("invalid attachment type `{0}`: expected image, audio, video or file")]
    InvalidAttachmentType(String),

    #[error("attachment url not provided")]
    MissingAttachmentUrl,

    #[error("you cannot add more than {max} cards in 1 message (got {0})", max = crate::chatfuel::limits::MAX_CARDS)]
    TooManyCards(usize),

    #[error("you cannot add more than {max} quick replies in 1 message (got {0})", max = crate::chatfuel::limits::MAX_REPLIES)]
    TooManyReplies(usize),

    #[error("you cannot add more than {max} buttons in 1 message (got {0})", max = crate::chatfuel::limits::MAX_BUTTONS)]
    TooManyButtons(usize),

    #[error("message has no text, attachment, buttons, cards or quick replies")]
    NoContentProvided,

    #[error("invalid card: {0}")]
    InvalidCard(String),

    #[error(transparent)]
    Button(#[from] ButtonError),
}

/// Validation failures raised by the response envelope.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("you cannot add more than {max} messages in 1 response (got {0})", max = crate::chatfuel::limits::MAX_MESSAGES)]
    TooManyMessages(usize),

    #[error(transparent)]
    Message(#[from] MessageError),
}

impl ButtonError {
    /// Stable machine-readable code, used by adapters that surface errors to clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::TitleTooLong(_) => "title_too_long",
            Self::EmptyUrl => "empty_url",
            Self::InvalidUrl(_) => "invalid_url",
            Self::EmptyPhone => "empty_phone",
            Self::InvalidPhone(_) => "invalid_phone",
            Self::EmptyPostback => "empty_postback",
            Self::EmptyBlockLink => "empty_block_link",
            Self::InvalidBlockLink(_) => "invalid_block_link",
            Self::PayloadTooLong(_) => "payload_too_long",
        }
    }
}

impl MessageError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TextTooLong(_) => "text_too_long",
            Self::InvalidAttachmentType(_) => "invalid_attachment_type",
            Self::MissingAttachmentUrl => "missing_attachment_url",
            Self::TooManyCards(_) => "too_many_cards",
            Self::TooManyReplies(_) => "too_many_replies",
            Self::TooManyButtons(_) => "too_many_buttons",
            Self::NoContentProvided => "no_content_provided",
            Self::InvalidCard(_) => "invalid_card",
            Self::Button(e) => e.code(),
        }
    }
}

impl ResponseError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TooManyMessages(_) => "too_many_messages",
            Self::Message(e) => e.code(),
        }
    }
}
