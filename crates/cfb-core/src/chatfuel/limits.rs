//! Platform limits enforced by the builders.

/// Button and quick reply titles.
pub const MAX_TITLE_CHARS: usize = 20;
/// Raw button payload.
pub const MAX_PAYLOAD_CHARS: usize = 1000;
/// Plain message text.
pub const MAX_TEXT_CHARS: usize = 320;
/// Card titles in a generic template.
pub const MAX_CARD_TITLE_CHARS: usize = 80;
/// Card subtitles in a generic template.
pub const MAX_CARD_SUBTITLE_CHARS: usize = 80;

pub const MAX_BUTTONS: usize = 3;
pub const MAX_CARDS: usize = 10;
pub const MAX_REPLIES: usize = 3;
pub const MAX_MESSAGES: usize = 10;
