use axum::extract::State;

use cfb_core::chatfuel::{Button, Card, HasButtons, Message, Response};

use crate::{
    error::AppError,
    handlers::{reply, Reply},
    router::AppState,
};

const GALLERY: [(&str, &str); 3] = [
    ("Classic T-shirt", "tshirt"),
    ("Hoodie", "hoodie"),
    ("Cap", "cap"),
];

/// POST /card-with-buttons - a single card with a link and a postback.
pub async fn send_card_with_buttons(State(state): State<AppState>) -> Reply {
    let cfg = &state.cfg;
    let card = Card::new("Chatfuel JSON API")?
        .subtitle("Cards can carry up to three buttons")?
        .image_url(cfg.media_url("card.png"))?
        .buttons(vec![
            Button::new()
                .title("Read the docs")?
                .url("https://docs.chatfuel.com")?,
            Button::new()
                .title("Ping the plugin")?
                .postback(cfg.public_endpoint("/postback"))?,
        ])?;

    let message = Message::new().cards_from(vec![card])?;
    reply(Response::create(Some(vec![message]))?)
}

/// POST /gallery - a carousel of product cards.
pub async fn send_gallery(State(state): State<AppState>) -> Reply {
    let cfg = &state.cfg;
    let cards = GALLERY
        .iter()
        .map(|(title, slug)| {
            let card = Card::new(*title)?
                .image_url(cfg.media_url(&format!("{slug}.png")))?
                .item_url(cfg.public_endpoint(&format!("/products/{slug}")))?
                .buttons(vec![Button::new()
                    .title("View")?
                    .url(cfg.public_endpoint(&format!("/products/{slug}")))?])?;
            Ok::<_, AppError>(card)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let message = Message::new().cards_from(cards)?;
    reply(Response::create(Some(vec![message]))?)
}

/// POST /share-call-buttons - share and call actions on a card.
pub async fn send_share_call_buttons(State(state): State<AppState>) -> Reply {
    let card = Card::new("Talk to us")?
        .subtitle("Share this card or give us a call")?
        .image_url(state.cfg.media_url("contact.png"))?
        .buttons(vec![
            Button::new().is_type_element_share(),
            Button::new().title("Call us")?.phone("+15551234567")?,
        ])?;

    let message = Message::new().cards_from(vec![card])?;
    reply(Response::create(Some(vec![message]))?)
}
