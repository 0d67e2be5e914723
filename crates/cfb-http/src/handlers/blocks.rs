use axum::extract::{Query, State};

use cfb_core::{
    chatfuel::{Button, HasButtons, Message, QuickReply, Response},
    config::Config,
    errors::Error,
};

use crate::{
    error::AppError,
    handlers::{first_name, reply, Params, Reply},
    router::AppState,
};

/// POST /link-block - buttons jumping to the configured blocks.
pub async fn link_block(State(state): State<AppState>) -> Reply {
    let blocks = &state.cfg.block_links;

    let mut buttons = vec![Button::new()
        .title("Start over")?
        .block_link(vec![first_block(&state.cfg)?])?];
    if blocks.len() > 1 {
        buttons.push(
            Button::new()
                .title("Any of them")?
                .block_link(blocks.clone())?,
        );
    }

    let message = Message::create("Where do you want to go?")?.buttons(buttons)?;
    reply(Response::create(Some(vec![message]))?)
}

/// POST /quick-reply - a yes/no question.
pub async fn quick_reply(State(state): State<AppState>) -> Reply {
    let cfg = &state.cfg;
    let replies = vec![
        QuickReply::new("Yes")?.block_link(first_block(cfg)?)?,
        QuickReply::new("No")?.postback(cfg.public_endpoint("/postback"))?,
    ];

    let message = Message::create("Did you like the demo?")?.replies_from(replies)?;
    reply(Response::create(Some(vec![message]))?)
}

/// POST /postback - called by postback buttons and quick replies.
pub async fn postback(State(state): State<AppState>, Query(params): Query<Params>) -> Reply {
    let name = first_name(&params);
    tracing::info!(route = "postback", attributes = params.len(), "postback received");

    let again = Button::new()
        .title("Again")?
        .postback(state.cfg.public_endpoint("/postback"))?;
    let message = Message::create(format!("Got your postback, {name}."))?.buttons(vec![again])?;

    reply(Response::create(Some(vec![message]))?)
}

fn first_block(cfg: &Config) -> Result<&str, AppError> {
    cfg.block_links
        .first()
        .map(String::as_str)
        .ok_or_else(|| AppError(Error::Config("no block links configured".to_string())))
}
