use axum::extract::Query;

use cfb_core::chatfuel::{Message, Response};

use crate::handlers::{first_name, reply, Params, Reply};

/// POST /text-messages - two plain text messages.
pub async fn send_text_messages(Query(params): Query<Params>) -> Reply {
    let name = first_name(&params);
    tracing::info!(route = "text-messages", "building response");

    let messages = vec![
        Message::create(format!("Hi {name}!"))?,
        Message::create("This reply was built by the JSON plugin.")?,
    ];

    reply(Response::create(Some(messages))?)
}
