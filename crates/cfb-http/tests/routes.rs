//! Router-level tests: every plugin endpoint returns a valid Chatfuel payload.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use cfb_core::config::Config;
use cfb_http::{build_router, AppState};

fn app() -> Router {
    let cfg = Config {
        public_url: "https://bot.example.org".to_string(),
        media_base_url: "https://cdn.example.org".to_string(),
        block_links: vec!["Welcome".to_string(), "Menu".to_string()],
        ..Config::default()
    };
    build_router(AppState::new(Arc::new(cfg)))
}

async fn call(method: &str, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let res = app().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn post(uri: &str) -> Value {
    let (status, body) = call("POST", uri).await;
    assert_eq!(status, StatusCode::OK, "{uri}: {body}");
    body
}

#[tokio::test]
async fn text_messages_greet_by_first_name() {
    let body = post("/text-messages?first%20name=Ada").await;
    assert_eq!(body["messages"][0], json!({ "text": "Hi Ada!" }));
    assert_eq!(body["messages"].as_array().unwrap().len(), 2);
    assert!(body.get("set_attributes").is_none());
}

#[tokio::test]
async fn attachments_use_media_base_url() {
    for (uri, kind, file) in [
        ("/image-attachment", "image", "image.png"),
        ("/video-attachment", "video", "video.mp4"),
        ("/audio-attachment", "audio", "audio.mp3"),
    ] {
        let body = post(uri).await;
        assert_eq!(
            body["messages"][0],
            json!({
                "attachment": {
                    "type": kind,
                    "payload": { "url": format!("https://cdn.example.org/{file}") }
                }
            })
        );
    }
}

#[tokio::test]
async fn card_with_buttons_is_a_generic_template() {
    let body = post("/card-with-buttons").await;
    let payload = &body["messages"][0]["attachment"]["payload"];
    assert_eq!(payload["template_type"], json!("generic"));
    let buttons = payload["elements"][0]["buttons"].as_array().unwrap();
    assert_eq!(buttons.len(), 2);
    assert_eq!(buttons[0]["type"], json!("web_url"));
    assert_eq!(
        buttons[1],
        json!({
            "type": "json_plugin_url",
            "title": "Ping the plugin",
            "url": "https://bot.example.org/postback"
        })
    );
}

#[tokio::test]
async fn gallery_has_three_cards() {
    let body = post("/gallery").await;
    let elements = body["messages"][0]["attachment"]["payload"]["elements"]
        .as_array()
        .unwrap();
    assert_eq!(elements.len(), 3);
    assert_eq!(elements[1]["title"], json!("Hoodie"));
    assert_eq!(
        elements[1]["item_url"],
        json!("https://bot.example.org/products/hoodie")
    );
}

#[tokio::test]
async fn share_call_buttons() {
    let body = post("/share-call-buttons").await;
    let buttons = &body["messages"][0]["attachment"]["payload"]["elements"][0]["buttons"];
    assert_eq!(
        buttons,
        &json!([
            { "type": "element_share" },
            { "type": "phone_number", "title": "Call us", "phone_number": "+15551234567" }
        ])
    );
}

#[tokio::test]
async fn link_block_uses_configured_blocks() {
    let body = post("/link-block").await;
    let payload = &body["messages"][0]["attachment"]["payload"];
    assert_eq!(payload["template_type"], json!("button"));
    assert_eq!(payload["text"], json!("Where do you want to go?"));
    assert_eq!(payload["buttons"][0]["block_names"], json!(["Welcome"]));
    assert_eq!(payload["buttons"][1]["block_names"], json!(["Welcome", "Menu"]));
}

#[tokio::test]
async fn quick_reply_offers_block_and_postback() {
    let body = post("/quick-reply").await;
    assert_eq!(
        body["messages"][0],
        json!({
            "text": "Did you like the demo?",
            "quick_replies": [
                { "title": "Yes", "block_names": ["Welcome"] },
                {
                    "title": "No",
                    "url": "https://bot.example.org/postback",
                    "type": "json_plugin_url"
                }
            ]
        })
    );
}

#[tokio::test]
async fn postback_echoes_name() {
    let body = post("/postback?first_name=Grace").await;
    assert_eq!(body["messages"][0]["text"], json!("Got your postback, Grace."));
}

#[tokio::test]
async fn set_attributes_with_and_without_message() {
    let body = post("/set-attributes?plan=pro").await;
    assert_eq!(
        body,
        json!({
            "messages": [{ "text": "Your plan is now `pro`." }],
            "set_attributes": { "plan": "pro", "plan_source": "json_plugin" }
        })
    );

    let body = post("/set-attributes-silently").await;
    assert_eq!(
        body,
        json!({
            "messages": [],
            "set_attributes": { "plan": "free", "plan_source": "json_plugin" }
        })
    );
}

#[tokio::test]
async fn health_and_wrong_method() {
    let (status, body) = call("GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));

    let (status, _) = call("GET", "/text-messages").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn builder_failure_maps_to_422() {
    // A 400-character first name pushes the greeting past the text limit.
    let uri = format!("/text-messages?first_name={}", "a".repeat(400));
    let (status, body) = call("POST", &uri).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], json!("text_too_long"));
}
