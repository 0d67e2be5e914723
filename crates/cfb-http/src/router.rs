use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use cfb_core::config::Config;

use crate::handlers;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
}

impl AppState {
    pub fn new(cfg: Arc<Config>) -> Self {
        Self { cfg }
    }
}

/// All plugin endpoints. Chatfuel calls them with `POST` and the user's
/// attributes in the query string.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Plain messages and attachments
        .route("/text-messages", post(handlers::text::send_text_messages))
        .route("/image-attachment", post(handlers::media::send_image))
        .route("/video-attachment", post(handlers::media::send_video))
        .route("/audio-attachment", post(handlers::media::send_audio))
        // Templates
        .route(
            "/card-with-buttons",
            post(handlers::cards::send_card_with_buttons),
        )
        .route("/gallery", post(handlers::cards::send_gallery))
        .route(
            "/share-call-buttons",
            post(handlers::cards::send_share_call_buttons),
        )
        // Flow control
        .route("/link-block", post(handlers::blocks::link_block))
        .route("/quick-reply", post(handlers::blocks::quick_reply))
        .route("/postback", post(handlers::blocks::postback))
        // User attributes
        .route("/set-attributes", post(handlers::attributes::set_attributes))
        .route(
            "/set-attributes-silently",
            post(handlers::attributes::set_attributes_silently),
        )
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `cfg.bind_addr` and serves until Ctrl-C.
pub async fn serve(cfg: Arc<Config>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(cfg.bind_addr).await?;
    tracing::info!(addr = %cfg.bind_addr, public_url = %cfg.public_url, "cfb listening");

    axum::serve(listener, build_router(AppState::new(cfg)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("cfb stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
