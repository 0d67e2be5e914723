use std::sync::Arc;

use cfb_core::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Arc::new(Config::load()?);
    cfb_core::logging::init("cfb", cfg.log_json)?;

    tracing::info!(
        bind = %cfg.bind_addr,
        media = %cfg.media_base_url,
        blocks = ?cfg.block_links,
        "configuration loaded"
    );

    cfb_http::serve(cfg).await
}
