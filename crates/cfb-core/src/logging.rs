use crate::{errors::Error, Result};

/// Initialize tracing for the service.
///
/// Default: info for our crates. Can be overridden with `RUST_LOG`.
/// `json` switches the formatter to one JSON object per line.
pub fn init(service_name: &str, json: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "info,cfb=info,cfb_core=info,cfb_http=info,{service_name}=info"
        ))
    });

    let installed = if json {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .try_init()
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(true)
            .try_init()
    };

    installed.map_err(|e| Error::Config(format!("failed to install log subscriber: {e}")))
}
