use std::{
    env, fs, io,
    net::SocketAddr,
    path::Path,
};

use crate::{chatfuel::button::is_well_formed_url, errors::Error, Result};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:8080";
const DEFAULT_MEDIA_BASE_URL: &str = "https://example.com/media";
const DEFAULT_BLOCK_LINKS: &str = "Welcome,Menu";

/// Typed configuration for the JSON plugin server.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,
    /// Externally reachable base URL, used for postback buttons pointing back at us.
    pub public_url: String,
    /// Base URL the demo attachments are served from.
    pub media_base_url: String,
    /// Blocks the link-block demo jumps to.
    pub block_links: Vec<String>,
    /// Emit logs as JSON lines.
    pub log_json: bool,
}

impl Config {
    /// Loads `.env` (without overriding the environment) and reads `CFB_*` variables.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"))?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).and_then(non_empty);

        let bind_raw = get("CFB_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| Error::Config(format!("CFB_BIND_ADDR `{bind_raw}`: {e}")))?;

        let public_url = checked_url(
            "CFB_PUBLIC_URL",
            get("CFB_PUBLIC_URL").unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string()),
        )?;
        let media_base_url = checked_url(
            "CFB_MEDIA_BASE_URL",
            get("CFB_MEDIA_BASE_URL").unwrap_or_else(|| DEFAULT_MEDIA_BASE_URL.to_string()),
        )?;

        let block_links =
            parse_csv(get("CFB_BLOCK_LINKS").unwrap_or_else(|| DEFAULT_BLOCK_LINKS.to_string()));
        if block_links.is_empty() {
            return Err(Error::Config(
                "CFB_BLOCK_LINKS must name at least one block".to_string(),
            ));
        }
        if let Some(bad) = block_links.iter().find(|b| b.contains(' ')) {
            return Err(Error::Config(format!(
                "CFB_BLOCK_LINKS: block name `{bad}` contains a space"
            )));
        }

        let log_json = get("CFB_LOG_JSON").map(|s| parse_bool(&s)).unwrap_or(false);

        Ok(Self {
            bind_addr,
            public_url,
            media_base_url,
            block_links,
            log_json,
        })
    }

    /// `path` resolved against the public URL.
    pub fn public_endpoint(&self, path: &str) -> String {
        join_url(&self.public_url, path)
    }

    /// `file` resolved against the media base URL.
    pub fn media_url(&self, file: &str) -> String {
        join_url(&self.media_base_url, file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            media_base_url: DEFAULT_MEDIA_BASE_URL.to_string(),
            block_links: parse_csv(DEFAULT_BLOCK_LINKS.to_string()),
            log_json: false,
        }
    }
}

fn checked_url(key: &str, value: String) -> Result<String> {
    let value = value.trim().trim_end_matches('/').to_string();
    if !is_well_formed_url(&value) {
        return Err(Error::Config(format!("{key} `{value}` is not a valid URL")));
    }
    Ok(value)
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn load_dotenv_if_present(path: &Path) -> Result<()> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        env::set_var(key, strip_quotes(v.trim()));
    }
    Ok(())
}

fn strip_quotes(v: &str) -> &str {
    if v.len() >= 2
        && ((v.starts_with('"') && v.ends_with('"')) || (v.starts_with('\'') && v.ends_with('\'')))
    {
        &v[1..v.len() - 1]
    } else {
        v
    }
}

fn parse_bool(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_csv(v: String) -> Vec<String> {
    v.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
