//! Configuration for the EWGX content tools.
//!
//! Defaults, an optional TOML file, and `EWGX_*` environment variables are
//! layered with figment (later wins). The result is validated once and then
//! translated into `ewgx_api::TransportConfig` and a listen address.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use ewgx_api::{TlsMode, TransportConfig};

/// Directus instance the website is served from.
pub const DEFAULT_CMS_URL: &str = "https://ewgx.steltner.cc";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub cms: CmsConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Connection to the Directus backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CmsConfig {
    /// Origin serving both `/items` and `/assets`.
    #[serde(default = "default_cms_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Extra CA certificate (PEM) to trust.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<PathBuf>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            url: default_cms_url(),
            timeout: default_timeout(),
            ca: None,
        }
    }
}

/// The contact submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_cms_url() -> String {
    DEFAULT_CMS_URL.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_listen() -> String {
    "127.0.0.1:4321".into()
}

impl Config {
    /// Check every field that is parsed later, so failures surface at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cms_url()?;
        self.listen_addr()?;
        if self.cms.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "cms.timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Ok(())
    }

    /// The CMS origin as an absolute http(s) URL.
    pub fn cms_url(&self) -> Result<Url, ConfigError> {
        let url: Url = self.cms.url.parse().map_err(|_| ConfigError::Validation {
            field: "cms.url".into(),
            reason: format!("invalid URL: {}", self.cms.url),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::Validation {
                field: "cms.url".into(),
                reason: format!("expected http or https, got '{other}'"),
            }),
        }
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .listen
            .parse()
            .map_err(|_| ConfigError::Validation {
                field: "server.listen".into(),
                reason: format!("expected host:port, got '{}'", self.server.listen),
            })
    }

    /// Transport settings for `ewgx_api` clients.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self
                .cms
                .ca
                .clone()
                .map_or(TlsMode::System, TlsMode::CustomCa),
            timeout: Duration::from_secs(self.cms.timeout),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("de", "ewgx", "ewgx").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("ewgx");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// The layered provider stack: defaults < TOML file < `EWGX_*` env.
///
/// `EWGX_CMS_URL` maps to `cms.url`, `EWGX_SERVER_LISTEN` to `server.listen`.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("EWGX_").split("_"))
}

/// Load and validate config from `path` (or the platform default) + env.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    let config: Config = figment(&path).extract()?;
    config.validate()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
