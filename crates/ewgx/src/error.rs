//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

use ewgx_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────

    #[error("Invalid configuration")]
    #[diagnostic(
        code(ewgx::config),
        help(
            "Check the config file (ewgx config path) and EWGX_* environment variables.\n\
             Write a fresh one with: ewgx config init --force"
        )
    )]
    Config(#[from] ConfigError),

    #[error("Config file already exists at {path}")]
    #[diagnostic(
        code(ewgx::config_exists),
        help("Pass --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ewgx::validation))]
    Validation { field: String, reason: String },

    // ── CMS ──────────────────────────────────────────────────────────

    #[error("Could not set up the CMS client")]
    #[diagnostic(code(ewgx::cms))]
    Api(#[from] ewgx_api::Error),

    // ── Server ───────────────────────────────────────────────────────

    #[error("Could not listen on {addr}")]
    #[diagnostic(
        code(ewgx::bind),
        help("Another process may be using the port. Pick one with --listen.")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // ── Output / IO ──────────────────────────────────────────────────

    #[error("Failed to render JSON output")]
    #[diagnostic(code(ewgx::output))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML output")]
    #[diagnostic(code(ewgx::output))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to render TOML output")]
    #[diagnostic(code(ewgx::output))]
    Toml(#[from] toml::ser::Error),

    #[error(transparent)]
    #[diagnostic(code(ewgx::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map each variant to its process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(ConfigError::Validation { .. })
            | Self::Validation { .. }
            | Self::ConfigExists { .. } => exit_code::USAGE,
            Self::Api(e) if e.is_transient() => exit_code::CONNECTION,
            Self::Bind { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}
