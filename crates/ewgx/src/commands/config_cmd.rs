//! Config subcommand handlers.

use std::path::PathBuf;

use ewgx_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

fn target_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(ewgx_config::config_path)
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // Effective values after file, env, and --cms-url, as TOML
        ConfigCommand::Show => {
            let config = crate::load_config(global)?;
            let rendered = toml::to_string_pretty(&config)?;
            output::print_output(rendered.trim_end())
        }

        ConfigCommand::Path => output::print_output(&target_path(global).display().to_string()),

        ConfigCommand::Init { force } => {
            let path = target_path(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            ewgx_config::save_config(&Config::default(), &path)?;
            eprintln!("Wrote default configuration to {}", path.display());
            Ok(())
        }
    }
}
