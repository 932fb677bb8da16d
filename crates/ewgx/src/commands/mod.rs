//! Command dispatch: routes parsed CLI commands to their handlers.

pub mod asset_url;
pub mod config_cmd;
pub mod fetch;
pub mod serve;

use ewgx_api::ContentClient;
use ewgx_config::Config;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Build the content client every CMS-facing command shares.
fn content_client(config: &Config) -> Result<ContentClient, CliError> {
    let url = config.cms_url()?;
    Ok(ContentClient::new(url.as_str(), &config.transport())?)
}

/// Dispatch a parsed command.
///
/// Config commands run before any configuration is loaded, so a broken
/// value can still be inspected and replaced.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Serve(args) => {
            let config = crate::load_config(global)?;
            let content = content_client(&config)?;
            serve::handle(args, &config, content).await
        }
        Command::Fetch(args) => {
            let config = crate::load_config(global)?;
            fetch::handle(args, &content_client(&config)?, global).await
        }
        Command::AssetUrl(args) => asset_url::handle(&args, &crate::load_config(global)?),
    }
}
