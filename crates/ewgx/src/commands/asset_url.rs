//! `ewgx asset-url`: build a public asset URL without touching the network.

use ewgx_api::AssetTransform;
use ewgx_config::Config;

use crate::cli::AssetUrlArgs;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &AssetUrlArgs, config: &Config) -> Result<(), CliError> {
    let base = config.cms_url()?;
    let url = ewgx_api::asset_url(&base, &args.file_id, &transform(args));
    output::print_output(&url)
}

fn transform(args: &AssetUrlArgs) -> AssetTransform {
    let mut t = AssetTransform::new();
    if let Some(width) = args.width {
        t = t.width(width);
    }
    if let Some(height) = args.height {
        t = t.height(height);
    }
    if let Some(fit) = args.fit {
        t = t.fit(fit);
    }
    if let Some(quality) = args.quality {
        t = t.quality(quality);
    }
    t
}
