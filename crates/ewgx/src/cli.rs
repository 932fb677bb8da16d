//! Clap derive structures for the `ewgx` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use ewgx_api::Fit;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ewgx -- content backend tools for the Eine Welt Gruppe Xanten website
#[derive(Debug, Parser)]
#[command(
    name = "ewgx",
    version,
    about = "Serve the contact endpoint and inspect website content",
    long_about = "Tools around the Directus instance behind the Eine Welt Gruppe Xanten website.\n\n\
        `serve` runs the contact form endpoint; `fetch` and `asset-url` show\n\
        exactly what the site would render from the CMS.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "EWGX_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// CMS origin (overrides config and EWGX_CMS_URL)
    #[arg(long, global = true)]
    pub cms_url: Option<String>,

    /// Output format
    #[arg(long, short = 'o', default_value = "json", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the contact submission endpoint (POST /api/kontakt)
    Serve(ServeArgs),

    /// Read one content resource the way the website does
    Fetch(FetchArgs),

    /// Print the public URL of a CMS asset
    AssetUrl(AssetUrlArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),
}

// ── Serve ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind (overrides server.listen)
    #[arg(long, short = 'l')]
    pub listen: Option<String>,
}

// ── Fetch ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Resource to read
    pub resource: Resource,

    /// Slug of the post (required for `blog-post`)
    #[arg(long)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Resource {
    HeroSlides,
    StoreInfo,
    Organizations,
    AboutPage,
    CoreValues,
    HistoryTimeline,
    Beliefs,
    StaffMembers,
    StaffPageHeader,
    BlogPosts,
    BlogPageHeader,
    BlogPost,
}

// ── Asset URL ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AssetUrlArgs {
    /// Directus file id
    pub file_id: String,

    /// Target width in pixels
    #[arg(long, short = 'W')]
    pub width: Option<u32>,

    /// Target height in pixels
    #[arg(long, short = 'H')]
    pub height: Option<u32>,

    /// Resize mode: cover, contain, inside, outside
    #[arg(long)]
    pub fit: Option<Fit>,

    /// Encoder quality, 1-100
    #[arg(long, short = 'q', value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
