use std::path::PathBuf;

use crate::prelude::*;
use clap::Parser;
use outline::{LayoutConfig, Profile, TitleStrategy};

mod batch;
mod error;
mod extract;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Infer a document's title and H1-H3 outline from extracted text spans"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Layout configuration file (TOML); replaces the profile defaults
    #[clap(long, env = "DOCOUTLINE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Extractor profile
    #[clap(long, env = "DOCOUTLINE_PROFILE", global = true, default_value = "standard")]
    profile: ProfileArg,

    /// Title selection strategy (overrides profile and config file)
    #[clap(long, env = "DOCOUTLINE_STRATEGY", global = true)]
    strategy: Option<StrategyArg>,

    /// Whether to display additional information.
    #[clap(long, env = "DOCOUTLINE_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ProfileArg {
    /// Vertical merging only, single-block title scoring
    Standard,
    /// Aligned merging, hyphenation repair, grouped title scoring
    Multilingual,
}

impl From<ProfileArg> for Profile {
    fn from(p: ProfileArg) -> Self {
        match p {
            ProfileArg::Standard => Profile::Standard,
            ProfileArg::Multilingual => Profile::Multilingual,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StrategyArg {
    /// Score each block on its own
    Block,
    /// Group adjacent title fragments before scoring
    Grouped,
}

impl From<StrategyArg> for TitleStrategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::Block => TitleStrategy::Block,
            StrategyArg::Grouped => TitleStrategy::Grouped,
        }
    }
}

impl Global {
    /// Resolve the layout configuration: config file if given, profile
    /// defaults otherwise, then the strategy override.
    pub fn layout_config(&self) -> Result<LayoutConfig> {
        let mut config = match &self.config {
            Some(path) => LayoutConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => LayoutConfig::for_profile(self.profile.into()),
        };

        if let Some(strategy) = self.strategy {
            config.title.strategy = strategy.into();
        }

        log::debug!("layout config: {:?}", config);
        Ok(config)
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Extract title and outline from one span dump
    Extract(crate::extract::ExtractOptions),

    /// Process every span dump in a directory
    Batch(crate::batch::BatchOptions),
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = App::parse();
    init_logging(app.global.verbose);

    match app.command {
        SubCommands::Extract(options) => crate::extract::run(options, app.global).await,
        SubCommands::Batch(options) => crate::batch::run(options, app.global).await,
    }
}
