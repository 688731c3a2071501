mod input;
mod render;
mod runtime;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use envsnap_core::tracing_setup::init_tracing;
use envsnap_core::{FeedConfig, FeedRuntime};
use tracing::info;

use crate::runtime::run_app;
use ui::{App, ListOrder, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "envsnap-tui")]
#[command(about = "Terminal viewer for an environmental snapshot feed")]
struct Args {
    /// JSON config file (feedUrl, mockFile, pollIntervalMs, ...)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Feed URL, overrides the config file and ENVSNAP_FEED_URL
    #[arg(long, conflicts_with_all = ["mock_file", "demo"])]
    url: Option<String>,

    /// Read the feed from a local JSON file instead of the network
    #[arg(long, conflicts_with = "demo")]
    mock_file: Option<PathBuf>,

    /// Use the built-in demo data
    #[arg(long)]
    demo: bool,

    /// List the oldest event first
    #[arg(long)]
    oldest_first: bool,

    /// Light color theme
    #[arg(long)]
    light: bool,
}

impl Args {
    fn feed_config(&self) -> Result<FeedConfig> {
        let mut config = match self.config.as_deref() {
            Some(path) => FeedConfig::load(path)?,
            None => FeedConfig::default(),
        }
        .with_env_overrides();

        if let Some(url) = self.url.as_ref() {
            config.feed_url = Some(url.clone());
        }
        if let Some(path) = self.mock_file.as_ref() {
            config.feed_url = None;
            config.mock_file = Some(path.clone());
        }
        if self.demo {
            config.feed_url = None;
            config.mock_file = None;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.feed_config()?;

    // File logging only; the terminal belongs to the UI
    init_tracing()?;

    let mut feed = FeedRuntime::from_config(&config)?;
    info!(source = %feed.source_label(), "starting viewer");

    let order = if args.oldest_first {
        ListOrder::OldestFirst
    } else {
        ListOrder::NewestFirst
    };
    let theme = if args.light {
        ThemeMode::Light
    } else {
        ThemeMode::Dark
    };
    let mut app = App::new(order, theme, feed.source_label());

    ui::terminal::install_panic_hook();
    let mut terminal = ui::init_terminal()?;

    feed.refresh("Initial load");
    let result = run_app(&mut terminal, &mut app, &mut feed).await;

    ui::restore_terminal()?;
    result
}
