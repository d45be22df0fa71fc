use std::path::PathBuf;

use clap::Parser;
use gather_common::observability::LogFormat;
use gather_config::GatherConfig;
use url::Url;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "gather.yaml";

#[derive(Parser, Debug)]
#[command(name = "gather", about = "Snapshot a community event listing to JSON")]
pub struct Cli {
    /// Configuration file (YAML/TOML/JSON). Must exist when given.
    #[arg(short, long, env = "GATHER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listing page to load
    #[arg(long)]
    pub url: Option<Url>,

    /// Snapshot file to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Seconds to wait after navigation before reading the page
    #[arg(long)]
    pub settle_secs: Option<u64>,

    /// Scrape a saved HTML file instead of launching a browser
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Write a snapshot even if the page had no event containers
    #[arg(long)]
    pub write_empty: bool,

    /// Log encoding: text or json
    #[arg(long)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Flags win over file and environment values.
    pub fn apply(&self, cfg: &mut GatherConfig) {
        if let Some(url) = &self.url {
            cfg.target.url = url.clone();
        }
        if let Some(path) = &self.output {
            cfg.output.path = path.clone();
        }
        if let Some(secs) = self.settle_secs {
            cfg.target.settle_secs = secs;
        }
        if self.headed {
            cfg.browser.headless = false;
        }
        if self.write_empty {
            cfg.output.write_empty = true;
        }
        if let Some(format) = self.log_format {
            cfg.logging.format = format;
        }
    }
}
