use anyhow::{Context, Result};
use clap::Parser;
use gather_common::observability::init_logging;
use gather_config::{GatherConfig, GatherConfigLoader};
use gather_events::output::write_report;
use gather_events::{BrowserSource, FileSource, PageSource, ScrapeReport, Scraper, Timestamp};
use tracing::{debug, info};

use cli::{Cli, DEFAULT_CONFIG_FILE};
mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Config: file, then env, then flags
    let loader = match &cli.config {
        Some(path) => GatherConfigLoader::new().with_file(path),
        None => GatherConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    };
    let mut cfg = loader.load().context("failed to load configuration")?;
    cli.apply(&mut cfg);

    // 2) Logging
    let log_path = init_logging(cfg.logging.to_log_config("gather"))?;
    debug!(log = %log_path.display(), "logging initialised");

    // 3) Capture + extract
    let stamp = Timestamp::new(cfg.output.timestamp_format.clone())?;
    let report = match &cli.html {
        Some(path) => scrape(FileSource::new(path), stamp, &cfg).await?,
        None => scrape(BrowserSource::from_config(&cfg), stamp, &cfg).await?,
    };

    // 4) Snapshot
    let path = &cfg.output.path;
    if write_report(path, &report, cfg.output.write_empty)? {
        info!(
            events = report.result.events.len(),
            path = %path.display(),
            "done"
        );
    }
    Ok(())
}

async fn scrape<S: PageSource>(
    source: S,
    stamp: Timestamp,
    cfg: &GatherConfig,
) -> Result<ScrapeReport> {
    let url = &cfg.target.url;
    Scraper::new(source, stamp)
        .run(url)
        .await
        .with_context(|| format!("failed to scrape {url}"))
}
