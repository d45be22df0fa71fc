use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use gather_common::{GatherError, Result};
use gather_config::{BrowserConfig, GatherConfig};
use gather_drivers::browser::driver::GatherDriver;
use tracing::{debug, info, warn};
use url::Url;

/// Raw HTML of one page and when it was read.
#[derive(Debug, Clone)]
pub struct PageCapture {
    pub url: Url,
    pub html: String,
    pub captured_at: DateTime<Utc>,
}

#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    async fn capture(&self, url: &Url) -> Result<PageCapture>;
}

/// Live capture through a WebDriver-controlled browser.
pub struct BrowserSource {
    browser: BrowserConfig,
    settle: Duration,
}

impl BrowserSource {
    pub fn new(browser: BrowserConfig, settle: Duration) -> Self {
        Self { browser, settle }
    }

    pub fn from_config(cfg: &GatherConfig) -> Self {
        Self::new(cfg.browser.clone(), cfg.target.settle())
    }
}

/// One open browser session: load a page, then release the browser.
#[async_trait::async_trait]
pub trait BrowserSession: Send {
    /// Navigate to `url`, wait `settle`, return the page source.
    async fn load(&mut self, url: &Url, settle: Duration) -> anyhow::Result<String>;

    async fn close(self: Box<Self>) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
impl BrowserSession for GatherDriver {
    async fn load(&mut self, url: &Url, settle: Duration) -> anyhow::Result<String> {
        let page = self.goto(url.as_str()).await?;
        page.settle(settle).await;

        let landed = page.get_url().await?;
        if landed != url.as_str() {
            debug!(target: "gather.capture", requested = %url, %landed, "page redirected");
        }
        let title = page.get_title().await?;
        debug!(target: "gather.capture", %title, "page settled");

        page.get_content().await
    }

    async fn close(self: Box<Self>) -> anyhow::Result<()> {
        GatherDriver::close(*self).await
    }
}

#[async_trait::async_trait]
impl PageSource for BrowserSource {
    async fn capture(&self, url: &Url) -> Result<PageCapture> {
        let driver = GatherDriver::new(&self.browser).await?;
        capture_in_session(Box::new(driver), url, self.settle).await
    }
}

/// Load `url` in `session` and close it on every path. A close failure is
/// logged and never replaces the load outcome.
pub async fn capture_in_session(
    mut session: Box<dyn BrowserSession>,
    url: &Url,
    settle: Duration,
) -> Result<PageCapture> {
    let loaded = session.load(url, settle).await;
    if let Err(err) = session.close().await {
        warn!(target: "gather.capture", error = %err, "failed to close browser session");
    }

    let html = loaded?;
    info!(target: "gather.capture", %url, bytes = html.len(), "captured page source");
    Ok(PageCapture {
        url: url.clone(),
        html,
        captured_at: Utc::now(),
    })
}

/// Replays a page saved to disk instead of launching a browser.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl PageSource for FileSource {
    async fn capture(&self, url: &Url) -> Result<PageCapture> {
        let html = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| GatherError::output(&self.path, e))?;
        if html.trim().is_empty() {
            return Err(GatherError::Capture(format!(
                "{} is empty",
                self.path.display()
            )));
        }
        info!(target: "gather.capture", path = %self.path.display(), %url, "replaying saved page");
        Ok(PageCapture {
            url: url.clone(),
            html,
            captured_at: Utc::now(),
        })
    }
}
