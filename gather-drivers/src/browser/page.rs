use std::time::Duration;

use anyhow::{Context, Result};
use fantoccini::Client;
use tracing::{debug, info};

/// A loaded page in an open WebDriver session.
pub struct GatherPage {
    pub(crate) client: Client,
}

impl GatherPage {
    /// Construct a page wrapper around an existing WebDriver client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Navigate to `url`.
    pub async fn goto(&mut self, url: &str) -> Result<()> {
        info!(target: "gather.driver", %url, "navigating");
        self.client
            .goto(url)
            .await
            .with_context(|| format!("failed to load {url}"))?;
        Ok(())
    }

    /// Wait a fixed duration so client-side rendering can fill in the listing.
    pub async fn settle(&self, wait: Duration) {
        if wait.is_zero() {
            return;
        }
        debug!(target: "gather.driver", secs = wait.as_secs_f64(), "waiting for page to settle");
        tokio::time::sleep(wait).await;
    }

    /// Return the full page HTML source.
    pub async fn get_content(&self) -> Result<String> {
        self.client
            .source()
            .await
            .context("failed to read page source")
    }

    /// Return the page title.
    pub async fn get_title(&self) -> Result<String> {
        self.client.title().await.map_err(anyhow::Error::from)
    }

    /// Return the current page URL (after any redirects).
    pub async fn get_url(&self) -> Result<String> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(anyhow::Error::from)
    }
}
