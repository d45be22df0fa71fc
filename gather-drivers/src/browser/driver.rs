use crate::browser::{options::build_capabilities, page::GatherPage};
use anyhow::{Context, Result};
use fantoccini::{Client, ClientBuilder};
use gather_config::BrowserConfig;
use tracing::{debug, info};

/// Thin wrapper around a `fantoccini` WebDriver client.
pub struct GatherDriver {
    pub client: Client,
}

impl GatherDriver {
    /// Open a new browser session on the configured WebDriver endpoint
    /// (chromedriver at `http://localhost:9515` by default).
    pub async fn new(config: &BrowserConfig) -> Result<Self> {
        let endpoint = config.webdriver_url.as_str();
        debug!(target: "gather.driver", %endpoint, headless = config.headless, "starting session");

        let client = ClientBuilder::native()
            .capabilities(build_capabilities(config))
            .connect(endpoint)
            .await
            .with_context(|| format!("failed to start a WebDriver session at {endpoint}"))?;

        info!(target: "gather.driver", %endpoint, "browser session started");
        Ok(Self { client })
    }

    /// Navigate to `url` and return the loaded [`GatherPage`].
    pub async fn goto(&mut self, url: &str) -> Result<GatherPage> {
        let mut page = GatherPage::new(self.client.clone());
        page.goto(url).await?;
        Ok(page)
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client
            .close()
            .await
            .context("failed to close browser session")?;
        debug!(target: "gather.driver", "browser session closed");
        Ok(())
    }
}
