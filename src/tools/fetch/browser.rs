use super::types::{RawContent, ReadyCondition};
use super::Fetcher;
use crate::error::{FetchError, ShelfError};
use crate::selectors::ANY_ITEM_CSS;
use crate::types::CrawlOptions;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

const POLL_INTERVAL_MS: u64 = 250;

const LAUNCH_ARGS: [&str; 6] = [
    "--disable-blink-features=AutomationControlled",
    "--disable-extensions",
    "--disable-dev-shm-usage",
    "--no-sandbox",
    "--window-size=1920,1080",
    "--user-agent=Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
];

/// Headless Chromium backend. One browser per fetcher, one tab per fetch.
pub struct BrowserFetcher {
    browser: Browser,
    handler: JoinHandle<()>,
    ready: ReadyCondition,
}

impl BrowserFetcher {
    /// Launch a browser using the ready condition selected in `options`.
    pub async fn launch(options: &CrawlOptions) -> crate::Result<Self> {
        Self::launch_with(ReadyCondition::from_options(options)).await
    }

    pub async fn launch_with(ready: ReadyCondition) -> crate::Result<Self> {
        let config = BrowserConfig::builder()
            .args(LAUNCH_ARGS)
            .build()
            .map_err(|e| ShelfError::Config(format!("browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ShelfError::Config(format!("failed to launch browser: {e}")))?;

        let handler = tokio::spawn(async move { while handler.next().await.is_some() {} });

        Ok(Self {
            browser,
            handler,
            ready,
        })
    }

    async fn wait_ready(&self, page: &Page, url: &str) -> Result<(), FetchError> {
        match self.ready {
            ReadyCondition::Settle(wait) => {
                tokio::time::sleep(wait).await;
                Ok(())
            }
            ReadyCondition::AnyItem(timeout) => {
                let deadline = Instant::now() + timeout;
                loop {
                    if page.find_element(ANY_ITEM_CSS).await.is_ok() {
                        return Ok(());
                    }
                    if Instant::now() >= deadline {
                        return Err(FetchError::timeout(url));
                    }
                    tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
                }
            }
        }
    }

    async fn read(&self, page: &Page, url: &str) -> Result<(String, String), FetchError> {
        self.wait_ready(page, url).await?;
        let html = page
            .content()
            .await
            .map_err(|e| FetchError::render(url, format!("failed to read content: {e}")))?;
        let final_url = page
            .url()
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| url.to_string());
        Ok((final_url, html))
    }
}

impl Drop for BrowserFetcher {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

#[async_trait]
impl Fetcher for BrowserFetcher {
    fn name(&self) -> &'static str {
        "browser"
    }

    async fn fetch(&self, url: &str) -> Result<RawContent, FetchError> {
        let start = Instant::now();

        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| FetchError::network(url, format!("navigation failed: {e}")))?;

        let result = self.read(&page, url).await;
        if let Err(e) = page.close().await {
            tracing::debug!(url, error = %e, "failed to close tab");
        }
        let (final_url, html) = result?;

        Ok(RawContent {
            url: final_url,
            html,
            backend: self.name().to_string(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}
