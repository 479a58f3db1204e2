mod client;
mod headers;
mod http;
mod pacing;
mod utils;

#[cfg(feature = "browser")]
mod browser;


pub mod types;

pub use http::HttpFetcher;
pub use pacing::{NoPacing, Pacing, RandomPacing};
pub use types::*;

#[cfg(feature = "browser")]
pub use browser::BrowserFetcher;

use crate::error::FetchError;
use crate::types::{Backend, CrawlOptions};
use async_trait::async_trait;

/// Capability to turn a URL into raw page content.
///
/// Backends differ only in how they get the markup; detection, extraction
/// and pagination never look past this trait. A fetcher does not retry and
/// does not pace; the walker owns both.
#[async_trait]
pub trait Fetcher: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, url: &str) -> Result<RawContent, FetchError>;
}

/// Build the fetcher selected by `options.backend`.
///
/// # Examples
/// ```no_run
/// use shelfscrape::tools::fetch::build_fetcher;
/// use shelfscrape::CrawlOptions;
///
/// # async fn example() -> shelfscrape::Result<()> {
/// let fetcher = build_fetcher(&CrawlOptions::default()).await?;
/// let page = fetcher.fetch("https://www.amazon.com/gp/bestsellers").await?;
/// println!("{} bytes via {}", page.html.len(), page.backend);
/// # Ok(())
/// # }
/// ```
pub async fn build_fetcher(options: &CrawlOptions) -> crate::Result<Box<dyn Fetcher>> {
    match options.backend {
        Backend::Http => Ok(Box::new(HttpFetcher::new(options)?)),
        #[cfg(feature = "browser")]
        Backend::Browser => Ok(Box::new(BrowserFetcher::launch(options).await?)),
        #[cfg(not(feature = "browser"))]
        Backend::Browser => Err(crate::error::ShelfError::Config(
            "browser backend requires the `browser` feature".to_string(),
        )),
    }
}

/// Pacing for a crawl: randomized per `options.pacing`, or none.
pub fn pacing_for(options: &CrawlOptions, enabled: bool) -> Box<dyn Pacing> {
    if enabled {
        Box::new(RandomPacing::new(options.pacing))
    } else {
        Box::new(NoPacing)
    }
}
