//! Pagination Walker
//!
//! Fetch a page, extract it, follow its "next" link, repeat. The walk is
//! sequential: page N's next link is only known once page N is parsed.
//!
//! Termination:
//! - no next link → `Done(NoNextLink)`
//! - next link already fetched → `Done(CycleDetected)`
//! - `max_pages` reached → `Done(BudgetExhausted)`
//! - cancelled between pages or during a retry wait → `Done(Cancelled)`
//! - fetch error after retries → `Failed` on the first page (unless it timed
//!   out), otherwise `Done(FetchFailed)` with earlier pages kept

mod retry;
mod utils;


pub mod types;

pub use types::*;
pub use utils::{extract_page, find_next_page, PageExtraction};

use crate::error::{CrawlError, FetchError};
use crate::tools::aggregate::Dataset;
use crate::tools::fetch::{build_fetcher, Fetcher, Pacing, RandomPacing, RawContent};
use crate::types::CrawlOptions;
use retry::backoff_delay;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

/// How one page visit ended, retries included.
enum Visit {
    Fetched(RawContent),
    Failed(FetchError),
    Cancelled,
}

/// Drives one crawl over a fetcher. Holds no crawl state between walks.
pub struct Walker<'a, F: Fetcher + ?Sized> {
    fetcher: &'a F,
    pacing: &'a dyn Pacing,
    options: CrawlOptions,
    origin: Option<Url>,
    cancel: CancellationToken,
}

impl<'a, F: Fetcher + ?Sized> Walker<'a, F> {
    pub fn new(fetcher: &'a F, pacing: &'a dyn Pacing, options: CrawlOptions) -> Self {
        let origin = options.origin.as_deref().and_then(|o| match Url::parse(o) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(origin = o, error = %e, "ignoring invalid origin");
                None
            }
        });
        Self {
            fetcher,
            pacing,
            options,
            origin,
            cancel: CancellationToken::new(),
        }
    }

    /// Stop between pages once `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub async fn walk(&self, start_url: &str) -> CrawlOutcome {
        let start = match Url::parse(start_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => url,
            _ => {
                return CrawlOutcome::Failed {
                    error: CrawlError::InvalidUrl(start_url.to_string()),
                    partial: Dataset::new(),
                    pages: Vec::new(),
                }
            }
        };

        info!(url = %start, fetcher = self.fetcher.name(), max_pages = self.options.max_pages, "crawl started");
        let mut state = CrawlState::new(start);

        loop {
            if state.page_count() >= self.options.max_pages {
                info!(pages = state.page_count(), "page budget exhausted");
                return CrawlOutcome::done(state, StopReason::BudgetExhausted);
            }

            let paced = if state.page_count() == 0 {
                !self.cancel.is_cancelled()
            } else {
                self.sleep_unless_cancelled(self.pacing.delay()).await
            };
            if !paced {
                info!(pages = state.page_count(), "crawl cancelled");
                return CrawlOutcome::done(state, StopReason::Cancelled);
            }

            let url = state.current.clone();
            state.mark_visited(&url);
            let (visit, attempts) = self.fetch_with_retries(url.as_str()).await;

            let raw = match visit {
                Visit::Fetched(raw) => raw,
                Visit::Failed(error) => return self.fetch_failed(state, url, error, attempts),
                Visit::Cancelled => {
                    info!(url = %url, attempts, "crawl cancelled while retrying");
                    return CrawlOutcome::done(state, StopReason::Cancelled);
                }
            };

            let page_url = Url::parse(&raw.url).unwrap_or_else(|_| url.clone());
            if page_url != url {
                // Redirect target counts as fetched too.
                state.mark_visited(&page_url);
            }

            let page = extract_page(&raw.html, &page_url, self.origin.as_ref());
            let warnings: usize = page.records.iter().map(|r| r.warnings().len()).sum();
            if page.schema.is_none() {
                debug!(url = %page_url, "no known listing schema on page");
            }
            info!(
                page = state.page_count() + 1,
                url = %page_url,
                schema = ?page.schema,
                records = page.records.len(),
                warnings,
                "page extracted"
            );

            state.pages.push(PageReport {
                url: page_url.to_string(),
                schema: page.schema,
                records: page.records.len(),
                warnings,
                attempts,
                error: None,
            });
            state.dataset.push_page(page.records);

            match page.next {
                None => {
                    info!(pages = state.page_count(), records = state.dataset.len(), "no next link, crawl done");
                    return CrawlOutcome::done(state, StopReason::NoNextLink);
                }
                Some(next) if state.is_visited(&next) => {
                    info!(url = %next, "next link already visited, crawl done");
                    return CrawlOutcome::done(
                        state,
                        StopReason::CycleDetected {
                            url: next.to_string(),
                        },
                    );
                }
                Some(next) => state.current = next,
            }
        }
    }

    fn fetch_failed(
        &self,
        mut state: CrawlState,
        url: Url,
        error: FetchError,
        attempts: u32,
    ) -> CrawlOutcome {
        state.pages.push(PageReport {
            url: url.to_string(),
            schema: None,
            records: 0,
            warnings: 0,
            attempts,
            error: Some(error.to_string()),
        });

        if state.successful_pages() == 0 && !error.is_timeout() {
            warn!(url = %url, error = %error, "first page failed, nothing to salvage");
            return CrawlOutcome::failed(state, CrawlError::FirstPage(error));
        }

        warn!(
            url = %url,
            error = %error,
            kept = state.dataset.len(),
            "page failed, ending crawl with partial result"
        );
        let reason = StopReason::from(&error);
        CrawlOutcome::done(state, reason)
    }

    /// Fetch with up to `page_retries` extra attempts. Returns the attempt count.
    ///
    /// A retry is another request to the same site, so it waits at least the
    /// pacing delay as well as the backoff.
    async fn fetch_with_retries(&self, url: &str) -> (Visit, u32) {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.fetcher.fetch(url).await {
                Ok(raw) => return (Visit::Fetched(raw), attempt),
                Err(e) if attempt > self.options.page_retries => return (Visit::Failed(e), attempt),
                Err(e) => {
                    let backoff = backoff_delay(self.options.retry_base_delay_ms, attempt);
                    let delay = self.pacing.delay().max(backoff);
                    warn!(url, attempt, error = %e, delay_ms = delay.as_millis() as u64, "fetch failed, retrying");
                    if !self.sleep_unless_cancelled(delay).await {
                        return (Visit::Cancelled, attempt);
                    }
                }
            }
        }
    }

    /// Sleep for `delay`; false if cancelled first.
    async fn sleep_unless_cancelled(&self, delay: Duration) -> bool {
        if delay.is_zero() {
            return !self.cancel.is_cancelled();
        }
        tokio::select! {
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(delay) => true,
        }
    }
}

/// Crawl `url` with the backend and pacing from `options`.
///
/// Builds a fresh fetcher, so concurrent calls share no state.
///
/// # Examples
/// ```no_run
/// use shelfscrape::{crawl, CrawlOptions};
///
/// # async fn example() -> shelfscrape::Result<()> {
/// let outcome = crawl("https://www.amazon.com/Best-Sellers/zgbs/pc", &CrawlOptions::default()).await?;
/// println!("{}", outcome.summary());
/// print!("{}", outcome.dataset().to_csv_string()?);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(url: &str, options: &CrawlOptions) -> crate::Result<CrawlOutcome> {
    let fetcher = build_fetcher(options).await?;
    let pacing = RandomPacing::new(options.pacing);
    Ok(Walker::new(fetcher.as_ref(), &pacing, options.clone())
        .walk(url)
        .await)
}
