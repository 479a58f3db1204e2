//! Batch Tools
//!
//! Run several independent crawls at once. Each job brings its own fetcher,
//! so jobs share no session state; only pacing config and the cancellation
//! signal are common.

mod tests;

use crate::tools::fetch::{Fetcher, Pacing};
use crate::tools::walk::{CrawlOutcome, Walker};
use crate::types::CrawlOptions;
use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;

/// One crawl to run: a label for reporting, a start URL, and its fetcher.
pub struct CrawlJob {
    pub label: String,
    pub url: String,
    pub fetcher: Box<dyn Fetcher>,
}

impl CrawlJob {
    pub fn new(label: impl Into<String>, url: impl Into<String>, fetcher: Box<dyn Fetcher>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            fetcher,
        }
    }
}

/// Result of one job, tagged with its label and start URL.
#[derive(Debug)]
pub struct JobOutcome {
    pub label: String,
    pub url: String,
    pub outcome: CrawlOutcome,
}

/// Run `jobs` with at most `concurrency` in flight. Outcomes come back in
/// job order. Cancelling `cancel` stops every job at its next page boundary.
pub async fn crawl_all(
    jobs: Vec<CrawlJob>,
    concurrency: usize,
    pacing: &dyn Pacing,
    options: &CrawlOptions,
    cancel: &CancellationToken,
) -> Vec<JobOutcome> {
    stream::iter(jobs)
        .map(|job| {
            let token = cancel.child_token();
            async move {
                let outcome = Walker::new(job.fetcher.as_ref(), pacing, options.clone())
                    .with_cancellation(token)
                    .walk(&job.url)
                    .await;
                tracing::info!(job = %job.label, "{}", outcome.summary());
                JobOutcome {
                    label: job.label,
                    url: job.url,
                    outcome,
                }
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}
