use crate::error::{CrawlError, FetchError};
use crate::tools::aggregate::Dataset;
use crate::types::SchemaKind;
use serde::Serialize;
use std::collections::HashSet;
use url::Url;

/// Why a crawl ended successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StopReason {
    /// The last page had no "next" link.
    NoNextLink,
    /// The "next" link pointed at a page already fetched.
    CycleDetected { url: String },
    /// `max_pages` pages were fetched.
    BudgetExhausted,
    /// The caller cancelled between pages.
    Cancelled,
    /// A page failed after retries; earlier pages are kept.
    FetchFailed { error: String },
}

/// What happened on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReport {
    pub url: String,
    /// `None` when no known schema matched (zero items, not an error).
    pub schema: Option<SchemaKind>,
    pub records: usize,
    /// Sentinel fields on this page.
    pub warnings: usize,
    pub attempts: u32,
    pub error: Option<String>,
}

/// Working state of one walk. Owned by that walk and dropped with it.
#[derive(Debug)]
pub struct CrawlState {
    pub current: Url,
    visited: Vec<String>,
    seen: HashSet<String>,
    pub dataset: Dataset,
    pub pages: Vec<PageReport>,
}

impl CrawlState {
    pub fn new(start: Url) -> Self {
        Self {
            current: start,
            visited: Vec::new(),
            seen: HashSet::new(),
            dataset: Dataset::new(),
            pages: Vec::new(),
        }
    }

    /// Record a fetch of `url`. Returns false if it was already fetched.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        let key = visit_key(url);
        if self.seen.insert(key.clone()) {
            self.visited.push(key);
            true
        } else {
            false
        }
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.seen.contains(&visit_key(url))
    }

    /// Visited URLs in fetch order.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// Pages attempted so far, failed ones included.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn successful_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.error.is_none()).count()
    }
}

/// Fragments never change the page, so they do not make a URL new.
fn visit_key(url: &Url) -> String {
    let mut key = url.clone();
    key.set_fragment(None);
    key.to_string()
}

/// Terminal state of a walk. Both variants keep whatever was collected.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CrawlOutcome {
    Done {
        dataset: Dataset,
        reason: StopReason,
        pages: Vec<PageReport>,
    },
    Failed {
        #[serde(serialize_with = "error_string")]
        error: CrawlError,
        partial: Dataset,
        pages: Vec<PageReport>,
    },
}

fn error_string<S: serde::Serializer>(error: &CrawlError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&error.to_string())
}

impl CrawlOutcome {
    pub(crate) fn done(state: CrawlState, reason: StopReason) -> Self {
        Self::Done {
            dataset: state.dataset,
            reason,
            pages: state.pages,
        }
    }

    pub(crate) fn failed(state: CrawlState, error: CrawlError) -> Self {
        Self::Failed {
            error,
            partial: state.dataset,
            pages: state.pages,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done { .. })
    }

    /// Records collected, complete or partial.
    pub fn dataset(&self) -> &Dataset {
        match self {
            Self::Done { dataset, .. } => dataset,
            Self::Failed { partial, .. } => partial,
        }
    }

    pub fn pages(&self) -> &[PageReport] {
        match self {
            Self::Done { pages, .. } | Self::Failed { pages, .. } => pages,
        }
    }

    pub fn error(&self) -> Option<&CrawlError> {
        match self {
            Self::Done { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        match self {
            Self::Done { dataset, reason, pages } => format!(
                "done: {} records from {} pages ({})",
                dataset.len(),
                pages.len(),
                describe_reason(reason)
            ),
            Self::Failed { error, partial, .. } => {
                format!("failed: {} ({} partial records)", error, partial.len())
            }
        }
    }

    pub fn into_result(self) -> Result<Dataset, (CrawlError, Dataset)> {
        match self {
            Self::Done { dataset, .. } => Ok(dataset),
            Self::Failed { error, partial, .. } => Err((error, partial)),
        }
    }
}

fn describe_reason(reason: &StopReason) -> String {
    match reason {
        StopReason::NoNextLink => "no next link".to_string(),
        StopReason::CycleDetected { url } => format!("next link already visited: {url}"),
        StopReason::BudgetExhausted => "page budget exhausted".to_string(),
        StopReason::Cancelled => "cancelled".to_string(),
        StopReason::FetchFailed { error } => format!("stopped after fetch error: {error}"),
    }
}

impl From<&FetchError> for StopReason {
    fn from(error: &FetchError) -> Self {
        StopReason::FetchFailed {
            error: error.to_string(),
        }
    }
}
