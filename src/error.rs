use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShelfError>;

/// Why a single page could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The content-ready condition was never met. Browser backend only.
    #[error("timed out waiting for {url}")]
    Timeout { url: String },

    #[error("network error for {url}: {reason}")]
    Network { url: String, reason: String },

    /// Headless rendering failed (browser launch, navigation, or DOM read).
    #[error("render error for {url}: {reason}")]
    Render { url: String, reason: String },
}

impl FetchError {
    pub fn network(url: &str, reason: impl Into<String>) -> Self {
        Self::Network {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    pub fn render(url: &str, reason: impl Into<String>) -> Self {
        Self::Render {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    pub fn timeout(url: &str) -> Self {
        Self::Timeout {
            url: url.to_string(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Terminating crawl error. Only raised when the very first page fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrawlError {
    #[error("first page could not be fetched: {0}")]
    FirstPage(#[source] FetchError),

    #[error("invalid start url: {0}")]
    InvalidUrl(String),
}

/// Crate-level error for everything outside a single crawl.
#[derive(Debug, Error)]
pub enum ShelfError {
    #[error(transparent)]
    Crawl(#[from] CrawlError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("config error: {0}")]
    Config(String),

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
