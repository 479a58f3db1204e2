use crate::types::{CrawlOptions, ReadyMode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header sets the HTTP backend can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FetchProfile {
    /// Just a User-Agent, like curl with a browser string.
    Minimal,

    /// Chrome on Windows with the matching client hints.
    #[default]
    Desktop,
}

impl FetchProfile {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Desktop => "Desktop (Chrome)",
        }
    }
}

/// When a rendered page counts as ready to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyCondition {
    /// Poll until any known item container exists; `Timeout` if it never does.
    AnyItem(Duration),
    /// Wait a fixed time after navigation, then read whatever is there.
    Settle(Duration),
}

impl ReadyCondition {
    pub fn from_options(options: &CrawlOptions) -> Self {
        match options.ready {
            ReadyMode::AnyItem => Self::AnyItem(Duration::from_millis(options.ready_timeout_ms)),
            ReadyMode::Settle => Self::Settle(Duration::from_millis(options.settle_ms)),
        }
    }
}

/// Raw page content plus fetch telemetry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContent {
    /// Final URL after redirects; next-page links resolve against it.
    pub url: String,
    pub html: String,
    /// Which backend produced it.
    pub backend: String,
    pub duration_ms: u64,
}

impl RawContent {
    /// Content that did not come over the wire (fixtures, saved pages).
    pub fn offline(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            backend: "offline".to_string(),
            duration_ms: 0,
        }
    }
}
