use super::client::build_client;
use super::headers::headers_for_profile;
use super::types::{FetchProfile, RawContent};
use super::utils::validate_response;
use super::Fetcher;
use crate::error::FetchError;
use crate::types::CrawlOptions;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};

/// Plain HTTP backend. Sees only server-rendered markup, so the page is
/// ready as soon as the body arrives.
pub struct HttpFetcher {
    client: Client,
    profile: FetchProfile,
}

impl HttpFetcher {
    pub fn new(options: &CrawlOptions) -> crate::Result<Self> {
        Self::with_profile(options, FetchProfile::default())
    }

    pub fn with_profile(options: &CrawlOptions, profile: FetchProfile) -> crate::Result<Self> {
        let client = build_client(profile, Duration::from_millis(options.request_timeout_ms))
            .map_err(crate::error::ShelfError::Config)?;
        Ok(Self { client, profile })
    }

    pub fn profile(&self) -> FetchProfile {
        self.profile
    }
}

/// Transport errors are all `Network`. `Timeout` is reserved for a ready
/// condition that never held, and plain HTTP has none.
fn classify(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::network(url, format!("request timed out: {}", err))
    } else {
        FetchError::network(url, format!("HTTP request failed: {}", err))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<RawContent, FetchError> {
        let start = Instant::now();

        let response = self
            .client
            .get(url)
            .headers(headers_for_profile(self.profile))
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|e| classify(url, e))?;

        validate_response(status, &body).map_err(|reason| FetchError::network(url, reason))?;

        tracing::debug!(url, status = status.as_u16(), bytes = body.len(), "fetched page");

        Ok(RawContent {
            url: final_url,
            html: body,
            backend: self.name().to_string(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}
