use super::types::FetchProfile;
use reqwest::{redirect, Client};
use std::time::Duration;

const REDIRECT_LIMIT: usize = 10;
const POOL_IDLE_TIMEOUT_SEC: u64 = 90;

/// Build a reqwest client for one crawl. Each crawl gets its own cookie jar.
pub(crate) fn build_client(profile: FetchProfile, timeout: Duration) -> Result<Client, String> {
    let builder = Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::limited(REDIRECT_LIMIT))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .timeout(timeout)
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SEC));

    let builder = match profile {
        FetchProfile::Minimal => builder.cookie_store(false),
        FetchProfile::Desktop => builder,
    };

    builder
        .build()
        .map_err(|e| format!("Failed to build client: {}", e))
}
