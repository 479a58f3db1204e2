use crate::error::ShelfError;
use crate::types::CrawlOptions;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

/// Default config location, `~/.shelfscrape/config.json`.
pub fn default_config_path() -> crate::Result<PathBuf> {
    Ok(super::app_dir()?.join(CONFIG_FILE))
}

/// Load crawl options.
///
/// An explicit `path` must exist. Without one the default location is
/// tried, and a missing file there means built-in defaults. Keys absent
/// from the file keep their defaults.
pub fn load_options(path: Option<&Path>) -> crate::Result<CrawlOptions> {
    match path {
        Some(path) => read_options(path),
        None => {
            let path = match default_config_path() {
                Ok(path) => path,
                Err(_) => return Ok(CrawlOptions::default()),
            };
            if path.exists() {
                read_options(&path)
            } else {
                Ok(CrawlOptions::default())
            }
        }
    }
}

fn read_options(path: &Path) -> crate::Result<CrawlOptions> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ShelfError::Config(format!("cannot read {}: {e}", path.display())))?;
    let options: CrawlOptions = serde_json::from_str(&raw)
        .map_err(|e| ShelfError::Config(format!("invalid config {}: {e}", path.display())))?;
    validate(&options)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(options)
}

/// Reject settings that would make every crawl a no-op.
pub fn validate(options: &CrawlOptions) -> crate::Result<()> {
    if options.max_pages == 0 {
        return Err(ShelfError::Config("max_pages must be at least 1".to_string()));
    }
    if options.ready_timeout_ms == 0 || options.request_timeout_ms == 0 {
        return Err(ShelfError::Config("timeouts must be non-zero".to_string()));
    }
    Ok(())
}
