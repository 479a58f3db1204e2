pub mod config;
pub mod log;

pub use config::*;
pub use log::*;

use crate::error::ShelfError;
use std::path::PathBuf;

/// `~/.shelfscrape`, home of the activity log and default config.
pub fn app_dir() -> crate::Result<PathBuf> {
    let user_dirs = directories::UserDirs::new()
        .ok_or_else(|| ShelfError::Config("could not determine home directory".to_string()))?;
    Ok(user_dirs.home_dir().join(".shelfscrape"))
}
