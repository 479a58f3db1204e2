use crate::tools::walk::CrawlOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Error,
}

impl LogLevel {
    fn marker(self) -> &'static str {
        match self {
            LogLevel::Info => "[ok]",
            LogLevel::Error => "[err]",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub url: Option<String>,
    pub event: String,
    pub details: Option<String>,
}

/// Append-only, one-line-per-crawl history under `~/.shelfscrape`.
pub struct ActivityLogger {
    log_path: PathBuf,
}

impl ActivityLogger {
    pub fn new() -> crate::Result<Self> {
        Self::in_dir(&super::app_dir()?)
    }

    /// Logger writing to `dir/activity.log`.
    pub fn in_dir(dir: &Path) -> crate::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            log_path: dir.join("activity.log"),
        })
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    pub fn log(
        &self,
        level: LogLevel,
        url: Option<&str>,
        event: &str,
        details: Option<&str>,
    ) -> crate::Result<()> {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            url: url.map(|u| u.to_string()),
            event: event.to_string(),
            details: details.map(|d| d.to_string()),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        writeln!(
            file,
            "{} {} {} {} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            entry.level.marker(),
            entry.event,
            entry.url.as_deref().unwrap_or("*"),
            entry.details.as_deref().unwrap_or("")
        )?;

        Ok(())
    }

    /// Record a finished crawl: `[ok]` for `Done`, `[err]` for `Failed`.
    pub fn log_crawl(&self, label: &str, url: &str, outcome: &CrawlOutcome) -> crate::Result<()> {
        let level = if outcome.is_done() {
            LogLevel::Info
        } else {
            LogLevel::Error
        };
        self.log(level, Some(url), label, Some(&outcome.summary()))
    }

    /// Matching lines, newest first.
    pub fn read_logs(&self, url_filter: Option<&str>, errors_only: bool) -> crate::Result<Vec<String>> {
        if !self.log_path.exists() {
            return Ok(vec![]);
        }

        let file = fs::File::open(&self.log_path)?;
        let reader = BufReader::new(file);
        let mut matching_lines = Vec::new();

        for line in reader.lines() {
            let line = line?;

            if errors_only && !line.contains(LogLevel::Error.marker()) {
                continue;
            }

            if let Some(filter) = url_filter {
                if !line.contains(filter) {
                    continue;
                }
            }

            matching_lines.push(line);
        }

        matching_lines.reverse();
        Ok(matching_lines)
    }

    pub fn info(&self, url: Option<&str>, event: &str, details: Option<&str>) -> crate::Result<()> {
        self.log(LogLevel::Info, url, event, details)
    }

    pub fn error(&self, url: Option<&str>, event: &str, details: Option<&str>) -> crate::Result<()> {
        self.log(LogLevel::Error, url, event, details)
    }
}
