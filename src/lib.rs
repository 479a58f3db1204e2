#![doc = include_str!("../README.md")]

pub mod cli;
pub mod error;
pub mod runtime;
pub mod selectors;
pub mod services;
pub mod tools;
pub mod types;


pub use error::{CrawlError, FetchError, Result, ShelfError};
pub use tools::aggregate::Dataset;
pub use tools::walk::{crawl, CrawlOutcome, StopReason, Walker};
pub use types::*;
