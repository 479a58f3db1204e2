//! Inter-request pacing.
//!
//! The walker asks a [`Pacing`] for a delay before every fetch except the
//! first one of a crawl. Production uses [`RandomPacing`]; tests use
//! [`NoPacing`] or a closure.

use crate::types::PacingConfig;
use std::time::Duration;

/// Delay policy between consecutive fetches of one crawl.
pub trait Pacing: Send + Sync {
    fn delay(&self) -> Duration;
}

/// Uniformly random delay in `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomPacing {
    min_ms: u64,
    max_ms: u64,
}

impl RandomPacing {
    pub fn new(config: PacingConfig) -> Self {
        let (min_ms, max_ms) = if config.min_ms <= config.max_ms {
            (config.min_ms, config.max_ms)
        } else {
            (config.max_ms, config.min_ms)
        };
        Self { min_ms, max_ms }
    }
}

impl Default for RandomPacing {
    fn default() -> Self {
        Self::new(PacingConfig::default())
    }
}

impl Pacing for RandomPacing {
    fn delay(&self) -> Duration {
        Duration::from_millis(fastrand::u64(self.min_ms..=self.max_ms))
    }
}

/// No delay at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacing for NoPacing {
    fn delay(&self) -> Duration {
        Duration::ZERO
    }
}

impl<F> Pacing for F
where
    F: Fn() -> Duration + Send + Sync,
{
    fn delay(&self) -> Duration {
        self()
    }
}
