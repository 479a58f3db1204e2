use std::time::Duration;

const MAX_BACKOFF_MS: u64 = 60_000;

/// Backoff before retry `attempt` (1-based): base * 2^(attempt-1), plus up
/// to 50% jitter, capped at one minute.
pub(super) fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    if base_ms == 0 {
        return Duration::ZERO;
    }
    let exp = base_ms.saturating_mul(1u64 << attempt.saturating_sub(1).min(16));
    let capped = exp.min(MAX_BACKOFF_MS);
    let jitter = fastrand::u64(0..=capped / 2);
    Duration::from_millis((capped + jitter).min(MAX_BACKOFF_MS))
}
