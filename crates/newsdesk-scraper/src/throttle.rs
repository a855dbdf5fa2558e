//! Jittered pauses between network round trips.

use std::time::Duration;

/// Picks a delay uniformly in `[min_ms, max_ms]`. Inverted bounds are swapped.
#[must_use]
pub fn jittered_delay(min_ms: u64, max_ms: u64) -> Duration {
    let (lo, hi) = if min_ms <= max_ms {
        (min_ms, max_ms)
    } else {
        (max_ms, min_ms)
    };
    if lo == hi {
        return Duration::from_millis(lo);
    }
    Duration::from_millis(rand::random_range(lo..=hi))
}

/// Sleeps for `base_ms` plus a jitter in `[jitter_min_ms, jitter_max_ms]`.
///
/// Returns immediately when the total is zero.
pub async fn pause(base_ms: u64, jitter_min_ms: u64, jitter_max_ms: u64) {
    let delay = Duration::from_millis(base_ms) + jittered_delay(jitter_min_ms, jitter_max_ms);
    if delay.is_zero() {
        return;
    }
    tracing::debug!(delay_ms = delay.as_millis(), "throttling");
    tokio::time::sleep(delay).await;
}
