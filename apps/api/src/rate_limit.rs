//! Rate Limiter — per-caller sliding-window admission gate.
//!
//! `AppState` holds an `Arc<dyn AdmissionPolicy>`. The only backend is the
//! in-process `SlidingWindowLimiter`; a multi-process deployment would put the
//! window in a shared store behind the same trait.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

/// Admitted requests allowed per identity per window.
pub const MAX_REQUESTS_PER_WINDOW: usize = 5;
pub const WINDOW: Duration = Duration::from_secs(60);

/// Decides whether a caller may start another generation.
pub trait AdmissionPolicy: Send + Sync {
    /// Returns `true` and records the request when admitted; `false` otherwise.
    fn admit(&self, identity: &str, now: Instant) -> bool;
}

/// Approximate sliding-window counter, not a token bucket: up to `max_requests`
/// may burst within any `window` span with no smoothing.
///
/// One mutex guards the whole map, so prune + check + append is atomic per call.
/// Windows are never evicted beyond natural pruning and reset on restart.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    max_requests: usize,
    window: Duration,
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl SlidingWindowLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for SlidingWindowLimiter {
    fn default() -> Self {
        Self::new(MAX_REQUESTS_PER_WINDOW, WINDOW)
    }
}

impl AdmissionPolicy for SlidingWindowLimiter {
    fn admit(&self, identity: &str, now: Instant) -> bool {
        // A poisoned lock only means another request panicked mid-check; the map is still usable.
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let timestamps = windows.entry(identity.to_string()).or_default();

        while let Some(&oldest) = timestamps.front() {
            if now.saturating_duration_since(oldest) >= self.window {
                timestamps.pop_front();
            } else {
                break;
            }
        }

        if timestamps.len() >= self.max_requests {
            debug!(
                "Rate limit hit for {identity}: {} requests in window",
                timestamps.len()
            );
            return false;
        }

        timestamps.push_back(now);
        true
    }
}
