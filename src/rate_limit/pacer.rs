//! Fixed-interval request pacer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum interval between consecutive requests.
///
/// Cisco asks clients to space bulk queries out; this pacer blocks the
/// pagination loop for the remainder of the configured interval since the
/// previous request. It is a courtesy to the remote service, not a
/// correctness requirement.
///
/// Cheap to clone; clones share the same interval state.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use cisco_eox::rate_limit::Pacer;
///
/// // Default: 500ms between requests
/// let pacer = Pacer::default();
///
/// // Custom interval
/// let fast = Pacer::new(Duration::from_millis(100));
/// ```
#[derive(Clone)]
pub struct Pacer {
    inner: Arc<PacerInner>,
}

struct PacerInner {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl Pacer {
    /// Creates a pacer with the given minimum interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            inner: Arc::new(PacerInner {
                interval,
                last: Mutex::new(None),
            }),
        }
    }

    /// Waits until the interval since the previous request has elapsed,
    /// then records the current request.
    ///
    /// The first call never waits.
    pub async fn pace(&self) {
        let wait = {
            let mut last = self.inner.last.lock().await;
            let now = Instant::now();
            let wait = last.and_then(|prev| {
                let ready_at = prev + self.inner.interval;
                (ready_at > now).then(|| ready_at - now)
            });
            *last = Some(now + wait.unwrap_or(Duration::ZERO));
            wait
        };

        // Sleep outside the lock
        if let Some(wait) = wait {
            tokio::time::sleep(wait).await;
        }
    }

    /// Returns the configured interval.
    pub fn interval(&self) -> Duration {
        self.inner.interval
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PAGE_DELAY)
    }
}
