//! Request pacing for the TMDB client.

use std::time::{Duration, Instant};

/// Default minimum gap between requests (TMDB allows roughly 40 req/s).
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(25);

/// Keeps consecutive requests at least `min_interval` apart.
///
/// Pacing only: a request is delayed, never rejected or retried.
#[derive(Debug)]
pub struct RequestPacer {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl RequestPacer {
    /// Creates a pacer with the given minimum interval.
    pub(crate) const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// Creates a pacer with the default interval (25ms).
    pub(crate) const fn default_interval() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }

    /// Sleeps until the next request may be sent, then records it.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let remaining = self.min_interval.saturating_sub(last.elapsed());
            if !remaining.is_zero() {
                tokio::time::sleep(remaining).await;
            }
        }

        self.last_request = Some(Instant::now());
    }
}
