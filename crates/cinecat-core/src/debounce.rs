//! Debounced input bridge.
//!
//! Holds the latest raw value and releases it only after the input has been
//! quiet for the configured delay. Dropping the debouncer discards anything
//! pending, so nothing is emitted after teardown.

use std::time::Duration;

use tokio::time::Instant;

/// Delay applied to free-text search input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Latest-value debouncer.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules `value`, replacing any pending value and restarting the delay.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    /// Discards the pending value. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Whether a value is waiting to be emitted.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending value if its quiet period has elapsed by `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if deadline <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Waits for the pending value to become due and returns it.
    ///
    /// Stays pending forever while nothing is scheduled. Cancel-safe: if the
    /// future is dropped before completion the value stays scheduled.
    pub async fn fire(&mut self) -> T {
        let Some(deadline) = self.pending.as_ref().map(|(_, deadline)| *deadline) else {
            return std::future::pending().await;
        };
        tokio::time::sleep_until(deadline).await;
        match self.pending.take() {
            Some((value, _)) => value,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::{sleep, timeout};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_burst_emits_last_value_once() {
        // Arrange
        let start = Instant::now();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);

        // Act: keystrokes at 0, 100, 200, 300 ms
        debouncer.push("d");
        for text in ["du", "dun", "dune"] {
            sleep(Duration::from_millis(100)).await;
            debouncer.push(text);
        }
        let value = debouncer.fire().await;
        let emitted_at = start.elapsed();
        let second = timeout(Duration::from_secs(5), debouncer.fire()).await;

        // Assert
        assert_eq!(value, "dune");
        assert_eq!(emitted_at.as_millis(), 800);
        assert!(second.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_value_supersedes_pending() {
        // Arrange
        let start = Instant::now();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);

        // Act
        debouncer.push(String::from("alien"));
        sleep(Duration::from_millis(400)).await;
        debouncer.push(String::from("aliens"));
        let value = debouncer.fire().await;

        // Assert
        assert_eq!(value, "aliens");
        assert_eq!(start.elapsed().as_millis(), 900);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_emission() {
        // Arrange
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        debouncer.push(1_u32);

        // Act
        let cancelled = debouncer.cancel();
        let result = timeout(Duration::from_secs(5), debouncer.fire()).await;

        // Assert
        assert!(cancelled);
        assert!(result.is_err());
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_fire_keeps_value_scheduled() {
        // Arrange
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        debouncer.push(7_u32);

        // Act
        let early = timeout(Duration::from_millis(100), debouncer.fire()).await;
        let value = debouncer.fire().await;

        // Assert
        assert!(early.is_err());
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_take_due_respects_delay() {
        // Arrange
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        debouncer.push('x');

        // Act
        let too_early = debouncer.take_due(Instant::now());
        sleep(SEARCH_DEBOUNCE).await;
        let due = debouncer.take_due(Instant::now());

        // Assert
        assert_eq!(too_early, None);
        assert_eq!(due, Some('x'));
        assert!(!debouncer.is_pending());
    }
}
