// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

pub const MAX_BACKOFF_MS: u64 = 8_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_backoff_ms: u64,
}

pub trait BackoffPolicy {
    fn delay_for_attempt(&self, attempt: usize) -> Duration;
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff_ms: 250,
        }
    }
}

impl RetryPolicy {
    /// A single attempt; transient failures surface immediately.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_backoff_ms: 0,
        }
    }
}

impl BackoffPolicy for RetryPolicy {
    /// Doubles from `base_backoff_ms` after the first failed attempt.
    fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let shift = u32::try_from(attempt.saturating_sub(1)).unwrap_or(u32::MAX).min(20);
        let ms = self
            .base_backoff_ms
            .saturating_mul(1_u64 << shift)
            .min(MAX_BACKOFF_MS);
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{BackoffPolicy, RetryPolicy, MAX_BACKOFF_MS};
    use std::time::Duration;

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(250));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(500));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(1_000));
        assert_eq!(
            policy.delay_for_attempt(40),
            Duration::from_millis(MAX_BACKOFF_MS)
        );
    }
}
