use core::{num::NonZeroU32, time::Duration};

use super::retry_jitter::RetryJitter;

/// Retry policy applied when a conditional membership write loses a race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
  max_attempts:    NonZeroU32,
  initial_backoff: Duration,
  max_backoff:     Duration,
  jitter:          RetryJitter,
}

impl RetryPolicy {
  /// Creates a new retry policy description.
  #[must_use]
  pub const fn new(
    max_attempts: NonZeroU32,
    initial_backoff: Duration,
    max_backoff: Duration,
    jitter: RetryJitter,
  ) -> Self {
    Self { max_attempts, initial_backoff, max_backoff, jitter }
  }

  /// Policy that retries immediately, used when contention is expected to clear at once.
  #[must_use]
  pub const fn immediate(max_attempts: NonZeroU32) -> Self {
    Self::new(max_attempts, Duration::ZERO, Duration::ZERO, RetryJitter::None)
  }

  /// Maximum retries after the first attempt.
  #[must_use]
  pub const fn max_attempts(&self) -> NonZeroU32 {
    self.max_attempts
  }

  /// Delay before the first retry.
  #[must_use]
  pub const fn initial_backoff(&self) -> Duration {
    self.initial_backoff
  }

  /// Upper bound for any single delay.
  #[must_use]
  pub const fn max_backoff(&self) -> Duration {
    self.max_backoff
  }

  /// Jitter strategy applied to backoff durations.
  #[must_use]
  pub const fn jitter(&self) -> RetryJitter {
    self.jitter
  }
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      max_attempts:    NonZeroU32::MIN.saturating_add(4),
      initial_backoff: Duration::from_millis(50),
      max_backoff:     Duration::from_secs(2),
      jitter:          RetryJitter::Full,
    }
  }
}
