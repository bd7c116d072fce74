use core::time::Duration;

/// Result of evaluating a retry attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryOutcome {
  /// Retry after the provided delay.
  RetryAfter(Duration),
  /// Retry budget exhausted.
  GiveUp,
}
