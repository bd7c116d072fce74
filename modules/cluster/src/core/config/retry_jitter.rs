/// Type of jitter applied to retry delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryJitter {
  /// Deterministic exponential backoff.
  None,
  /// Uniform delay in `[0, backoff]`.
  #[default]
  Full,
  /// Uniform delay in `[backoff / 2, backoff]`.
  Equal,
}
