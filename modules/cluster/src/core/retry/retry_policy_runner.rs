use core::time::Duration;

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::retry_outcome::RetryOutcome;
use crate::core::config::{RetryJitter, RetryPolicy};


/// Backoff iterator derived from a retry policy.
///
/// Each call yields the delay to wait before the next attempt, doubling the base delay up to the
/// policy ceiling, until `max_attempts` retries have been handed out.
pub struct RetryPolicyRunner {
  policy:  RetryPolicy,
  attempt: u32,
  backoff: Duration,
  rng:     StdRng,
}

impl RetryPolicyRunner {
  /// Creates a new runner for the given policy.
  #[must_use]
  pub fn new(policy: RetryPolicy) -> Self {
    Self::with_rng(policy, StdRng::from_entropy())
  }

  /// Creates a runner whose jitter is driven by a fixed seed.
  #[must_use]
  pub fn with_seed(policy: RetryPolicy, seed: u64) -> Self {
    Self::with_rng(policy, StdRng::seed_from_u64(seed))
  }

  fn with_rng(policy: RetryPolicy, rng: StdRng) -> Self {
    Self { backoff: policy.initial_backoff(), attempt: 0, policy, rng }
  }

  /// Number of retries handed out so far.
  #[must_use]
  pub const fn attempts(&self) -> u32 {
    self.attempt
  }

  /// Evaluates the next retry decision.
  pub fn next_outcome(&mut self) -> RetryOutcome {
    if self.attempt >= self.policy.max_attempts().get() {
      return RetryOutcome::GiveUp;
    }
    self.attempt += 1;
    let delay = self.apply_jitter(self.backoff);
    self.backoff = core::cmp::min(self.backoff.saturating_mul(2), self.policy.max_backoff());
    RetryOutcome::RetryAfter(delay)
  }

  fn apply_jitter(&mut self, backoff: Duration) -> Duration {
    match self.policy.jitter() {
      | RetryJitter::None => backoff,
      | RetryJitter::Full => scale(backoff, self.rng.gen_range(0.0..=1.0)),
      | RetryJitter::Equal => {
        let half = backoff / 2;
        half + scale(backoff - half, self.rng.gen_range(0.0..=1.0))
      },
    }
  }
}

fn scale(duration: Duration, factor: f64) -> Duration {
  duration.mul_f64(factor)
}

impl Iterator for RetryPolicyRunner {
  type Item = RetryOutcome;

  fn next(&mut self) -> Option<Self::Item> {
    Some(self.next_outcome())
  }
}

impl core::fmt::Debug for RetryPolicyRunner {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RetryPolicyRunner").field("policy", &self.policy).field("attempt", &self.attempt).finish()
  }
}
