//! Backoff driver for contended conditional writes.

/// Outcome of consulting the runner.
pub mod retry_outcome;
/// Iterator over backoff delays.
pub mod retry_policy_runner;

pub use retry_outcome::RetryOutcome;
pub use retry_policy_runner::RetryPolicyRunner;
