use core::{num::NonZeroU32, time::Duration};

use crate::core::config::{ConfigError, MembershipTableConfig, RetryJitter, RetryPolicy};

#[test]
fn builder_applies_defaults() {
  let config = MembershipTableConfig::builder().deployment_id("prod").build().expect("config");

  assert_eq!(config.deployment_id(), "prod");
  assert_eq!(config.connection_string(), "");
  assert_eq!(config.operation_timeout(), Duration::from_secs(30));
  assert_eq!(config.retry_policy().max_attempts().get(), 5);
  assert_eq!(config.retry_policy().jitter(), RetryJitter::Full);
}

#[test]
fn builder_requires_deployment_id() {
  assert_eq!(MembershipTableConfig::builder().build().expect_err("invalid config"), ConfigError::MissingDeploymentId);
  assert_eq!(MembershipTableConfig::builder().deployment_id("  ").build().expect_err("invalid config"), ConfigError::BlankDeploymentId);
}

#[test]
fn builder_rejects_zero_timeout_and_inverted_backoff() {
  let zero = MembershipTableConfig::builder().deployment_id("d").operation_timeout(Duration::ZERO).build();
  assert_eq!(zero.expect_err("invalid config"), ConfigError::ZeroTimeout("operation_timeout"));

  let inverted = RetryPolicy::new(
    NonZeroU32::new(2).expect("non-zero"),
    Duration::from_secs(3),
    Duration::from_secs(1),
    RetryJitter::None,
  );
  let result = MembershipTableConfig::builder().deployment_id("d").retry_policy(inverted).build();
  assert_eq!(result.expect_err("invalid config"), ConfigError::InvertedBackoff);
}

#[test]
fn placement_config_rejects_zero_lookup_timeout() {
  use crate::core::config::PlacementConfig;

  assert_eq!(PlacementConfig::default().lookup_timeout(), Duration::from_secs(5));
  assert_eq!(PlacementConfig::new(Duration::ZERO), Err(ConfigError::ZeroTimeout("lookup_timeout")));
}
