use alloc::string::String;
use core::time::Duration;

use super::{config_error::ConfigError, membership_table_config::MembershipTableConfig, retry_policy::RetryPolicy};

/// Builder used to compose `MembershipTableConfig` instances.
#[derive(Debug, Clone)]
pub struct MembershipTableConfigBuilder {
  deployment_id:     Option<String>,
  connection_string: String,
  operation_timeout: Duration,
  retry_policy:      RetryPolicy,
}

impl MembershipTableConfigBuilder {
  /// Creates a new builder instance with defaults.
  #[must_use]
  pub fn new() -> Self {
    Self {
      deployment_id:     None,
      connection_string: String::new(),
      operation_timeout: MembershipTableConfig::DEFAULT_OPERATION_TIMEOUT,
      retry_policy:      RetryPolicy::default(),
    }
  }

  /// Sets the deployment id.
  #[must_use]
  pub fn deployment_id(mut self, deployment_id: impl Into<String>) -> Self {
    self.deployment_id = Some(deployment_id.into());
    self
  }

  /// Sets the backend connection string.
  #[must_use]
  pub fn connection_string(mut self, connection_string: impl Into<String>) -> Self {
    self.connection_string = connection_string.into();
    self
  }

  /// Overrides the per-call timeout.
  #[must_use]
  pub const fn operation_timeout(mut self, timeout: Duration) -> Self {
    self.operation_timeout = timeout;
    self
  }

  /// Overrides the retry policy.
  #[must_use]
  pub const fn retry_policy(mut self, policy: RetryPolicy) -> Self {
    self.retry_policy = policy;
    self
  }

  /// Finalizes the builder.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError`] when the deployment id is missing or blank, the timeout is zero, or
  /// the retry backoff bounds are inverted.
  pub fn build(self) -> Result<MembershipTableConfig, ConfigError> {
    let deployment_id = self.deployment_id.ok_or(ConfigError::MissingDeploymentId)?;
    if deployment_id.trim().is_empty() {
      return Err(ConfigError::BlankDeploymentId);
    }
    if self.operation_timeout.is_zero() {
      return Err(ConfigError::ZeroTimeout("operation_timeout"));
    }
    if self.retry_policy.initial_backoff() > self.retry_policy.max_backoff() {
      return Err(ConfigError::InvertedBackoff);
    }
    Ok(MembershipTableConfig::from_parts(
      deployment_id,
      self.connection_string,
      self.operation_timeout,
      self.retry_policy,
    ))
  }
}

impl Default for MembershipTableConfigBuilder {
  fn default() -> Self {
    Self::new()
  }
}
