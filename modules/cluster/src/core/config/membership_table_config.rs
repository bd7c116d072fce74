use alloc::string::String;
use core::time::Duration;

use super::{membership_table_config_builder::MembershipTableConfigBuilder, retry_policy::RetryPolicy};

#[cfg(test)]
mod tests;

/// Settings shared by every membership table backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipTableConfig {
  deployment_id:     String,
  connection_string: String,
  operation_timeout: Duration,
  retry_policy:      RetryPolicy,
}

impl MembershipTableConfig {
  /// Default deadline for a single table call.
  pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

  /// Returns a builder seeded with defaults.
  #[must_use]
  pub fn builder() -> MembershipTableConfigBuilder {
    MembershipTableConfigBuilder::new()
  }

  pub(crate) const fn from_parts(
    deployment_id: String,
    connection_string: String,
    operation_timeout: Duration,
    retry_policy: RetryPolicy,
  ) -> Self {
    Self { deployment_id, connection_string, operation_timeout, retry_policy }
  }

  /// Deployment (partition) the table serves.
  #[must_use]
  pub fn deployment_id(&self) -> &str {
    &self.deployment_id
  }

  /// Backend-specific connection string. The file backend reads it as a directory path.
  #[must_use]
  pub fn connection_string(&self) -> &str {
    &self.connection_string
  }

  /// Deadline for a single contract call.
  #[must_use]
  pub const fn operation_timeout(&self) -> Duration {
    self.operation_timeout
  }

  /// Policy used when conditional writes lose a race.
  #[must_use]
  pub const fn retry_policy(&self) -> &RetryPolicy {
    &self.retry_policy
  }
}
