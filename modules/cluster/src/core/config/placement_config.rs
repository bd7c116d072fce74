use core::time::Duration;

use super::config_error::ConfigError;

/// Settings for the placement service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementConfig {
  lookup_timeout: Duration,
}

impl PlacementConfig {
  /// Default deadline for a single directory lookup.
  pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

  /// Creates a config with the given directory lookup timeout.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::ZeroTimeout`] when `lookup_timeout` is zero.
  pub fn new(lookup_timeout: Duration) -> Result<Self, ConfigError> {
    if lookup_timeout.is_zero() {
      return Err(ConfigError::ZeroTimeout("lookup_timeout"));
    }
    Ok(Self { lookup_timeout })
  }

  /// Deadline applied to every directory lookup.
  #[must_use]
  pub const fn lookup_timeout(&self) -> Duration {
    self.lookup_timeout
  }
}

impl Default for PlacementConfig {
  fn default() -> Self {
    Self { lookup_timeout: Self::DEFAULT_LOOKUP_TIMEOUT }
  }
}
