use alloc::string::{String, ToString};
use core::time::Duration;

use thiserror::Error;

/// Infrastructure faults raised by membership table backends.
///
/// Contention is never reported here: conditional writes that lose a race return `Ok(false)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MembershipTableError {
  /// The deployment has no version entry yet.
  #[error("membership table for deployment `{deployment_id}` is not initialized")]
  NotInitialized {
    /// Deployment whose table is missing.
    deployment_id: String,
  },
  /// The backend cannot be reached or refused the request.
  #[error("membership table backend unavailable: {0}")]
  Unavailable(String),
  /// The call did not complete within its deadline.
  #[error("membership table operation `{operation}` timed out after {timeout:?}")]
  Timeout {
    /// Contract operation that timed out.
    operation: &'static str,
    /// Deadline that elapsed.
    timeout:   Duration,
  },
  /// Stored data cannot be decoded.
  #[error("membership table data is corrupted: {0}")]
  Corrupted(String),
  /// Local I/O failed.
  #[error("membership table io error: {0}")]
  Io(String),
  /// The backend cannot use the supplied configuration.
  #[error("membership table configuration rejected: {0}")]
  InvalidConfig(String),
}

impl From<std::io::Error> for MembershipTableError {
  fn from(value: std::io::Error) -> Self {
    MembershipTableError::Io(value.to_string())
  }
}
