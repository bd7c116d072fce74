use alloc::string::String;
use core::time::Duration;

use thiserror::Error;

/// Errors raised by grain directory lookups.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
  /// The directory partition cannot be reached.
  #[error("grain directory unavailable: {0}")]
  Unavailable(String),
  /// The lookup did not complete within its deadline.
  #[error("grain directory lookup timed out after {0:?}")]
  Timeout(Duration),
}
