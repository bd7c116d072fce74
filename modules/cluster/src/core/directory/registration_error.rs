use thiserror::Error;

use super::{activation_address::ActivationAddress, directory_error::DirectoryError};

/// Errors emitted when registering an activation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
  /// The grain already has a registered activation.
  #[error("grain already registered at {existing}")]
  AlreadyRegistered {
    /// Activation that won the registration.
    existing: ActivationAddress,
  },
  /// The directory cannot be reached.
  #[error(transparent)]
  Directory(#[from] DirectoryError),
}
