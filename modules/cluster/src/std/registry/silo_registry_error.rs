use alloc::string::String;

use thiserror::Error;

use super::silo_record_error::SiloRecordError;
use crate::{core::membership::MembershipTableError, std::membership::MembershipUpdateError};

/// Errors raised by the silo instance registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SiloRegistryError {
  /// The record belongs to another deployment.
  #[error("record for deployment `{actual}` handed to registry of `{expected}`")]
  DeploymentMismatch {
    /// Deployment served by the registry.
    expected: String,
    /// Deployment named by the record.
    actual:   String,
  },
  /// The record could not be decoded.
  #[error(transparent)]
  Record(#[from] SiloRecordError),
  /// A conditional write failed.
  #[error(transparent)]
  Update(#[from] MembershipUpdateError),
  /// The table reported an infrastructure fault.
  #[error(transparent)]
  Table(#[from] MembershipTableError),
}
