use alloc::vec::Vec;

use async_trait::async_trait;

use super::{activation_address::ActivationAddress, directory_error::DirectoryError, grain_id::GrainId};

/// Maps grain identity to its current activations.
#[async_trait]
pub trait GrainDirectory: Send + Sync {
  /// Returns every known activation of `grain`. An empty list means the grain is not active.
  ///
  /// # Errors
  ///
  /// Returns [`DirectoryError`] when the directory cannot answer.
  async fn lookup(&self, grain: &GrainId) -> Result<Vec<ActivationAddress>, DirectoryError>;
}
