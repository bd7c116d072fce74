use alloc::{string::String, vec::Vec};

use async_trait::async_trait;

use crate::core::{
  directory::{ActivationAddress, DirectoryError, GrainId},
  membership::SiloAddress,
};

/// View of the cluster a director decides against.
#[async_trait]
pub trait PlacementContext: Send + Sync {
  /// Silo asking for the placement.
  fn local_silo(&self) -> SiloAddress;

  /// Grain type name registered for `grain`'s kind.
  fn grain_type_name(&self, grain: &GrainId) -> String;

  /// Silos currently believed `Active`.
  fn active_silos(&self) -> Vec<SiloAddress>;

  /// Current activations of `grain` according to the directory.
  ///
  /// # Errors
  ///
  /// Returns [`DirectoryError`] when the directory cannot answer in time.
  async fn lookup(&self, grain: &GrainId) -> Result<Vec<ActivationAddress>, DirectoryError>;
}
