use alloc::{string::String, sync::Arc, vec::Vec};
use core::time::Duration;

use async_trait::async_trait;

use crate::core::{
  directory::{ActivationAddress, DirectoryError, GrainDirectory, GrainId},
  membership::SiloAddress,
  placement::{GrainTypeRegistry, PlacementContext},
};


/// Placement context for requests originating on the local silo.
///
/// Directory lookups are bounded by `lookup_timeout`; an elapsed deadline surfaces as
/// [`DirectoryError::Timeout`].
#[derive(Clone)]
pub struct LocalPlacementContext {
  local:          SiloAddress,
  directory:      Arc<dyn GrainDirectory>,
  grain_types:    Arc<GrainTypeRegistry>,
  active:         Vec<SiloAddress>,
  lookup_timeout: Duration,
}

impl LocalPlacementContext {
  /// Creates a context over a snapshot of the active silos.
  #[must_use]
  pub fn new(
    local: SiloAddress,
    directory: Arc<dyn GrainDirectory>,
    grain_types: Arc<GrainTypeRegistry>,
    active: Vec<SiloAddress>,
    lookup_timeout: Duration,
  ) -> Self {
    Self { local, directory, grain_types, active, lookup_timeout }
  }
}

#[async_trait]
impl PlacementContext for LocalPlacementContext {
  fn local_silo(&self) -> SiloAddress {
    self.local
  }

  fn grain_type_name(&self, grain: &GrainId) -> String {
    self.grain_types.type_name_for(grain)
  }

  fn active_silos(&self) -> Vec<SiloAddress> {
    self.active.clone()
  }

  async fn lookup(&self, grain: &GrainId) -> Result<Vec<ActivationAddress>, DirectoryError> {
    match tokio::time::timeout(self.lookup_timeout, self.directory.lookup(grain)).await {
      | Ok(result) => result,
      | Err(_) => Err(DirectoryError::Timeout(self.lookup_timeout)),
    }
  }
}
