use alloc::{string::String, vec::Vec};

use async_trait::async_trait;

use super::PlacementContext;
use crate::core::{
  directory::{ActivationAddress, DirectoryError, GrainDirectory, GrainId, InMemoryGrainDirectory},
  membership::SiloAddress,
};

/// Context over an in-memory directory and a fixed active view.
pub(crate) struct TestContext {
  pub(crate) local:     SiloAddress,
  pub(crate) active:    Vec<SiloAddress>,
  pub(crate) directory: InMemoryGrainDirectory,
}

impl TestContext {
  pub(crate) fn new(local: SiloAddress, active: Vec<SiloAddress>) -> Self {
    Self { local, active, directory: InMemoryGrainDirectory::new() }
  }

  pub(crate) fn as_silo(&self, local: SiloAddress) -> TestContextView<'_> {
    TestContextView { inner: self, local }
  }
}

/// Same directory seen from another silo.
pub(crate) struct TestContextView<'a> {
  inner: &'a TestContext,
  local: SiloAddress,
}

#[async_trait]
impl PlacementContext for TestContext {
  fn local_silo(&self) -> SiloAddress {
    self.local
  }

  fn grain_type_name(&self, grain: &GrainId) -> String {
    alloc::format!("{}Grain", grain.kind())
  }

  fn active_silos(&self) -> Vec<SiloAddress> {
    self.active.clone()
  }

  async fn lookup(&self, grain: &GrainId) -> Result<Vec<ActivationAddress>, DirectoryError> {
    self.directory.lookup(grain).await
  }
}

#[async_trait]
impl PlacementContext for TestContextView<'_> {
  fn local_silo(&self) -> SiloAddress {
    self.local
  }

  fn grain_type_name(&self, grain: &GrainId) -> String {
    self.inner.grain_type_name(grain)
  }

  fn active_silos(&self) -> Vec<SiloAddress> {
    self.inner.active_silos()
  }

  async fn lookup(&self, grain: &GrainId) -> Result<Vec<ActivationAddress>, DirectoryError> {
    self.inner.lookup(grain).await
  }
}
