//! Process-wide storage shared by in-memory membership tables.

extern crate std;

use alloc::{
  string::{String, ToString},
  sync::Arc,
};
use core::time::Duration;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use hashbrown::HashMap;
use rapidhash::RapidBuildHasher;

use super::deployment_table::DeploymentTable;
use crate::core::membership::MembershipTableError;

type DeploymentMap = HashMap<String, DeploymentTable, RapidBuildHasher>;

/// Storage that several in-memory tables (one per simulated silo) read and write concurrently.
///
/// Clones share the same state. Outages and latency can be injected to exercise failure paths.
#[derive(Clone, Debug, Default)]
pub struct InMemoryMembershipStore {
  inner: Arc<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
  deployments: RwLock<DeploymentMap>,
  outage:      RwLock<Option<String>>,
  latency:     RwLock<Duration>,
}

impl InMemoryMembershipStore {
  /// Creates empty storage.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// While `reason` is set every call fails with [`MembershipTableError::Unavailable`].
  pub fn set_outage(&self, reason: Option<String>) {
    if let Ok(mut guard) = self.inner.outage.write() {
      *guard = reason;
    }
  }

  /// Delay applied before every call.
  pub fn set_latency(&self, latency: Duration) {
    if let Ok(mut guard) = self.inner.latency.write() {
      *guard = latency;
    }
  }

  pub(crate) fn latency(&self) -> Duration {
    self.inner.latency.read().map(|guard| *guard).unwrap_or_default()
  }

  pub(crate) fn ensure_available(&self) -> Result<(), MembershipTableError> {
    let guard = self.inner.outage.read().map_err(|error| MembershipTableError::Unavailable(error.to_string()))?;
    match guard.as_ref() {
      | Some(reason) => Err(MembershipTableError::Unavailable(reason.clone())),
      | None => Ok(()),
    }
  }

  /// Creates the deployment's version marker, allocating its table when missing.
  pub(crate) fn initialize(&self, deployment_id: &str) -> Result<bool, MembershipTableError> {
    let mut guard = self.write_deployments()?;
    let table =
      guard.entry(deployment_id.to_string()).or_insert_with(|| DeploymentTable::new(deployment_id.to_string()));
    table.initialize();
    Ok(table.is_initialized())
  }

  /// Runs `f` against the deployment's table.
  ///
  /// # Errors
  ///
  /// Returns [`MembershipTableError::NotInitialized`] when the deployment holds no state.
  pub(crate) fn write<R>(
    &self,
    deployment_id: &str,
    f: impl FnOnce(&mut DeploymentTable) -> Result<R, MembershipTableError>,
  ) -> Result<R, MembershipTableError> {
    let mut guard = self.write_deployments()?;
    match guard.get_mut(deployment_id) {
      | Some(table) => f(table),
      | None => Err(MembershipTableError::NotInitialized { deployment_id: deployment_id.to_string() }),
    }
  }

  /// Runs `f` against the deployment's table; an absent table is seen as uninitialized.
  pub(crate) fn read<R>(
    &self,
    deployment_id: &str,
    f: impl FnOnce(&DeploymentTable) -> R,
  ) -> Result<R, MembershipTableError> {
    let guard = self.read_deployments()?;
    match guard.get(deployment_id) {
      | Some(table) => Ok(f(table)),
      | None => Ok(f(&DeploymentTable::new(deployment_id))),
    }
  }

  pub(crate) fn remove(&self, deployment_id: &str) -> Result<(), MembershipTableError> {
    self.write_deployments()?.remove(deployment_id);
    Ok(())
  }

  /// Number of deployments with stored state.
  #[must_use]
  pub fn deployment_count(&self) -> usize {
    self.inner.deployments.read().map(|guard| guard.len()).unwrap_or_default()
  }

  fn read_deployments(&self) -> Result<RwLockReadGuard<'_, DeploymentMap>, MembershipTableError> {
    self.inner.deployments.read().map_err(|error| MembershipTableError::Unavailable(error.to_string()))
  }

  fn write_deployments(&self) -> Result<RwLockWriteGuard<'_, DeploymentMap>, MembershipTableError> {
    self.inner.deployments.write().map_err(|error| MembershipTableError::Unavailable(error.to_string()))
  }
}
