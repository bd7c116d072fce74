use alloc::{string::String, vec::Vec};

use async_trait::async_trait;
use hashbrown::HashMap;
use rapidhash::RapidBuildHasher;
use spin::Mutex;

use super::{
  activation_address::ActivationAddress, activation_id::ActivationId, directory_error::DirectoryError,
  grain_directory::GrainDirectory, grain_id::GrainId, registration_error::RegistrationError,
};
use crate::core::membership::SiloAddress;


type ActivationMap = HashMap<GrainId, Vec<ActivationAddress>, RapidBuildHasher>;

/// Grain directory held in process memory.
///
/// Registration keeps a single activation per grain. `record` bypasses that rule so callers can
/// reproduce directories that observed duplicate activations during a partition.
#[derive(Debug)]
pub struct InMemoryGrainDirectory {
  state: Mutex<DirectoryState>,
}

#[derive(Debug)]
struct DirectoryState {
  sequence:    u64,
  activations: ActivationMap,
  outage:      Option<String>,
}

impl InMemoryGrainDirectory {
  /// Creates an empty directory.
  #[must_use]
  pub fn new() -> Self {
    Self { state: Mutex::new(DirectoryState::default()) }
  }

  /// Registers a new activation of `grain` on `silo`.
  ///
  /// # Errors
  ///
  /// Returns [`RegistrationError::AlreadyRegistered`] with the current activation when the grain
  /// is already registered, or [`RegistrationError::Directory`] during a simulated outage.
  pub fn register(&self, grain: GrainId, silo: SiloAddress) -> Result<ActivationAddress, RegistrationError> {
    let mut guard = self.state.lock();
    guard.ensure_available()?;
    if let Some(existing) = guard.activations.get(&grain).and_then(|list| list.first()) {
      return Err(RegistrationError::AlreadyRegistered { existing: existing.clone() });
    }
    guard.sequence = guard.sequence.wrapping_add(1);
    let address = ActivationAddress::new(grain.clone(), silo, ActivationId::new(guard.sequence));
    guard.activations.insert(grain, alloc::vec![address.clone()]);
    Ok(address)
  }

  /// Appends an activation without the single-activation check.
  pub fn record(&self, grain: GrainId, silo: SiloAddress) -> ActivationAddress {
    let mut guard = self.state.lock();
    guard.sequence = guard.sequence.wrapping_add(1);
    let address = ActivationAddress::new(grain.clone(), silo, ActivationId::new(guard.sequence));
    guard.activations.entry(grain).or_default().push(address.clone());
    address
  }

  /// Removes one activation. Returns whether it was present.
  pub fn unregister(&self, address: &ActivationAddress) -> bool {
    let mut guard = self.state.lock();
    let Some(list) = guard.activations.get_mut(address.grain()) else {
      return false;
    };
    let before = list.len();
    list.retain(|candidate| candidate != address);
    let removed = list.len() != before;
    if list.is_empty() {
      guard.activations.remove(address.grain());
    }
    removed
  }

  /// Drops every activation hosted by `silo`, returning the removed addresses.
  pub fn remove_silo(&self, silo: &SiloAddress) -> Vec<ActivationAddress> {
    let mut guard = self.state.lock();
    let mut removed = Vec::new();
    guard.activations.retain(|_, list| {
      list.retain(|address| {
        if address.silo() == silo {
          removed.push(address.clone());
          false
        } else {
          true
        }
      });
      !list.is_empty()
    });
    removed
  }

  /// Simulates an outage: while `reason` is set [`Self::register`] and lookups fail. Maintenance
  /// calls (`record`, `unregister`, `remove_silo`) keep working so a test can reshape the directory
  /// mid-outage.
  pub fn set_outage(&self, reason: Option<String>) {
    self.state.lock().outage = reason;
  }

  /// Number of grains with at least one activation.
  #[must_use]
  pub fn len(&self) -> usize {
    self.state.lock().activations.len()
  }

  /// Returns true when no grain is registered.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Default for InMemoryGrainDirectory {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl GrainDirectory for InMemoryGrainDirectory {
  async fn lookup(&self, grain: &GrainId) -> Result<Vec<ActivationAddress>, DirectoryError> {
    let guard = self.state.lock();
    guard.ensure_available()?;
    Ok(guard.activations.get(grain).cloned().unwrap_or_default())
  }
}

impl DirectoryState {
  fn ensure_available(&self) -> Result<(), DirectoryError> {
    match &self.outage {
      | Some(reason) => Err(DirectoryError::Unavailable(reason.clone())),
      | None => Ok(()),
    }
  }
}

impl Default for DirectoryState {
  fn default() -> Self {
    Self { sequence: 0, activations: ActivationMap::with_hasher(RapidBuildHasher::default()), outage: None }
  }
}
