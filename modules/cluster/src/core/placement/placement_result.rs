use alloc::string::String;

use super::placement_strategy::PlacementStrategy;
use crate::core::membership::SiloAddress;

/// Silo chosen to host (or route to) a grain activation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementResult {
  silo:            SiloAddress,
  strategy:        PlacementStrategy,
  grain_type_name: String,
}

impl PlacementResult {
  /// Result instructing the caller to create an activation on `silo`.
  #[must_use]
  pub fn specify_creation(silo: SiloAddress, strategy: PlacementStrategy, grain_type_name: impl Into<String>) -> Self {
    Self { silo, strategy, grain_type_name: grain_type_name.into() }
  }

  /// Target silo.
  #[must_use]
  pub const fn silo(&self) -> &SiloAddress {
    &self.silo
  }

  /// Strategy that produced the result.
  #[must_use]
  pub const fn strategy(&self) -> PlacementStrategy {
    self.strategy
  }

  /// Grain type to instantiate.
  #[must_use]
  pub fn grain_type_name(&self) -> &str {
    &self.grain_type_name
  }
}
