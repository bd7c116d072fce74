use alloc::string::{String, ToString};

use hashbrown::HashMap;
use rapidhash::RapidBuildHasher;

use super::placement_strategy::PlacementStrategy;
use crate::core::directory::GrainId;


#[derive(Clone, Debug)]
struct GrainTypeEntry {
  type_name: String,
  strategy:  PlacementStrategy,
}

/// Maps a grain kind to its type name and placement strategy.
///
/// Unregistered kinds use the kind itself as type name and the default strategy.
#[derive(Clone, Debug)]
pub struct GrainTypeRegistry {
  entries:          HashMap<String, GrainTypeEntry, RapidBuildHasher>,
  default_strategy: PlacementStrategy,
}

impl GrainTypeRegistry {
  /// Creates a registry whose unregistered kinds use `default_strategy`.
  #[must_use]
  pub fn new(default_strategy: PlacementStrategy) -> Self {
    Self { entries: HashMap::with_hasher(RapidBuildHasher::default()), default_strategy }
  }

  /// Registers `kind` with its type name and strategy.
  #[must_use]
  pub fn with_grain_type(
    mut self,
    kind: impl Into<String>,
    type_name: impl Into<String>,
    strategy: PlacementStrategy,
  ) -> Self {
    self.entries.insert(kind.into(), GrainTypeEntry { type_name: type_name.into(), strategy });
    self
  }

  /// Strategy used for `grain`.
  #[must_use]
  pub fn strategy_for(&self, grain: &GrainId) -> PlacementStrategy {
    self.entries.get(grain.kind()).map_or(self.default_strategy, |entry| entry.strategy)
  }

  /// Type name used for `grain`.
  #[must_use]
  pub fn type_name_for(&self, grain: &GrainId) -> String {
    self.entries.get(grain.kind()).map_or_else(|| grain.kind().to_string(), |entry| entry.type_name.clone())
  }
}

impl Default for GrainTypeRegistry {
  fn default() -> Self {
    Self::new(PlacementStrategy::default())
  }
}
