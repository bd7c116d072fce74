use alloc::sync::Arc;

use hashbrown::HashMap;
use rapidhash::RapidBuildHasher;

use super::{
  pinned_placement_director::PinnedPlacementDirector, placement_director::PlacementDirector,
  placement_error::PlacementError, placement_strategy::PlacementStrategy,
  prefer_local_placement_director::PreferLocalPlacementDirector, random_placement_director::RandomPlacementDirector,
};


type DirectorMap = HashMap<PlacementStrategy, Arc<dyn PlacementDirector>, RapidBuildHasher>;

/// Dispatch table from strategy tag to director.
#[derive(Clone)]
pub struct PlacementDirectorRegistry {
  directors: DirectorMap,
}

impl PlacementDirectorRegistry {
  /// Creates an empty table.
  #[must_use]
  pub fn new() -> Self {
    Self { directors: DirectorMap::with_hasher(RapidBuildHasher::default()) }
  }

  /// Creates a table holding the built-in director for every strategy.
  #[must_use]
  pub fn with_defaults() -> Self {
    let mut registry = Self::new();
    registry.register(PlacementStrategy::Random, Arc::new(RandomPlacementDirector::new()));
    registry.register(PlacementStrategy::PreferLocal, Arc::new(PreferLocalPlacementDirector::new()));
    registry.register(PlacementStrategy::Pinned, Arc::new(PinnedPlacementDirector::new()));
    registry
  }

  /// Installs `director` for `strategy`, returning the one it replaced.
  pub fn register(
    &mut self,
    strategy: PlacementStrategy,
    director: Arc<dyn PlacementDirector>,
  ) -> Option<Arc<dyn PlacementDirector>> {
    self.directors.insert(strategy, director)
  }

  /// Looks up the director for `strategy`.
  ///
  /// # Errors
  ///
  /// Returns [`PlacementError::UnknownStrategy`] when none is registered.
  pub fn resolve(&self, strategy: PlacementStrategy) -> Result<Arc<dyn PlacementDirector>, PlacementError> {
    self.directors.get(&strategy).cloned().ok_or(PlacementError::UnknownStrategy(strategy))
  }
}

impl Default for PlacementDirectorRegistry {
  fn default() -> Self {
    Self::with_defaults()
  }
}

impl core::fmt::Debug for PlacementDirectorRegistry {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_set().entries(self.directors.keys()).finish()
  }
}
