use async_trait::async_trait;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use spin::Mutex;

use super::{
  placement_context::PlacementContext, placement_decision::PlacementDecision, placement_director::PlacementDirector,
  placement_error::PlacementError, placement_result::PlacementResult, placement_strategy::PlacementStrategy,
};
use crate::core::directory::GrainId;

#[cfg(test)]
mod tests;

/// Spreads activations uniformly across active silos.
///
/// With an empty active view the local silo is used. Selection reuses an existing activation on
/// an active silo before adding a new one.
#[derive(Debug)]
pub struct RandomPlacementDirector {
  rng: Mutex<StdRng>,
}

impl RandomPlacementDirector {
  /// Creates a director seeded from the operating system.
  #[must_use]
  pub fn new() -> Self {
    Self { rng: Mutex::new(StdRng::from_entropy()) }
  }

  /// Creates a director with a deterministic seed.
  #[must_use]
  pub fn with_seed(seed: u64) -> Self {
    Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
  }
}

impl Default for RandomPlacementDirector {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl PlacementDirector for RandomPlacementDirector {
  async fn on_select_activation(
    &self,
    strategy: PlacementStrategy,
    grain: &GrainId,
    context: &dyn PlacementContext,
  ) -> Result<PlacementDecision, PlacementError> {
    let active = context.active_silos();
    let existing = context.lookup(grain).await?;
    let live: alloc::vec::Vec<_> =
      existing.iter().filter(|activation| active.contains(activation.silo())).map(|activation| *activation.silo()).collect();
    let chosen = live.choose(&mut *self.rng.lock()).copied();
    let result = match chosen {
      | Some(silo) => PlacementResult::specify_creation(silo, strategy, context.grain_type_name(grain)),
      | None => self.on_add_activation(strategy, grain, context).await?,
    };
    Ok(PlacementDecision::Place(result))
  }

  async fn on_add_activation(
    &self,
    strategy: PlacementStrategy,
    grain: &GrainId,
    context: &dyn PlacementContext,
  ) -> Result<PlacementResult, PlacementError> {
    let active = context.active_silos();
    let silo = active.choose(&mut *self.rng.lock()).copied().unwrap_or_else(|| context.local_silo());
    Ok(PlacementResult::specify_creation(silo, strategy, context.grain_type_name(grain)))
  }
}
