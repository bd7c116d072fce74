use async_trait::async_trait;

use super::{
  placement_context::PlacementContext, placement_decision::PlacementDecision, placement_director::PlacementDirector,
  placement_error::PlacementError, placement_result::PlacementResult, placement_strategy::PlacementStrategy,
};
use crate::core::directory::GrainId;


/// Places new activations on the requesting silo.
///
/// Selection routes to an existing activation while its silo is active. Once that silo leaves the
/// active view the grain is placed locally, which migrates it off the dead silo.
#[derive(Debug, Default, Clone, Copy)]
pub struct PreferLocalPlacementDirector;

impl PreferLocalPlacementDirector {
  /// Creates the director.
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

#[async_trait]
impl PlacementDirector for PreferLocalPlacementDirector {
  async fn on_select_activation(
    &self,
    strategy: PlacementStrategy,
    grain: &GrainId,
    context: &dyn PlacementContext,
  ) -> Result<PlacementDecision, PlacementError> {
    let active = context.active_silos();
    let existing = context.lookup(grain).await?;
    if let Some(live) = existing.iter().find(|activation| active.contains(activation.silo())) {
      let result = PlacementResult::specify_creation(*live.silo(), strategy, context.grain_type_name(grain));
      return Ok(PlacementDecision::Place(result));
    }
    let result = self.on_add_activation(strategy, grain, context).await?;
    Ok(PlacementDecision::Place(result))
  }

  async fn on_add_activation(
    &self,
    strategy: PlacementStrategy,
    grain: &GrainId,
    context: &dyn PlacementContext,
  ) -> Result<PlacementResult, PlacementError> {
    Ok(PlacementResult::specify_creation(context.local_silo(), strategy, context.grain_type_name(grain)))
  }
}
