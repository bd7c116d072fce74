use async_trait::async_trait;
use tracing::{debug, warn};

use super::{
  placement_context::PlacementContext, placement_decision::PlacementDecision, placement_director::PlacementDirector,
  placement_error::PlacementError, placement_result::PlacementResult, placement_strategy::PlacementStrategy,
};
use crate::core::directory::GrainId;


/// Keeps a grain on the silo that already hosts it.
///
/// Selection is permitted only when the directory knows no activation, or exactly one that lives
/// on the local silo. Any other shape is refused so the caller routes elsewhere. New activations
/// always go to the local silo.
#[derive(Debug, Default, Clone, Copy)]
pub struct PinnedPlacementDirector;

impl PinnedPlacementDirector {
  /// Creates the director.
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

#[async_trait]
impl PlacementDirector for PinnedPlacementDirector {
  async fn on_select_activation(
    &self,
    strategy: PlacementStrategy,
    grain: &GrainId,
    context: &dyn PlacementContext,
  ) -> Result<PlacementDecision, PlacementError> {
    let local = context.local_silo();
    let existing = context.lookup(grain).await?;
    let permitted = match existing.as_slice() {
      | [] => true,
      | [only] => *only.silo() == local,
      | _ => false,
    };
    if !permitted {
      for activation in &existing {
        warn!(grain = %grain, local = %local, existing = %activation, "pinned grain refused: activation lives elsewhere");
      }
      return Ok(PlacementDecision::Refuse { existing });
    }
    debug!(grain = %grain, local = %local, "pinned grain permitted on local silo");
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
