use async_trait::async_trait;

use super::{
  placement_context::PlacementContext, placement_decision::PlacementDecision, placement_error::PlacementError,
  placement_result::PlacementResult, placement_strategy::PlacementStrategy,
};
use crate::core::directory::GrainId;

/// Strategy-specific placement algorithm.
#[async_trait]
pub trait PlacementDirector: Send + Sync {
  /// Decides where a message for `grain` should go, or refuses to host it here.
  ///
  /// # Errors
  ///
  /// Returns [`PlacementError`] when the directory cannot be consulted.
  async fn on_select_activation(
    &self,
    strategy: PlacementStrategy,
    grain: &GrainId,
    context: &dyn PlacementContext,
  ) -> Result<PlacementDecision, PlacementError>;

  /// Chooses the silo for a new activation of `grain`.
  ///
  /// # Errors
  ///
  /// Returns [`PlacementError`] when no silo can be chosen.
  async fn on_add_activation(
    &self,
    strategy: PlacementStrategy,
    grain: &GrainId,
    context: &dyn PlacementContext,
  ) -> Result<PlacementResult, PlacementError>;
}
