use alloc::vec::Vec;

use super::placement_result::PlacementResult;
use crate::core::directory::ActivationAddress;

/// Outcome of `on_select_activation`.
///
/// A refusal is a deliberate answer: the grain lives elsewhere and this silo must not host it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementDecision {
  /// Place or route to the given silo.
  Place(PlacementResult),
  /// Do not place here.
  Refuse {
    /// Activations that made the director refuse.
    existing: Vec<ActivationAddress>,
  },
}

impl PlacementDecision {
  /// Returns the placement when permitted.
  #[must_use]
  pub const fn placement(&self) -> Option<&PlacementResult> {
    match self {
      | PlacementDecision::Place(result) => Some(result),
      | PlacementDecision::Refuse { .. } => None,
    }
  }

  /// Returns true for a refusal.
  #[must_use]
  pub const fn is_refused(&self) -> bool {
    matches!(self, PlacementDecision::Refuse { .. })
  }
}
