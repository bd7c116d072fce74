use thiserror::Error;

use super::placement_strategy::PlacementStrategy;
use crate::core::{directory::DirectoryError, membership::SiloAddress};

/// Errors raised while placing grains.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
  /// The directory could not be consulted.
  #[error("placement could not consult the grain directory: {0}")]
  DirectoryUnavailable(#[from] DirectoryError),
  /// No director is registered for the strategy.
  #[error("no placement director registered for strategy `{0}`")]
  UnknownStrategy(PlacementStrategy),
  /// The target silo is not active.
  #[error("target silo {0} is not active")]
  SiloUnavailable(SiloAddress),
}
