//! Placement strategies, directors and their dispatch table.

/// Maps grain kinds to type names and strategies.
pub mod grain_type_registry;
/// Read-only view handed to directors.
pub mod placement_context;
/// Outcome of selecting an activation.
pub mod placement_decision;
/// Strategy-specific placement algorithm contract.
pub mod placement_director;
/// Strategy to director dispatch table.
pub mod placement_director_registry;
/// Errors raised while placing grains.
pub mod placement_error;
/// Placement target.
pub mod placement_result;
/// Closed set of placement strategies.
pub mod placement_strategy;
/// Director keeping a grain on the silo that already hosts it.
pub mod pinned_placement_director;
/// Director that favors the requesting silo.
pub mod prefer_local_placement_director;
/// Director that spreads grains across active silos.
pub mod random_placement_director;

pub use grain_type_registry::GrainTypeRegistry;
pub use placement_context::PlacementContext;
pub use placement_decision::PlacementDecision;
pub use placement_director::PlacementDirector;
pub use placement_director_registry::PlacementDirectorRegistry;
pub use placement_error::PlacementError;
pub use placement_result::PlacementResult;
pub use placement_strategy::{PlacementStrategy, UnknownPlacementStrategy};
pub use pinned_placement_director::PinnedPlacementDirector;
pub use prefer_local_placement_director::PreferLocalPlacementDirector;
pub use random_placement_director::RandomPlacementDirector;

#[cfg(test)]
mod test_context;
