//! Placement bound to a live directory and membership view.

/// Context handed to directors for one request.
pub mod local_placement_context;
/// Strategy dispatch, events and liveness checks.
pub mod placement_service;

pub use local_placement_context::LocalPlacementContext;
pub use placement_service::PlacementService;
