//! std-specific pieces of the cluster runtime.

/// Membership table backends and the conditional-write driver.
pub mod membership;
/// Placement context and service bound to a live directory.
pub mod placement;
/// Silo instance registry for bootstrap and gateway discovery.
pub mod registry;
