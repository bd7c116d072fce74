use crate::core::{
  directory::{ActivationAddress, GrainId},
  membership::{SiloAddress, SiloStatus},
  placement::PlacementStrategy,
};

/// Events emitted by membership and placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClusterEvent {
  /// A silo row was inserted into the membership table.
  SiloRegistered {
    /// Silo that registered.
    silo: SiloAddress,
  },
  /// A silo row moved to a later lifecycle status.
  SiloStatusChanged {
    /// Silo whose status changed.
    silo: SiloAddress,
    /// Status before the write.
    from: SiloStatus,
    /// Status after the write.
    to:   SiloStatus,
  },
  /// A peer recorded a suspicion against a silo.
  SuspicionRecorded {
    /// Suspected silo.
    silo:       SiloAddress,
    /// Silo that raised the suspicion.
    suspecting: SiloAddress,
  },
  /// Placement chose a silo for a grain.
  PlacementResolved {
    /// Placed grain.
    grain:    GrainId,
    /// Chosen silo.
    silo:     SiloAddress,
    /// Strategy that decided.
    strategy: PlacementStrategy,
  },
  /// Placement declined to host a grain here because it lives elsewhere.
  PlacementRefused {
    /// Refused grain.
    grain:    GrainId,
    /// Activations that caused the refusal.
    existing: alloc::vec::Vec<ActivationAddress>,
  },
}
