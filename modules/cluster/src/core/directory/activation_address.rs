use core::fmt::{self, Display, Formatter};

use super::{activation_id::ActivationId, grain_id::GrainId};
use crate::core::membership::SiloAddress;

/// Where a grain activation lives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ActivationAddress {
  grain:      GrainId,
  silo:       SiloAddress,
  activation: ActivationId,
}

impl ActivationAddress {
  /// Creates an activation address.
  #[must_use]
  pub const fn new(grain: GrainId, silo: SiloAddress, activation: ActivationId) -> Self {
    Self { grain, silo, activation }
  }

  /// Grain hosted by the activation.
  #[must_use]
  pub const fn grain(&self) -> &GrainId {
    &self.grain
  }

  /// Silo hosting the activation.
  #[must_use]
  pub const fn silo(&self) -> &SiloAddress {
    &self.silo
  }

  /// Activation identifier.
  #[must_use]
  pub const fn activation(&self) -> ActivationId {
    self.activation
  }
}

impl Display for ActivationAddress {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}{} on {}", self.grain, self.activation, self.silo)
  }
}
