use core::fmt::{self, Display, Formatter};

/// Opaque identifier assigned to each activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivationId(u64);

impl ActivationId {
  /// Creates a new activation identifier.
  #[must_use]
  pub const fn new(value: u64) -> Self {
    Self(value)
  }

  /// Returns the numeric representation.
  #[must_use]
  pub const fn get(self) -> u64 {
    self.0
  }
}

impl Display for ActivationId {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "@{:016x}", self.0)
  }
}
