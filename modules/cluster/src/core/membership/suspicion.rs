use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::silo_address::SiloAddress;

/// A peer's note that it suspects the row's silo, appended by the failure detector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suspicion {
  suspecting_silo: SiloAddress,
  suspected_at:    DateTime<Utc>,
}

impl Suspicion {
  /// Creates a new suspicion annotation.
  #[must_use]
  pub const fn new(suspecting_silo: SiloAddress, suspected_at: DateTime<Utc>) -> Self {
    Self { suspecting_silo, suspected_at }
  }

  /// Returns the silo that raised the suspicion.
  #[must_use]
  pub const fn suspecting_silo(&self) -> &SiloAddress {
    &self.suspecting_silo
  }

  /// Returns when the suspicion was raised.
  #[must_use]
  pub const fn suspected_at(&self) -> DateTime<Utc> {
    self.suspected_at
  }
}
