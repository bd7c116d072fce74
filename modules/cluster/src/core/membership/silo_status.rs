//! Silo lifecycle status.

use alloc::string::String;
use core::{
  fmt::{Display, Formatter, Result as FmtResult},
  str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Lifecycle state of one silo incarnation.
///
/// Variants are declared in lifecycle order; a generation only ever moves forward along it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SiloStatus {
  /// Row written, silo not yet joining.
  Created,
  /// Silo is joining the cluster.
  Joining,
  /// Silo is serving requests.
  Active,
  /// Graceful shutdown started.
  ShuttingDown,
  /// Silo is stopping without draining.
  Stopping,
  /// Incarnation is gone for good.
  Dead,
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown silo status `{0}`")]
pub struct UnknownSiloStatus(pub String);

impl SiloStatus {
  /// Returns the stored string form.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      | Self::Created => "Created",
      | Self::Joining => "Joining",
      | Self::Active => "Active",
      | Self::ShuttingDown => "ShuttingDown",
      | Self::Stopping => "Stopping",
      | Self::Dead => "Dead",
    }
  }

  /// Returns true when the silo is serving requests.
  #[must_use]
  pub const fn is_active(self) -> bool {
    matches!(self, Self::Active)
  }

  /// Returns true once the silo has started leaving the cluster.
  #[must_use]
  pub const fn is_terminating(self) -> bool {
    matches!(self, Self::ShuttingDown | Self::Stopping | Self::Dead)
  }

  /// Returns true for the final status.
  #[must_use]
  pub const fn is_terminal(self) -> bool {
    matches!(self, Self::Dead)
  }

  /// Returns true when moving to `next` goes strictly forward.
  #[must_use]
  pub fn can_transition_to(self, next: SiloStatus) -> bool {
    next > self
  }
}

impl Display for SiloStatus {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.write_str(self.as_str())
  }
}

impl FromStr for SiloStatus {
  type Err = UnknownSiloStatus;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      | "Created" => Ok(Self::Created),
      | "Joining" => Ok(Self::Joining),
      | "Active" => Ok(Self::Active),
      | "ShuttingDown" => Ok(Self::ShuttingDown),
      | "Stopping" => Ok(Self::Stopping),
      | "Dead" => Ok(Self::Dead),
      | other => Err(UnknownSiloStatus(String::from(other))),
    }
  }
}
