use thiserror::Error;

use crate::core::membership::{MembershipTableError, SiloAddress, SiloStatus};

/// Errors raised while driving conditional membership writes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MembershipUpdateError {
  /// No row exists for the silo.
  #[error("silo {0} has no membership row")]
  NotFound(SiloAddress),
  /// A row already exists for the silo.
  #[error("silo {0} already has a membership row")]
  AlreadyExists(SiloAddress),
  /// The requested status would move the silo backwards.
  #[error("silo {silo} cannot move from {from} to {to}")]
  InvalidTransition {
    /// Silo whose row was read.
    silo: SiloAddress,
    /// Stored status.
    from: SiloStatus,
    /// Requested status.
    to:   SiloStatus,
  },
  /// Every retry lost the compare-and-swap race.
  #[error("`{operation}` on silo {silo} still contended after {attempts} retries")]
  RetryExhausted {
    /// Updater operation that gave up.
    operation: &'static str,
    /// Silo whose row was contended.
    silo:      SiloAddress,
    /// Retries spent.
    attempts:  u32,
  },
  /// The table reported an infrastructure fault.
  #[error(transparent)]
  Table(#[from] MembershipTableError),
}
