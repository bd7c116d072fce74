use alloc::string::String;

use thiserror::Error;

use crate::core::membership::{RowKeyError, UnknownSiloStatus};

/// Errors raised when a stored record cannot be turned into a membership entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SiloRecordError {
  /// The address column is not an IP address.
  #[error("invalid silo address `{0}`")]
  InvalidAddress(String),
  /// The status column holds an unknown value.
  #[error(transparent)]
  UnknownStatus(#[from] UnknownSiloStatus),
  /// A row key could not be decoded.
  #[error(transparent)]
  RowKey(#[from] RowKeyError),
  /// The row key does not match the address columns.
  #[error("row key `{row_key}` does not match address columns `{expected}`")]
  RowKeyMismatch {
    /// Stored row key.
    row_key:  String,
    /// Row key derived from address, port and generation.
    expected: String,
  },
  /// Suspecting silos and suspicion times have different lengths.
  #[error("{silos} suspecting silos but {times} suspicion times")]
  SuspicionMismatch {
    /// Number of suspecting silos.
    silos: usize,
    /// Number of suspicion times.
    times: usize,
  },
  /// A timestamp column is not RFC 3339.
  #[error("invalid timestamp `{0}`")]
  InvalidTime(String),
}
