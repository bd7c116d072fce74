use alloc::string::String;
use core::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Opaque per-row concurrency token handed out by table reads.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryEtag(String);

impl EntryEtag {
  /// Wraps a backend-specific token.
  #[must_use]
  pub fn new(value: impl Into<String>) -> Self {
    Self(value.into())
  }

  /// Exposes the token as a string slice.
  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Display for EntryEtag {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.write_str(&self.0)
  }
}
