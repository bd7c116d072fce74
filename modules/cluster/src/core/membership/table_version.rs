use alloc::string::String;
use core::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};


/// Version stamp covering the whole membership table of one deployment.
///
/// Every successful insert or update bumps `version` and replaces `etag`. A write carrying a
/// stamp that differs in either part is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableVersion {
  version: i64,
  etag:    String,
}

impl TableVersion {
  /// Creates a version stamp.
  #[must_use]
  pub fn new(version: i64, etag: impl Into<String>) -> Self {
    Self { version, etag: etag.into() }
  }

  /// Returns the monotonically increasing counter.
  #[must_use]
  pub const fn version(&self) -> i64 {
    self.version
  }

  /// Returns the opaque concurrency token.
  #[must_use]
  pub fn etag(&self) -> &str {
    &self.etag
  }

  /// Returns the stamp a successful write will produce, carrying a fresh token.
  #[must_use]
  pub fn next(&self, etag: impl Into<String>) -> Self {
    Self { version: self.version.saturating_add(1), etag: etag.into() }
  }
}

impl Display for TableVersion {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    write!(f, "<{}, {}>", self.version, self.etag)
  }
}
