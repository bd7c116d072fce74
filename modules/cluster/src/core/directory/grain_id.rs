use alloc::string::String;
use core::{
  fmt::{self, Display, Formatter},
  hash::{Hash, Hasher},
};


/// Identifies a grain: its kind plus the application key within that kind.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct GrainId {
  kind: String,
  key:  String,
}

impl GrainId {
  /// Creates a grain id from its kind and key.
  #[must_use]
  pub fn new(kind: impl Into<String>, key: impl Into<String>) -> Self {
    Self { kind: kind.into(), key: key.into() }
  }

  /// Grain kind used to look up the grain type.
  #[must_use]
  pub fn kind(&self) -> &str {
    &self.kind
  }

  /// Application key.
  #[must_use]
  pub fn key(&self) -> &str {
    &self.key
  }
}

impl Hash for GrainId {
  fn hash<H>(&self, state: &mut H)
  where
    H: Hasher, {
    state.write(self.kind.as_bytes());
    state.write_u8(0xff);
    state.write(self.key.as_bytes());
  }
}

impl Display for GrainId {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.kind, self.key)
  }
}
