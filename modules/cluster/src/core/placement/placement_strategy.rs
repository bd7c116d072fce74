use alloc::string::String;
use core::{
  fmt::{self, Display, Formatter},
  str::FromStr,
};

use thiserror::Error;


/// Placement strategy tag attached to a grain type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum PlacementStrategy {
  /// Uniformly among active silos.
  #[default]
  Random,
  /// On the requesting silo unless an activation already exists.
  PreferLocal,
  /// Wherever the grain already lives; refused elsewhere.
  Pinned,
}

impl PlacementStrategy {
  /// Every strategy, in declaration order.
  pub const ALL: [PlacementStrategy; 3] =
    [PlacementStrategy::Random, PlacementStrategy::PreferLocal, PlacementStrategy::Pinned];

  /// Stable name used in logs and configuration.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      | PlacementStrategy::Random => "random",
      | PlacementStrategy::PreferLocal => "prefer-local",
      | PlacementStrategy::Pinned => "pinned",
    }
  }
}

impl Display for PlacementStrategy {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Raised when parsing an unrecognized strategy name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown placement strategy `{0}`")]
pub struct UnknownPlacementStrategy(pub String);

impl FromStr for PlacementStrategy {
  type Err = UnknownPlacementStrategy;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    PlacementStrategy::ALL
      .into_iter()
      .find(|strategy| strategy.as_str().eq_ignore_ascii_case(value))
      .ok_or_else(|| UnknownPlacementStrategy(value.into()))
  }
}
