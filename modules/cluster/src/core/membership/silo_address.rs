//! Silo identity: network endpoint plus incarnation generation.

use alloc::{format, string::String};
use core::{
  fmt::{Display, Formatter, Result as FmtResult},
  net::{IpAddr, Ipv4Addr, SocketAddr},
};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::row_key_error::RowKeyError;


const ROW_KEY_SEPARATOR: char = '-';

/// 2010-01-01T00:00:00Z, the origin of allocated generations.
const GENERATION_EPOCH_SECS: i64 = 1_262_304_000;

/// Identity of one silo incarnation.
///
/// A silo restarting on the same endpoint receives a strictly larger generation, so
/// `(endpoint, generation)` pairs are never reused. Equality, ordering and hashing are structural
/// over both parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SiloAddress {
  endpoint:   SocketAddr,
  generation: i32,
}

impl SiloAddress {
  /// Creates a silo address from an endpoint and generation.
  #[must_use]
  pub const fn new(endpoint: SocketAddr, generation: i32) -> Self {
    Self { endpoint, generation }
  }

  /// Creates a loopback silo address.
  #[must_use]
  pub const fn new_local(port: u16, generation: i32) -> Self {
    Self::new(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port), generation)
  }

  /// Allocates a generation for a silo starting now.
  ///
  /// Generations count seconds since 2010-01-01 UTC, so a restart on the same clock always
  /// observes a larger value than the previous incarnation.
  #[must_use]
  pub fn allocate_generation() -> i32 {
    let elapsed = Utc::now().timestamp().saturating_sub(GENERATION_EPOCH_SECS);
    i32::try_from(elapsed).unwrap_or(i32::MAX).max(1)
  }

  /// Returns the silo endpoint.
  #[must_use]
  pub const fn endpoint(&self) -> SocketAddr {
    self.endpoint
  }

  /// Returns the endpoint IP address.
  #[must_use]
  pub const fn ip(&self) -> IpAddr {
    self.endpoint.ip()
  }

  /// Returns the endpoint port.
  #[must_use]
  pub const fn port(&self) -> u16 {
    self.endpoint.port()
  }

  /// Returns the incarnation generation.
  #[must_use]
  pub const fn generation(&self) -> i32 {
    self.generation
  }

  /// Returns true when `other` is an earlier incarnation on the same endpoint.
  #[must_use]
  pub fn is_successor_of(&self, other: &SiloAddress) -> bool {
    self.endpoint == other.endpoint && self.generation > other.generation
  }

  /// Encodes the address as a table row key: `{ip}-{port}-{generation}`.
  #[must_use]
  pub fn to_row_key(&self) -> String {
    format!("{}{ROW_KEY_SEPARATOR}{}{ROW_KEY_SEPARATOR}{}", self.ip(), self.port(), self.generation)
  }

  /// Decodes a row key produced by [`SiloAddress::to_row_key`].
  ///
  /// IP literals never contain `-`, so splitting on the first two separators keeps negative
  /// generations intact.
  ///
  /// # Errors
  ///
  /// Returns `RowKeyError` if a component is missing or cannot be parsed.
  pub fn from_row_key(row_key: &str) -> Result<Self, RowKeyError> {
    let missing = |component| RowKeyError::MissingComponent { row_key: String::from(row_key), component };
    let invalid = |component| RowKeyError::InvalidComponent { row_key: String::from(row_key), component };

    let (address, rest) = row_key.split_once(ROW_KEY_SEPARATOR).ok_or_else(|| missing("port"))?;
    let (port, generation) = rest.split_once(ROW_KEY_SEPARATOR).ok_or_else(|| missing("generation"))?;
    if address.is_empty() {
      return Err(missing("address"));
    }

    let ip = address.parse::<IpAddr>().map_err(|_| invalid("address"))?;
    let port = port.parse::<u16>().map_err(|_| invalid("port"))?;
    let generation = generation.parse::<i32>().map_err(|_| invalid("generation"))?;
    Ok(Self::new(SocketAddr::new(ip, port), generation))
  }
}

impl Display for SiloAddress {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    write!(f, "S{}:{}", self.endpoint, self.generation)
  }
}
