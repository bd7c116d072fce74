use alloc::{
  string::{String, ToString},
  vec::Vec,
};
use core::net::{IpAddr, SocketAddr};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::silo_record_error::SiloRecordError;
use crate::core::membership::{MembershipEntry, SiloAddress, SiloStatus, Suspicion};


const LIST_SEPARATOR: char = '|';

/// Storage row describing one silo incarnation, laid out column by column.
///
/// `deployment_id` is the partition key and `row_key` encodes address, port and generation.
/// Suspicions are kept as two parallel `|`-separated columns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiloInstanceRecord {
  /// Partition key.
  pub deployment_id:      String,
  /// Encoded silo address.
  pub row_key:            String,
  /// Lifecycle status name.
  pub status:             String,
  /// Host the silo runs on.
  pub host_name:          String,
  /// Silo IP address.
  pub address:            String,
  /// Silo-to-silo port.
  pub port:               u16,
  /// Incarnation generation.
  pub generation:         i32,
  /// Client gateway port, when the silo accepts clients.
  pub proxy_port:         Option<u16>,
  /// Whether this silo is the deployment's primary.
  pub is_primary:         bool,
  /// Role label.
  pub role_name:          String,
  /// Instance label.
  pub instance_name:      String,
  /// Update zone.
  pub update_zone:        u32,
  /// Fault zone.
  pub fault_zone:         u32,
  /// Start time.
  pub start_time:         DateTime<Utc>,
  /// Last I-am-alive time.
  pub i_am_alive_time:    DateTime<Utc>,
  /// Table version observed when the record was read.
  pub membership_version: Option<i64>,
  /// Row keys of suspecting silos.
  pub suspecting_silos:   String,
  /// RFC 3339 suspicion times, parallel to `suspecting_silos`.
  pub suspecting_times:   String,
}

impl SiloInstanceRecord {
  /// Creates a record for a silo that is about to register.
  #[must_use]
  pub fn new(
    deployment_id: impl Into<String>,
    silo: SiloAddress,
    host_name: impl Into<String>,
    start_time: DateTime<Utc>,
  ) -> Self {
    Self::from_entry(deployment_id, &MembershipEntry::new(silo, host_name, start_time), None)
  }

  /// Sets the client gateway port.
  #[must_use]
  pub fn with_proxy_port(mut self, proxy_port: u16) -> Self {
    self.proxy_port = Some(proxy_port).filter(|port| *port != 0);
    self
  }

  /// Marks the silo as primary.
  #[must_use]
  pub fn with_primary(mut self, is_primary: bool) -> Self {
    self.is_primary = is_primary;
    self
  }

  /// Sets role and instance labels.
  #[must_use]
  pub fn with_names(mut self, role_name: impl Into<String>, instance_name: impl Into<String>) -> Self {
    self.role_name = role_name.into();
    self.instance_name = instance_name.into();
    self
  }

  /// Sets update and fault zones.
  #[must_use]
  pub fn with_zones(mut self, update_zone: u32, fault_zone: u32) -> Self {
    self.update_zone = update_zone;
    self.fault_zone = fault_zone;
    self
  }

  /// Flattens `entry` into a record.
  #[must_use]
  pub fn from_entry(deployment_id: impl Into<String>, entry: &MembershipEntry, membership_version: Option<i64>) -> Self {
    let silo = entry.silo_address();
    let (suspecting_silos, suspecting_times): (Vec<String>, Vec<String>) = entry
      .suspicions()
      .iter()
      .map(|suspicion| {
        (
          suspicion.suspecting_silo().to_row_key(),
          suspicion.suspected_at().to_rfc3339_opts(SecondsFormat::AutoSi, true),
        )
      })
      .unzip();
    let separator = LIST_SEPARATOR.to_string();
    Self {
      deployment_id: deployment_id.into(),
      row_key: silo.to_row_key(),
      status: entry.status().as_str().to_string(),
      host_name: entry.host_name().to_string(),
      address: silo.ip().to_string(),
      port: silo.port(),
      generation: silo.generation(),
      proxy_port: entry.proxy_port(),
      is_primary: entry.is_primary(),
      role_name: entry.role_name().to_string(),
      instance_name: entry.instance_name().to_string(),
      update_zone: entry.update_zone(),
      fault_zone: entry.fault_zone(),
      start_time: entry.start_time(),
      i_am_alive_time: entry.i_am_alive_time(),
      membership_version,
      suspecting_silos: suspecting_silos.join(&separator),
      suspecting_times: suspecting_times.join(&separator),
    }
  }

  /// Silo address encoded by the address columns.
  ///
  /// # Errors
  ///
  /// Returns [`SiloRecordError`] when the address is not an IP or disagrees with the row key.
  pub fn silo_address(&self) -> Result<SiloAddress, SiloRecordError> {
    let ip: IpAddr = self.address.parse().map_err(|_| SiloRecordError::InvalidAddress(self.address.clone()))?;
    let silo = SiloAddress::new(SocketAddr::new(ip, self.port), self.generation);
    let expected = silo.to_row_key();
    if expected != self.row_key {
      return Err(SiloRecordError::RowKeyMismatch { row_key: self.row_key.clone(), expected });
    }
    Ok(silo)
  }

  /// Rebuilds the membership entry.
  ///
  /// # Errors
  ///
  /// Returns [`SiloRecordError`] when any column cannot be decoded.
  pub fn to_entry(&self) -> Result<MembershipEntry, SiloRecordError> {
    let silo = self.silo_address()?;
    let status: SiloStatus = self.status.parse()?;
    let mut entry = MembershipEntry::new(silo, self.host_name.clone(), self.start_time)
      .with_status(status)
      .with_proxy_port(self.proxy_port)
      .with_primary(self.is_primary)
      .with_role_name(self.role_name.clone())
      .with_instance_name(self.instance_name.clone())
      .with_zones(self.update_zone, self.fault_zone)
      .with_i_am_alive_time(self.i_am_alive_time);
    for suspicion in self.suspicions()? {
      entry = entry.with_suspicion(suspicion);
    }
    Ok(entry)
  }

  fn suspicions(&self) -> Result<Vec<Suspicion>, SiloRecordError> {
    let silos = split_list(&self.suspecting_silos);
    let times = split_list(&self.suspecting_times);
    if silos.len() != times.len() {
      return Err(SiloRecordError::SuspicionMismatch { silos: silos.len(), times: times.len() });
    }
    silos
      .into_iter()
      .zip(times)
      .map(|(silo, time)| {
        let suspecting = SiloAddress::from_row_key(silo)?;
        let at = DateTime::parse_from_rfc3339(time)
          .map_err(|_| SiloRecordError::InvalidTime(time.to_string()))?
          .with_timezone(&Utc);
        Ok(Suspicion::new(suspecting, at))
      })
      .collect()
  }
}

fn split_list(column: &str) -> Vec<&str> {
  if column.is_empty() { Vec::new() } else { column.split(LIST_SEPARATOR).collect() }
}
