//! Membership row for one silo incarnation.

use alloc::{string::String, vec::Vec};
use core::net::SocketAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{silo_address::SiloAddress, silo_status::SiloStatus, suspicion::Suspicion};


/// One row of the membership table.
///
/// Entries are values: readers receive copies inside a table snapshot and writers build a
/// modified copy that goes back through a conditional table write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipEntry {
  silo_address:    SiloAddress,
  host_name:       String,
  status:          SiloStatus,
  proxy_port:      Option<u16>,
  is_primary:      bool,
  role_name:       String,
  instance_name:   String,
  update_zone:     u32,
  fault_zone:      u32,
  start_time:      DateTime<Utc>,
  i_am_alive_time: DateTime<Utc>,
  suspicions:      Vec<Suspicion>,
}

impl MembershipEntry {
  /// Creates a `Created` entry whose alive time equals its start time.
  #[must_use]
  pub fn new(silo_address: SiloAddress, host_name: impl Into<String>, start_time: DateTime<Utc>) -> Self {
    Self {
      silo_address,
      host_name: host_name.into(),
      status: SiloStatus::Created,
      proxy_port: None,
      is_primary: false,
      role_name: String::new(),
      instance_name: String::new(),
      update_zone: 0,
      fault_zone: 0,
      start_time,
      i_am_alive_time: start_time,
      suspicions: Vec::new(),
    }
  }

  /// Replaces the status.
  #[must_use]
  pub fn with_status(mut self, status: SiloStatus) -> Self {
    self.status = status;
    self
  }

  /// Sets the client-facing gateway port. `None` or `Some(0)` means no gateway.
  #[must_use]
  pub fn with_proxy_port(mut self, proxy_port: Option<u16>) -> Self {
    self.proxy_port = proxy_port.filter(|port| *port != 0);
    self
  }

  /// Flags the silo as the bootstrap primary.
  #[must_use]
  pub fn with_primary(mut self, is_primary: bool) -> Self {
    self.is_primary = is_primary;
    self
  }

  /// Sets the deployment role label.
  #[must_use]
  pub fn with_role_name(mut self, role_name: impl Into<String>) -> Self {
    self.role_name = role_name.into();
    self
  }

  /// Sets the instance label.
  #[must_use]
  pub fn with_instance_name(mut self, instance_name: impl Into<String>) -> Self {
    self.instance_name = instance_name.into();
    self
  }

  /// Sets update and fault zone labels.
  #[must_use]
  pub fn with_zones(mut self, update_zone: u32, fault_zone: u32) -> Self {
    self.update_zone = update_zone;
    self.fault_zone = fault_zone;
    self
  }

  /// Replaces the last I-am-alive timestamp.
  #[must_use]
  pub fn with_i_am_alive_time(mut self, i_am_alive_time: DateTime<Utc>) -> Self {
    self.i_am_alive_time = i_am_alive_time;
    self
  }

  /// Appends a suspicion. Existing suspicions are never removed or rewritten.
  #[must_use]
  pub fn with_suspicion(mut self, suspicion: Suspicion) -> Self {
    self.suspicions.push(suspicion);
    self
  }

  /// Returns the silo identity.
  #[must_use]
  pub const fn silo_address(&self) -> &SiloAddress {
    &self.silo_address
  }

  /// Returns the host name.
  #[must_use]
  pub fn host_name(&self) -> &str {
    &self.host_name
  }

  /// Returns the lifecycle status.
  #[must_use]
  pub const fn status(&self) -> SiloStatus {
    self.status
  }

  /// Returns the gateway port, if the silo exposes one.
  #[must_use]
  pub const fn proxy_port(&self) -> Option<u16> {
    self.proxy_port
  }

  /// Returns whether the silo is the bootstrap primary.
  #[must_use]
  pub const fn is_primary(&self) -> bool {
    self.is_primary
  }

  /// Returns the role label.
  #[must_use]
  pub fn role_name(&self) -> &str {
    &self.role_name
  }

  /// Returns the instance label.
  #[must_use]
  pub fn instance_name(&self) -> &str {
    &self.instance_name
  }

  /// Returns the update zone label.
  #[must_use]
  pub const fn update_zone(&self) -> u32 {
    self.update_zone
  }

  /// Returns the fault zone label.
  #[must_use]
  pub const fn fault_zone(&self) -> u32 {
    self.fault_zone
  }

  /// Returns the start time.
  #[must_use]
  pub const fn start_time(&self) -> DateTime<Utc> {
    self.start_time
  }

  /// Returns the last I-am-alive time.
  #[must_use]
  pub const fn i_am_alive_time(&self) -> DateTime<Utc> {
    self.i_am_alive_time
  }

  /// Returns the suspicions in the order they were appended.
  #[must_use]
  pub fn suspicions(&self) -> &[Suspicion] {
    &self.suspicions
  }

  /// Returns true when `silo` has suspected this entry at least once.
  #[must_use]
  pub fn is_suspected_by(&self, silo: &SiloAddress) -> bool {
    self.suspicions.iter().any(|suspicion| suspicion.suspecting_silo() == silo)
  }

  /// Returns the client-reachable gateway endpoint, if any.
  #[must_use]
  pub fn gateway_endpoint(&self) -> Option<SocketAddr> {
    self.proxy_port.map(|port| SocketAddr::new(self.silo_address.ip(), port))
  }
}
