//! Versioned row set for one deployment.

use alloc::{
  collections::BTreeMap,
  format,
  string::{String, ToString},
  vec::Vec,
};

use serde::{Deserialize, Serialize};

use crate::core::membership::{
  EntryEtag, MembershipEntry, MembershipTableData, MembershipTableError, SiloAddress, TableVersion,
};


/// Rows and version marker of one deployment, with the compare-and-swap rules every backend
/// applies.
///
/// Backends own the storage and the mutual exclusion around a `DeploymentTable`; the table owns
/// the decision whether a write wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentTable {
  deployment_id: String,
  version:       Option<TableVersion>,
  rows:          BTreeMap<String, StoredRow>,
  #[serde(default)]
  incarnation:   u64,
  etag_sequence: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct StoredRow {
  entry: MembershipEntry,
  etag:  EntryEtag,
}

impl DeploymentTable {
  /// Creates an uninitialized table for `deployment_id`.
  #[must_use]
  pub fn new(deployment_id: impl Into<String>) -> Self {
    Self { deployment_id: deployment_id.into(), version: None, rows: BTreeMap::new(), incarnation: 0, etag_sequence: 0 }
  }

  /// Deployment the rows belong to.
  #[must_use]
  pub fn deployment_id(&self) -> &str {
    &self.deployment_id
  }

  /// Returns whether the version marker exists.
  #[must_use]
  pub const fn is_initialized(&self) -> bool {
    self.version.is_some()
  }

  /// Creates the version-0 marker when absent. Returns true when this call created it.
  ///
  /// Each initialization draws a fresh incarnation, so tokens handed out before a teardown never
  /// match tokens of the recreated table.
  pub fn initialize(&mut self) -> bool {
    if self.version.is_some() {
      return false;
    }
    self.incarnation = rand::random();
    self.etag_sequence = 0;
    let etag = self.next_etag();
    self.version = Some(TableVersion::new(0, etag));
    true
  }

  /// Snapshot holding the row for `silo`, if any.
  ///
  /// # Errors
  ///
  /// Returns [`MembershipTableError::NotInitialized`] before `initialize`.
  pub fn read_row(&self, silo: &SiloAddress) -> Result<MembershipTableData, MembershipTableError> {
    let version = self.current_version()?;
    let entries = self.rows.get(&silo.to_row_key()).map(StoredRow::to_pair).into_iter().collect();
    Ok(MembershipTableData::new(entries, version.clone()))
  }

  /// Snapshot of every row.
  ///
  /// # Errors
  ///
  /// Returns [`MembershipTableError::NotInitialized`] before `initialize`.
  pub fn read_all(&self) -> Result<MembershipTableData, MembershipTableError> {
    let version = self.current_version()?;
    let entries: Vec<_> = self.rows.values().map(StoredRow::to_pair).collect();
    Ok(MembershipTableData::new(entries, version.clone()))
  }

  /// Inserts `entry` when `expected` is current and the silo has no row.
  ///
  /// # Errors
  ///
  /// Returns [`MembershipTableError::NotInitialized`] before `initialize`.
  pub fn insert_row(&mut self, entry: &MembershipEntry, expected: &TableVersion) -> Result<bool, MembershipTableError> {
    if self.current_version()? != expected {
      return Ok(false);
    }
    let row_key = entry.silo_address().to_row_key();
    if self.rows.contains_key(&row_key) {
      return Ok(false);
    }
    let etag = EntryEtag::new(self.next_etag());
    self.rows.insert(row_key, StoredRow { entry: entry.clone(), etag });
    self.bump_version(expected);
    Ok(true)
  }

  /// Replaces the row for `entry`'s silo when both `etag` and `expected` are current.
  ///
  /// # Errors
  ///
  /// Returns [`MembershipTableError::NotInitialized`] before `initialize`.
  pub fn update_row(
    &mut self,
    entry: &MembershipEntry,
    etag: &EntryEtag,
    expected: &TableVersion,
  ) -> Result<bool, MembershipTableError> {
    if self.current_version()? != expected {
      return Ok(false);
    }
    let row_key = entry.silo_address().to_row_key();
    match self.rows.get(&row_key) {
      | Some(row) if row.etag == *etag => {},
      | _ => return Ok(false),
    }
    let fresh = EntryEtag::new(self.next_etag());
    self.rows.insert(row_key, StoredRow { entry: entry.clone(), etag: fresh });
    self.bump_version(expected);
    Ok(true)
  }

  /// Copies the I-am-alive time of `entry` onto its stored row. Leaves tokens and version as is.
  ///
  /// # Errors
  ///
  /// Returns [`MembershipTableError::NotInitialized`] before `initialize`.
  pub fn merge_alive(&mut self, entry: &MembershipEntry) -> Result<(), MembershipTableError> {
    self.current_version()?;
    if let Some(row) = self.rows.get_mut(&entry.silo_address().to_row_key()) {
      let alive = entry.i_am_alive_time();
      row.entry = row.entry.clone().with_i_am_alive_time(alive);
    }
    Ok(())
  }

  /// Drops every row and the version marker.
  pub fn clear(&mut self) {
    self.rows.clear();
    self.version = None;
  }

  fn current_version(&self) -> Result<&TableVersion, MembershipTableError> {
    self
      .version
      .as_ref()
      .ok_or_else(|| MembershipTableError::NotInitialized { deployment_id: self.deployment_id.to_string() })
  }

  fn bump_version(&mut self, expected: &TableVersion) {
    let etag = self.next_etag();
    self.version = Some(expected.next(etag));
  }

  fn next_etag(&mut self) -> String {
    self.etag_sequence = self.etag_sequence.wrapping_add(1);
    format!("{:016x}-{:016x}", self.incarnation, self.etag_sequence)
  }
}

impl StoredRow {
  fn to_pair(&self) -> (MembershipEntry, EntryEtag) {
    (self.entry.clone(), self.etag.clone())
  }
}
