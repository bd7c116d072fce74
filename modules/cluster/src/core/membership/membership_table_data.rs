use alloc::vec::Vec;

use super::{
  entry_etag::EntryEtag, membership_entry::MembershipEntry, silo_address::SiloAddress, table_version::TableVersion,
};


/// Immutable snapshot returned by membership table reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MembershipTableData {
  entries: Vec<(MembershipEntry, EntryEtag)>,
  version: TableVersion,
}

impl MembershipTableData {
  /// Creates a snapshot. Entries are ordered by silo address.
  #[must_use]
  pub fn new(mut entries: Vec<(MembershipEntry, EntryEtag)>, version: TableVersion) -> Self {
    entries.sort_by(|(left, _), (right, _)| left.silo_address().cmp(right.silo_address()));
    Self { entries, version }
  }

  /// Returns every entry together with its row token.
  #[must_use]
  pub fn entries(&self) -> &[(MembershipEntry, EntryEtag)] {
    &self.entries
  }

  /// Returns the table version at read time.
  #[must_use]
  pub const fn version(&self) -> &TableVersion {
    &self.version
  }

  /// Number of entries in the snapshot.
  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns true when the snapshot holds no entries.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Finds the entry for `silo`.
  #[must_use]
  pub fn entry_for(&self, silo: &SiloAddress) -> Option<&(MembershipEntry, EntryEtag)> {
    self.entries.iter().find(|(entry, _)| entry.silo_address() == silo)
  }

  /// Returns the silos whose status is `Active`.
  #[must_use]
  pub fn active_silos(&self) -> Vec<SiloAddress> {
    self
      .entries
      .iter()
      .filter(|(entry, _)| entry.status().is_active())
      .map(|(entry, _)| *entry.silo_address())
      .collect()
  }
}
