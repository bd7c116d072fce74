//! Storage-agnostic membership table contract.

use alloc::sync::Arc;

use async_trait::async_trait;

use super::{
  entry_etag::EntryEtag, membership_entry::MembershipEntry, membership_table_data::MembershipTableData,
  membership_table_error::MembershipTableError, silo_address::SiloAddress, table_version::TableVersion,
};

/// Contract shared by every membership table backend.
///
/// A backend instance is bound to one deployment by its configuration. Structural writes are
/// compare-and-swap operations against the whole-table [`TableVersion`]: a write succeeds only
/// when the caller's expected version equals the current one, and a lost race is reported as
/// `Ok(false)`. Callers re-read and retry; nothing holds a lock across read and write.
#[async_trait]
pub trait MembershipTable: Send + Sync {
  /// Deployment this table instance serves.
  fn deployment_id(&self) -> &str;

  /// Provisions storage for the deployment.
  ///
  /// With `try_init_table_version` the version-0 entry is created when absent. Concurrent
  /// initializers all observe success if the entry ends up present. Returns whether the version
  /// entry exists afterwards.
  ///
  /// # Errors
  ///
  /// Returns `MembershipTableError` on backend faults.
  async fn initialize(&self, try_init_table_version: bool) -> Result<bool, MembershipTableError>;

  /// Removes every row and the version entry of `deployment_id`.
  ///
  /// # Errors
  ///
  /// Returns `MembershipTableError` on backend faults.
  async fn delete_deployment_entries(&self, deployment_id: &str) -> Result<(), MembershipTableError>;

  /// Reads the row for `silo` (zero or one entry) and the current version.
  ///
  /// # Errors
  ///
  /// Returns `MembershipTableError` on backend faults or when the table is not initialized.
  async fn read_row(&self, silo: &SiloAddress) -> Result<MembershipTableData, MembershipTableError>;

  /// Reads every row and the current version.
  ///
  /// # Errors
  ///
  /// Returns `MembershipTableError` on backend faults or when the table is not initialized.
  async fn read_all(&self) -> Result<MembershipTableData, MembershipTableError>;

  /// Inserts `entry` if the version still equals `expected_version` and no row exists for its
  /// silo. Bumps the version on success.
  ///
  /// # Errors
  ///
  /// Returns `MembershipTableError` on backend faults. Contention yields `Ok(false)`.
  async fn insert_row(
    &self,
    entry: &MembershipEntry,
    expected_version: &TableVersion,
  ) -> Result<bool, MembershipTableError>;

  /// Replaces the existing row for `entry`'s silo if both the row token and the table version
  /// still match. Bumps the version on success.
  ///
  /// # Errors
  ///
  /// Returns `MembershipTableError` on backend faults. Contention yields `Ok(false)`.
  async fn update_row(
    &self,
    entry: &MembershipEntry,
    etag: &EntryEtag,
    expected_version: &TableVersion,
  ) -> Result<bool, MembershipTableError>;

  /// Best-effort heartbeat: copies `entry`'s I-am-alive time onto the stored row.
  ///
  /// Not version-gated and leaves both the row token and the table version untouched, so it can
  /// never invalidate a concurrent conditional write. A missing row is ignored.
  ///
  /// # Errors
  ///
  /// Returns `MembershipTableError` on backend faults.
  async fn merge_alive(&self, entry: &MembershipEntry) -> Result<(), MembershipTableError>;
}

#[async_trait]
impl<T> MembershipTable for Arc<T>
where
  T: MembershipTable + ?Sized,
{
  fn deployment_id(&self) -> &str {
    (**self).deployment_id()
  }

  async fn initialize(&self, try_init_table_version: bool) -> Result<bool, MembershipTableError> {
    (**self).initialize(try_init_table_version).await
  }

  async fn delete_deployment_entries(&self, deployment_id: &str) -> Result<(), MembershipTableError> {
    (**self).delete_deployment_entries(deployment_id).await
  }

  async fn read_row(&self, silo: &SiloAddress) -> Result<MembershipTableData, MembershipTableError> {
    (**self).read_row(silo).await
  }

  async fn read_all(&self) -> Result<MembershipTableData, MembershipTableError> {
    (**self).read_all().await
  }

  async fn insert_row(
    &self,
    entry: &MembershipEntry,
    expected_version: &TableVersion,
  ) -> Result<bool, MembershipTableError> {
    (**self).insert_row(entry, expected_version).await
  }

  async fn update_row(
    &self,
    entry: &MembershipEntry,
    etag: &EntryEtag,
    expected_version: &TableVersion,
  ) -> Result<bool, MembershipTableError> {
    (**self).update_row(entry, etag, expected_version).await
  }

  async fn merge_alive(&self, entry: &MembershipEntry) -> Result<(), MembershipTableError> {
    (**self).merge_alive(entry).await
  }
}
