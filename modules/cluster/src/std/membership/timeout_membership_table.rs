use core::{future::Future, time::Duration};

use async_trait::async_trait;

use crate::core::{
  config::MembershipTableConfig,
  membership::{
    EntryEtag, MembershipEntry, MembershipTable, MembershipTableData, MembershipTableError, SiloAddress, TableVersion,
  },
};

#[cfg(test)]
mod tests;

/// Applies the configured deadline to every call of an inner table.
///
/// An elapsed deadline surfaces as [`MembershipTableError::Timeout`]. The caller stops waiting but
/// the backend may not stop working: the file backend runs on the blocking pool and a timed-out
/// write can still take the lock and commit afterwards. Writes are atomic, so the row is either
/// fully written or absent. Callers treat `Timeout` as an unknown outcome and re-read before
/// retrying.
#[derive(Clone, Debug)]
pub struct TimeoutMembershipTable<T> {
  inner:   T,
  timeout: Duration,
}

impl<T> TimeoutMembershipTable<T>
where
  T: MembershipTable,
{
  /// Wraps `inner` with an explicit deadline.
  #[must_use]
  pub const fn new(inner: T, timeout: Duration) -> Self {
    Self { inner, timeout }
  }

  /// Wraps `inner` with the config's operation timeout.
  #[must_use]
  pub const fn from_config(inner: T, config: &MembershipTableConfig) -> Self {
    Self::new(inner, config.operation_timeout())
  }

  /// Wrapped table.
  #[must_use]
  pub const fn inner(&self) -> &T {
    &self.inner
  }

  async fn bounded<R>(
    &self,
    operation: &'static str,
    call: impl Future<Output = Result<R, MembershipTableError>> + Send,
  ) -> Result<R, MembershipTableError> {
    match tokio::time::timeout(self.timeout, call).await {
      | Ok(result) => result,
      | Err(_) => Err(MembershipTableError::Timeout { operation, timeout: self.timeout }),
    }
  }
}

#[async_trait]
impl<T> MembershipTable for TimeoutMembershipTable<T>
where
  T: MembershipTable,
{
  fn deployment_id(&self) -> &str {
    self.inner.deployment_id()
  }

  async fn initialize(&self, try_init_table_version: bool) -> Result<bool, MembershipTableError> {
    self.bounded("initialize", self.inner.initialize(try_init_table_version)).await
  }

  async fn delete_deployment_entries(&self, deployment_id: &str) -> Result<(), MembershipTableError> {
    self.bounded("delete_deployment_entries", self.inner.delete_deployment_entries(deployment_id)).await
  }

  async fn read_row(&self, silo: &SiloAddress) -> Result<MembershipTableData, MembershipTableError> {
    self.bounded("read_row", self.inner.read_row(silo)).await
  }

  async fn read_all(&self) -> Result<MembershipTableData, MembershipTableError> {
    self.bounded("read_all", self.inner.read_all()).await
  }

  async fn insert_row(
    &self,
    entry: &MembershipEntry,
    expected_version: &TableVersion,
  ) -> Result<bool, MembershipTableError> {
    self.bounded("insert_row", self.inner.insert_row(entry, expected_version)).await
  }

  async fn update_row(
    &self,
    entry: &MembershipEntry,
    etag: &EntryEtag,
    expected_version: &TableVersion,
  ) -> Result<bool, MembershipTableError> {
    self.bounded("update_row", self.inner.update_row(entry, etag, expected_version)).await
  }

  async fn merge_alive(&self, entry: &MembershipEntry) -> Result<(), MembershipTableError> {
    self.bounded("merge_alive", self.inner.merge_alive(entry)).await
  }
}
