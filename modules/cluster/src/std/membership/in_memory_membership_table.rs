use alloc::string::String;

use async_trait::async_trait;

use super::in_memory_membership_store::InMemoryMembershipStore;
use crate::core::{
  config::MembershipTableConfig,
  membership::{
    EntryEtag, MembershipEntry, MembershipTable, MembershipTableData, MembershipTableError, SiloAddress, TableVersion,
  },
};


/// Membership table over an [`InMemoryMembershipStore`].
#[derive(Clone, Debug)]
pub struct InMemoryMembershipTable {
  deployment_id: String,
  store:         InMemoryMembershipStore,
}

impl InMemoryMembershipTable {
  /// Binds a table for the configured deployment to `store`.
  #[must_use]
  pub fn new(config: &MembershipTableConfig, store: InMemoryMembershipStore) -> Self {
    Self { deployment_id: config.deployment_id().into(), store }
  }

  /// Storage backing this table.
  #[must_use]
  pub const fn store(&self) -> &InMemoryMembershipStore {
    &self.store
  }

  async fn enter(&self) -> Result<(), MembershipTableError> {
    let latency = self.store.latency();
    if !latency.is_zero() {
      tokio::time::sleep(latency).await;
    }
    self.store.ensure_available()
  }
}

#[async_trait]
impl MembershipTable for InMemoryMembershipTable {
  fn deployment_id(&self) -> &str {
    &self.deployment_id
  }

  async fn initialize(&self, try_init_table_version: bool) -> Result<bool, MembershipTableError> {
    self.enter().await?;
    if try_init_table_version {
      self.store.initialize(&self.deployment_id)
    } else {
      self.store.read(&self.deployment_id, |table| table.is_initialized())
    }
  }

  async fn delete_deployment_entries(&self, deployment_id: &str) -> Result<(), MembershipTableError> {
    self.enter().await?;
    self.store.remove(deployment_id)
  }

  async fn read_row(&self, silo: &SiloAddress) -> Result<MembershipTableData, MembershipTableError> {
    self.enter().await?;
    self.store.read(&self.deployment_id, |table| table.read_row(silo))?
  }

  async fn read_all(&self) -> Result<MembershipTableData, MembershipTableError> {
    self.enter().await?;
    self.store.read(&self.deployment_id, |table| table.read_all())?
  }

  async fn insert_row(
    &self,
    entry: &MembershipEntry,
    expected_version: &TableVersion,
  ) -> Result<bool, MembershipTableError> {
    self.enter().await?;
    self.store.write(&self.deployment_id, |table| table.insert_row(entry, expected_version))
  }

  async fn update_row(
    &self,
    entry: &MembershipEntry,
    etag: &EntryEtag,
    expected_version: &TableVersion,
  ) -> Result<bool, MembershipTableError> {
    self.enter().await?;
    self.store.write(&self.deployment_id, |table| table.update_row(entry, etag, expected_version))
  }

  async fn merge_alive(&self, entry: &MembershipEntry) -> Result<(), MembershipTableError> {
    self.enter().await?;
    self.store.write(&self.deployment_id, |table| table.merge_alive(entry))
  }
}
