//! Bootstrap and discovery layer over the membership table.

use alloc::{string::String, sync::Arc, vec::Vec};
use core::net::SocketAddr;

use tracing::{debug, info};

use super::{
  silo_instance_record::SiloInstanceRecord, silo_record_error::SiloRecordError, silo_registry_error::SiloRegistryError,
};
use crate::{
  core::{
    config::MembershipTableConfig,
    events::ClusterEventPublisher,
    membership::{EntryEtag, MembershipTable, SiloAddress, SiloStatus},
  },
  std::membership::MembershipTableUpdater,
};

#[cfg(test)]
mod tests;

/// Registry of silo incarnations for one deployment.
///
/// Silos register a `Created` row at startup, flip it to `Active` once they serve, and to `Dead`
/// on the way out. Clients and joining silos query the active rows for gateways and the primary.
#[derive(Debug, Clone)]
pub struct SiloInstanceRegistry {
  deployment_id: String,
  updater:       MembershipTableUpdater,
}

impl SiloInstanceRegistry {
  /// Creates a registry bound to `table` for the configured deployment. Every table call is
  /// bounded by the config's operation timeout.
  #[must_use]
  pub fn new(table: Arc<dyn MembershipTable>, config: &MembershipTableConfig) -> Self {
    Self { deployment_id: config.deployment_id().into(), updater: MembershipTableUpdater::from_config(table, config) }
  }

  /// Publishes registration and status events to `events`.
  #[must_use]
  pub fn with_events(mut self, events: Arc<ClusterEventPublisher>) -> Self {
    self.updater = self.updater.with_events(events);
    self
  }

  /// Deployment served by this registry.
  #[must_use]
  pub fn deployment_id(&self) -> &str {
    &self.deployment_id
  }

  /// Creates the table version entry when missing. Returns whether it exists afterwards.
  ///
  /// # Errors
  ///
  /// Returns [`SiloRegistryError::Table`] on backend faults.
  pub async fn try_create_table_version_entry(&self) -> Result<bool, SiloRegistryError> {
    Ok(self.table().initialize(true).await?)
  }

  /// Inserts the record's row with status `Created`.
  ///
  /// # Errors
  ///
  /// Returns [`SiloRegistryError`] when the record is malformed, the silo already has a row, or
  /// the table fails.
  pub async fn register_silo_instance(&self, record: &SiloInstanceRecord) -> Result<(), SiloRegistryError> {
    self.ensure_deployment(record)?;
    let entry = record.to_entry()?.with_status(SiloStatus::Created);
    self.updater.insert_entry(&entry).await?;
    info!(deployment = %self.deployment_id, silo = %entry.silo_address(), "silo instance registered");
    Ok(())
  }

  /// Moves the record's row to `Active`.
  ///
  /// # Errors
  ///
  /// Returns [`SiloRegistryError`] when the row is missing or already past `Active`.
  pub async fn activate_silo_instance(&self, record: &SiloInstanceRecord) -> Result<(), SiloRegistryError> {
    self.transition(record, SiloStatus::Active).await
  }

  /// Moves the record's row to `Dead`.
  ///
  /// # Errors
  ///
  /// Returns [`SiloRegistryError`] when the row is missing or the table fails.
  pub async fn unregister_silo_instance(&self, record: &SiloInstanceRecord) -> Result<(), SiloRegistryError> {
    self.transition(record, SiloStatus::Dead).await
  }

  /// Gateway endpoints of every active silo that accepts clients, sorted and deduplicated.
  ///
  /// # Errors
  ///
  /// Returns [`SiloRegistryError::Table`] on backend faults.
  pub async fn find_all_gateway_proxy_endpoints(&self) -> Result<Vec<SocketAddr>, SiloRegistryError> {
    let snapshot = self.table().read_all().await?;
    let mut endpoints: Vec<SocketAddr> = snapshot
      .entries()
      .iter()
      .filter(|(entry, _)| entry.status().is_active())
      .filter_map(|(entry, _)| entry.gateway_endpoint())
      .collect();
    endpoints.sort_unstable();
    endpoints.dedup();
    debug!(deployment = %self.deployment_id, gateways = endpoints.len(), "gateway endpoints resolved");
    Ok(endpoints)
  }

  /// Endpoint of the active primary silo. With several candidates the newest generation wins.
  ///
  /// # Errors
  ///
  /// Returns [`SiloRegistryError::Table`] on backend faults.
  pub async fn find_primary_silo_endpoint(&self) -> Result<Option<SocketAddr>, SiloRegistryError> {
    let snapshot = self.table().read_all().await?;
    let primary = snapshot
      .entries()
      .iter()
      .filter(|(entry, _)| entry.status().is_active() && entry.is_primary())
      .map(|(entry, _)| *entry.silo_address())
      .max_by_key(|silo| (silo.generation(), *silo));
    Ok(primary.map(|silo| silo.endpoint()))
  }

  /// Reads one row by partition and row key together with its concurrency token.
  ///
  /// A foreign partition or a missing row yields `None`.
  ///
  /// # Errors
  ///
  /// Returns [`SiloRegistryError`] when the row key is malformed or the table fails.
  pub async fn read_single_entry(
    &self,
    partition_key: &str,
    row_key: &str,
  ) -> Result<Option<(SiloInstanceRecord, EntryEtag)>, SiloRegistryError> {
    if partition_key != self.deployment_id {
      return Ok(None);
    }
    let silo = SiloAddress::from_row_key(row_key).map_err(SiloRecordError::from)?;
    let snapshot = self.table().read_row(&silo).await?;
    let version = snapshot.version().version();
    Ok(snapshot.entry_for(&silo).map(|(entry, etag)| {
      (SiloInstanceRecord::from_entry(self.deployment_id.clone(), entry, Some(version)), etag.clone())
    }))
  }

  /// Every row of the deployment.
  ///
  /// # Errors
  ///
  /// Returns [`SiloRegistryError::Table`] on backend faults.
  pub async fn read_all_entries(&self) -> Result<Vec<(SiloInstanceRecord, EntryEtag)>, SiloRegistryError> {
    let snapshot = self.table().read_all().await?;
    let version = snapshot.version().version();
    Ok(
      snapshot
        .entries()
        .iter()
        .map(|(entry, etag)| {
          (SiloInstanceRecord::from_entry(self.deployment_id.clone(), entry, Some(version)), etag.clone())
        })
        .collect(),
    )
  }

  /// Removes every row and the version entry of the deployment.
  ///
  /// # Errors
  ///
  /// Returns [`SiloRegistryError::Table`] on backend faults.
  pub async fn delete_table_entries(&self) -> Result<(), SiloRegistryError> {
    self.table().delete_deployment_entries(&self.deployment_id).await?;
    info!(deployment = %self.deployment_id, "deployment entries deleted");
    Ok(())
  }

  async fn transition(&self, record: &SiloInstanceRecord, status: SiloStatus) -> Result<(), SiloRegistryError> {
    self.ensure_deployment(record)?;
    let silo = record.silo_address()?;
    self.updater.update_status(&silo, status).await?;
    Ok(())
  }

  fn ensure_deployment(&self, record: &SiloInstanceRecord) -> Result<(), SiloRegistryError> {
    if record.deployment_id != self.deployment_id {
      return Err(SiloRegistryError::DeploymentMismatch {
        expected: self.deployment_id.clone(),
        actual:   record.deployment_id.clone(),
      });
    }
    Ok(())
  }

  fn table(&self) -> &Arc<dyn MembershipTable> {
    self.updater.table()
  }
}
