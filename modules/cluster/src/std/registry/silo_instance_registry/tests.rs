use std::sync::Arc;

use chrono::Utc;

use crate::{
  core::{
    config::MembershipTableConfig,
    events::{ClusterEvent, ClusterEventPublisher},
    membership::{MembershipTableError, SiloAddress, SiloStatus},
  },
  std::{
    membership::{InMemoryMembershipStore, InMemoryMembershipTable, MembershipUpdateError},
    registry::{SiloInstanceRecord, SiloInstanceRegistry, SiloRegistryError},
  },
};

async fn registry(deployment: &str) -> (SiloInstanceRegistry, Arc<ClusterEventPublisher>) {
  let config = MembershipTableConfig::builder().deployment_id(deployment).build().expect("config");
  let table = Arc::new(InMemoryMembershipTable::new(&config, InMemoryMembershipStore::new()));
  let events = Arc::new(ClusterEventPublisher::new());
  let registry = SiloInstanceRegistry::new(table, &config).with_events(events.clone());
  assert!(registry.try_create_table_version_entry().await.expect("version entry"));
  (registry, events)
}

fn record(port: u16) -> SiloInstanceRecord {
  SiloInstanceRecord::new("dep", SiloAddress::new_local(port, 10), "host", Utc::now())
}

#[tokio::test]
async fn register_writes_created_row() {
  let (registry, events) = registry("dep").await;
  let record = record(1).with_proxy_port(30001);

  registry.register_silo_instance(&record).await.expect("register");

  let (stored, _etag) = registry.read_single_entry("dep", &record.row_key).await.expect("read").expect("row");
  assert_eq!(stored.status, "Created");
  assert_eq!(stored.membership_version, Some(1));
  assert_eq!(events.drain(), vec![ClusterEvent::SiloRegistered { silo: SiloAddress::new_local(1, 10) }]);
}

#[tokio::test]
async fn read_single_entry_ignores_foreign_partition_and_missing_rows() {
  let (registry, _) = registry("dep").await;
  let record = record(1);
  registry.register_silo_instance(&record).await.expect("register");

  assert!(registry.read_single_entry("other", &record.row_key).await.expect("read").is_none());
  assert!(registry.read_single_entry("dep", "127.0.0.1-9-9").await.expect("read").is_none());
  assert!(matches!(registry.read_single_entry("dep", "garbage").await, Err(SiloRegistryError::Record(_))));
}

#[tokio::test]
async fn rejects_record_of_other_deployment() {
  let (registry, _) = registry("dep").await;
  let foreign = SiloInstanceRecord::new("elsewhere", SiloAddress::new_local(1, 1), "host", Utc::now());

  let err = registry.register_silo_instance(&foreign).await.expect_err("mismatch");

  assert_eq!(err, SiloRegistryError::DeploymentMismatch { expected: "dep".into(), actual: "elsewhere".into() });
}

#[tokio::test]
async fn activation_of_unknown_silo_fails() {
  let (registry, _) = registry("dep").await;

  let err = registry.activate_silo_instance(&record(5)).await.expect_err("missing row");

  assert_eq!(err, SiloRegistryError::Update(MembershipUpdateError::NotFound(SiloAddress::new_local(5, 10))));
}

#[tokio::test]
async fn dead_silo_cannot_be_reactivated() {
  let (registry, _) = registry("dep").await;
  let record = record(2);
  registry.register_silo_instance(&record).await.expect("register");
  registry.unregister_silo_instance(&record).await.expect("unregister");

  let err = registry.activate_silo_instance(&record).await.expect_err("backwards");

  assert!(matches!(
    err,
    SiloRegistryError::Update(MembershipUpdateError::InvalidTransition { from: SiloStatus::Dead, .. })
  ));
}

#[tokio::test]
async fn primary_prefers_newest_generation() {
  let (registry, _) = registry("dep").await;
  let old = SiloInstanceRecord::new("dep", SiloAddress::new_local(7, 1), "host", Utc::now()).with_primary(true);
  let new = SiloInstanceRecord::new("dep", SiloAddress::new_local(7, 2), "host", Utc::now()).with_primary(true);
  for record in [&old, &new] {
    registry.register_silo_instance(record).await.expect("register");
    registry.activate_silo_instance(record).await.expect("activate");
  }

  let primary = registry.find_primary_silo_endpoint().await.expect("primary");

  assert_eq!(primary, Some(SiloAddress::new_local(7, 2).endpoint()));
}

#[tokio::test]
async fn gateways_are_deduplicated() {
  let (registry, _) = registry("dep").await;
  let first = SiloInstanceRecord::new("dep", SiloAddress::new_local(7, 1), "host", Utc::now()).with_proxy_port(30000);
  let second = SiloInstanceRecord::new("dep", SiloAddress::new_local(7, 2), "host", Utc::now()).with_proxy_port(30000);
  for record in [&first, &second] {
    registry.register_silo_instance(record).await.expect("register");
    registry.activate_silo_instance(record).await.expect("activate");
  }

  let gateways = registry.find_all_gateway_proxy_endpoints().await.expect("gateways");

  assert_eq!(gateways, vec!["127.0.0.1:30000".parse().expect("addr")]);
}

#[tokio::test]
async fn delete_table_entries_resets_deployment() {
  let (registry, _) = registry("dep").await;
  registry.register_silo_instance(&record(1)).await.expect("register");

  registry.delete_table_entries().await.expect("delete");
  registry.delete_table_entries().await.expect("delete again");

  assert!(registry.try_create_table_version_entry().await.expect("recreate"));
  assert!(registry.read_all_entries().await.expect("read").is_empty());
}

#[tokio::test(start_paused = true)]
async fn slow_backend_hits_configured_timeout() {
  let timeout = core::time::Duration::from_millis(50);
  let config =
    MembershipTableConfig::builder().deployment_id("dep").operation_timeout(timeout).build().expect("config");
  let store = InMemoryMembershipStore::new();
  let registry = SiloInstanceRegistry::new(Arc::new(InMemoryMembershipTable::new(&config, store.clone())), &config);
  store.set_latency(core::time::Duration::from_secs(3));

  let err = registry.try_create_table_version_entry().await.expect_err("slow backend");

  assert_eq!(err, SiloRegistryError::Table(MembershipTableError::Timeout { operation: "initialize", timeout }));
  assert_eq!(store.deployment_count(), 0);
}
