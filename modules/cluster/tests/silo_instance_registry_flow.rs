use std::sync::Arc;

use chrono::Utc;
use silo_cluster_rs::{
  core::{
    config::MembershipTableConfig,
    events::{ClusterEvent, ClusterEventPublisher},
    membership::{SiloAddress, SiloStatus},
  },
  std::{
    membership::{InMemoryMembershipStore, InMemoryMembershipTable},
    registry::{SiloInstanceRecord, SiloInstanceRegistry},
  },
};

fn registry(store: &InMemoryMembershipStore) -> SiloInstanceRegistry {
  let config = MembershipTableConfig::builder().deployment_id("orders").build().expect("config");
  SiloInstanceRegistry::new(Arc::new(InMemoryMembershipTable::new(&config, store.clone())), &config)
}

fn record(port: u16, proxy_port: u16, primary: bool) -> SiloInstanceRecord {
  SiloInstanceRecord::new("orders", SiloAddress::new_local(port, 100), format!("node-{port}"), Utc::now())
    .with_proxy_port(proxy_port)
    .with_primary(primary)
    .with_names("orders", format!("orders-{port}"))
}

#[tokio::test]
async fn register_activate_unregister_lifecycle() {
  let store = InMemoryMembershipStore::new();
  let events = Arc::new(ClusterEventPublisher::new());
  let registry = registry(&store).with_events(events.clone());
  registry.try_create_table_version_entry().await.expect("version entry");
  let silo = record(11_111, 30_000, true);

  registry.register_silo_instance(&silo).await.expect("register");
  let (created, _) = registry.read_single_entry("orders", &silo.row_key).await.expect("read").expect("row");
  assert_eq!(created.status, SiloStatus::Created.as_str());
  assert_eq!(registry.find_primary_silo_endpoint().await.expect("primary"), None);
  assert!(registry.find_all_gateway_proxy_endpoints().await.expect("gateways").is_empty());

  registry.activate_silo_instance(&silo).await.expect("activate");
  let (active, _) = registry.read_single_entry("orders", &silo.row_key).await.expect("read").expect("row");
  assert_eq!(active.status, SiloStatus::Active.as_str());
  assert_eq!(registry.find_primary_silo_endpoint().await.expect("primary"), Some("127.0.0.1:11111".parse().expect("addr")));
  assert_eq!(registry.find_all_gateway_proxy_endpoints().await.expect("gateways"), vec![
    "127.0.0.1:30000".parse().expect("addr")
  ]);

  registry.unregister_silo_instance(&silo).await.expect("unregister");
  let (dead, _) = registry.read_single_entry("orders", &silo.row_key).await.expect("read").expect("row");
  assert_eq!(dead.status, SiloStatus::Dead.as_str());
  assert_eq!(registry.find_primary_silo_endpoint().await.expect("primary"), None);
  assert!(registry.find_all_gateway_proxy_endpoints().await.expect("gateways").is_empty());

  let silo_address = SiloAddress::new_local(11_111, 100);
  assert_eq!(events.drain(), vec![
    ClusterEvent::SiloRegistered { silo: silo_address },
    ClusterEvent::SiloStatusChanged { silo: silo_address, from: SiloStatus::Created, to: SiloStatus::Active },
    ClusterEvent::SiloStatusChanged { silo: silo_address, from: SiloStatus::Active, to: SiloStatus::Dead },
  ]);
}

#[tokio::test]
async fn two_active_silos_one_primary() {
  let store = InMemoryMembershipStore::new();
  let first_silo = registry(&store);
  let second_silo = registry(&store);
  first_silo.try_create_table_version_entry().await.expect("version entry");
  second_silo.try_create_table_version_entry().await.expect("version entry");
  let primary = record(11_111, 30_000, true);
  let secondary = record(11_112, 30_001, false);

  first_silo.register_silo_instance(&primary).await.expect("register primary");
  second_silo.register_silo_instance(&secondary).await.expect("register secondary");
  first_silo.activate_silo_instance(&primary).await.expect("activate primary");
  second_silo.activate_silo_instance(&secondary).await.expect("activate secondary");

  for view in [&first_silo, &second_silo] {
    assert_eq!(view.find_primary_silo_endpoint().await.expect("primary"), Some("127.0.0.1:11111".parse().expect("addr")));
    assert_eq!(view.find_all_gateway_proxy_endpoints().await.expect("gateways"), vec![
      "127.0.0.1:30000".parse().expect("addr"),
      "127.0.0.1:30001".parse().expect("addr"),
    ]);
  }
  assert_eq!(first_silo.read_all_entries().await.expect("rows").len(), 2);
}

#[tokio::test]
async fn restarted_silo_gets_a_new_row() {
  let store = InMemoryMembershipStore::new();
  let registry = registry(&store);
  registry.try_create_table_version_entry().await.expect("version entry");
  let before = SiloInstanceRecord::new("orders", SiloAddress::new_local(11_111, 1), "node", Utc::now());
  let after = SiloInstanceRecord::new("orders", SiloAddress::new_local(11_111, 2), "node", Utc::now());

  registry.register_silo_instance(&before).await.expect("first incarnation");
  registry.unregister_silo_instance(&before).await.expect("first incarnation dies");
  registry.register_silo_instance(&after).await.expect("second incarnation");
  registry.activate_silo_instance(&after).await.expect("second incarnation serves");

  let rows = registry.read_all_entries().await.expect("rows");
  let statuses: Vec<_> = rows.iter().map(|(row, _)| (row.generation, row.status.clone())).collect();
  assert_eq!(statuses, vec![(1, "Dead".to_string()), (2, "Active".to_string())]);
}
