use core::time::Duration;

use crate::{
  core::{
    config::MembershipTableConfig,
    membership::{MembershipTable, MembershipTableError},
  },
  std::membership::{InMemoryMembershipStore, InMemoryMembershipTable, TimeoutMembershipTable},
};

fn config() -> MembershipTableConfig {
  MembershipTableConfig::builder()
    .deployment_id("dep")
    .operation_timeout(Duration::from_millis(100))
    .build()
    .expect("config")
}

#[tokio::test(start_paused = true)]
async fn slow_backend_times_out() {
  let store = InMemoryMembershipStore::new();
  let config = config();
  let table = TimeoutMembershipTable::from_config(InMemoryMembershipTable::new(&config, store.clone()), &config);
  store.set_latency(Duration::from_secs(5));

  let result = table.initialize(true).await;

  assert_eq!(result, Err(MembershipTableError::Timeout { operation: "initialize", timeout: Duration::from_millis(100) }));
  assert_eq!(store.deployment_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn fast_backend_passes_through() {
  let store = InMemoryMembershipStore::new();
  let config = config();
  let table = TimeoutMembershipTable::from_config(InMemoryMembershipTable::new(&config, store.clone()), &config);
  store.set_latency(Duration::from_millis(10));

  assert_eq!(table.initialize(true).await, Ok(true));
  assert_eq!(table.deployment_id(), "dep");
  assert!(table.read_all().await.expect("read").is_empty());
}
