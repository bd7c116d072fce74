//! Contract every membership table backend must satisfy.
//!
//! Each backend's test file builds fresh tables and calls these cases.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use silo_cluster_rs::core::membership::{
  EntryEtag, MembershipEntry, MembershipTable, MembershipTableError, SiloAddress, SiloStatus, Suspicion,
};

pub fn sample_entry(port: u16, generation: i32) -> MembershipEntry {
  let start = Utc.with_ymd_and_hms(2024, 5, 17, 8, 30, 0).single().expect("time") + Duration::milliseconds(123);
  MembershipEntry::new(SiloAddress::new_local(port, generation), format!("host-{port}"), start)
    .with_status(SiloStatus::Joining)
    .with_proxy_port(Some(port + 10_000))
    .with_role_name("frontend")
    .with_instance_name(format!("frontend-{port}"))
    .with_zones(1, 2)
    .with_i_am_alive_time(start + Duration::seconds(3))
    .with_suspicion(Suspicion::new(SiloAddress::new_local(9_999, 1), start + Duration::seconds(1)))
}

pub async fn uninitialized_reads_fail(table: &dyn MembershipTable) {
  assert!(!table.initialize(false).await.expect("probe"));
  assert!(matches!(table.read_all().await, Err(MembershipTableError::NotInitialized { .. })));
  assert!(matches!(
    table.read_row(&SiloAddress::new_local(1, 1)).await,
    Err(MembershipTableError::NotInitialized { .. })
  ));
}

pub async fn initialize_is_idempotent(table: &dyn MembershipTable) {
  assert!(table.initialize(true).await.expect("first"));
  let version = table.read_all().await.expect("read").version().clone();
  assert!(table.initialize(true).await.expect("second"));
  assert!(table.initialize(false).await.expect("probe"));

  assert_eq!(table.read_all().await.expect("read").version(), &version);
  assert_eq!(version.version(), 0);
}

pub async fn fresh_deployment_has_no_members(table: &dyn MembershipTable) {
  table.initialize(true).await.expect("init");

  let all = table.read_all().await.expect("read all");
  let row = table.read_row(&SiloAddress::new_local(11_111, 1)).await.expect("read row");

  assert!(all.is_empty());
  assert!(row.is_empty());
  assert_eq!(row.version(), all.version());
}

pub async fn inserted_row_reads_back_field_for_field(table: &dyn MembershipTable) {
  table.initialize(true).await.expect("init");
  let version = table.read_all().await.expect("read").version().clone();
  let entry = sample_entry(11_111, 7);

  assert!(table.insert_row(&entry, &version).await.expect("insert"));

  let all = table.read_all().await.expect("read all");
  assert_eq!(all.len(), 1);
  assert_eq!(all.entries()[0].0, entry);
  assert_eq!(all.version().version(), version.version() + 1);
  let row = table.read_row(entry.silo_address()).await.expect("read row");
  assert_eq!(row.entries(), all.entries());
  assert!(table.read_row(&SiloAddress::new_local(11_111, 8)).await.expect("other generation").is_empty());
}

pub async fn insert_rejects_duplicates_and_stale_versions(table: &dyn MembershipTable) {
  table.initialize(true).await.expect("init");
  let v0 = table.read_all().await.expect("read").version().clone();
  assert!(table.insert_row(&sample_entry(1, 1), &v0).await.expect("insert"));
  let v1 = table.read_all().await.expect("read").version().clone();

  assert!(!table.insert_row(&sample_entry(2, 1), &v0).await.expect("stale version"));
  assert!(!table.insert_row(&sample_entry(1, 1), &v1).await.expect("duplicate key"));
  assert_eq!(table.read_all().await.expect("read").version(), &v1);
}

/// Two writers that read the same version race to insert different silos.
pub async fn concurrent_inserts_have_one_winner(left: Arc<dyn MembershipTable>, right: Arc<dyn MembershipTable>) {
  left.initialize(true).await.expect("init");
  let version = left.read_all().await.expect("read").version().clone();

  let first = {
    let (table, version) = (left.clone(), version.clone());
    tokio::spawn(async move { table.insert_row(&sample_entry(1, 1), &version).await })
  };
  let second = {
    let (table, version) = (right.clone(), version.clone());
    tokio::spawn(async move { table.insert_row(&sample_entry(2, 1), &version).await })
  };
  let outcomes = [first.await.expect("join").expect("insert"), second.await.expect("join").expect("insert")];

  assert_eq!(outcomes.iter().filter(|won| **won).count(), 1);
  let all = right.read_all().await.expect("read");
  assert_eq!(all.len(), 1);
  assert_eq!(all.version().version(), version.version() + 1);
}

pub async fn update_requires_current_token_and_version(table: &dyn MembershipTable) {
  table.initialize(true).await.expect("init");
  let v0 = table.read_all().await.expect("read").version().clone();
  let entry = sample_entry(1, 1);
  table.insert_row(&entry, &v0).await.expect("insert");
  let snapshot = table.read_row(entry.silo_address()).await.expect("read");
  let (_, etag) = snapshot.entry_for(entry.silo_address()).expect("row").clone();
  let active = entry.clone().with_status(SiloStatus::Active);

  assert!(!table.update_row(&active, &EntryEtag::new("stale"), snapshot.version()).await.expect("stale token"));
  assert!(!table.update_row(&active, &etag, &v0).await.expect("stale version"));
  assert!(table.update_row(&active, &etag, snapshot.version()).await.expect("update"));
  assert!(!table.update_row(&active, &etag, snapshot.version()).await.expect("replay"));

  let after = table.read_row(entry.silo_address()).await.expect("read");
  assert_eq!(after.entries()[0].0, active);
  assert_ne!(after.entries()[0].1, etag);
  assert_eq!(after.version().version(), snapshot.version().version() + 1);
}

pub async fn update_of_missing_row_fails(table: &dyn MembershipTable) {
  table.initialize(true).await.expect("init");
  let version = table.read_all().await.expect("read").version().clone();

  assert!(!table.update_row(&sample_entry(5, 5), &EntryEtag::new("none"), &version).await.expect("update"));
  assert!(table.read_all().await.expect("read").is_empty());
}

pub async fn merge_alive_never_invalidates_a_pending_write(table: &dyn MembershipTable) {
  table.initialize(true).await.expect("init");
  let v0 = table.read_all().await.expect("read").version().clone();
  let entry = sample_entry(1, 1);
  table.insert_row(&entry, &v0).await.expect("insert");
  let snapshot = table.read_row(entry.silo_address()).await.expect("read");
  let (_, etag) = snapshot.entries()[0].clone();
  let alive = entry.i_am_alive_time() + Duration::seconds(30);

  table.merge_alive(&entry.clone().with_i_am_alive_time(alive)).await.expect("merge");

  let merged = table.read_row(entry.silo_address()).await.expect("read");
  assert_eq!(merged.entries()[0].0.i_am_alive_time(), alive);
  assert_eq!(merged.entries()[0].0.status(), entry.status());
  assert_eq!(merged.version(), snapshot.version());
  let active = entry.with_status(SiloStatus::Active).with_i_am_alive_time(alive);
  assert!(table.update_row(&active, &etag, snapshot.version()).await.expect("update after merge"));
}

pub async fn delete_deployment_entries_is_idempotent(table: &dyn MembershipTable) {
  table.initialize(true).await.expect("init");
  let version = table.read_all().await.expect("read").version().clone();
  table.insert_row(&sample_entry(1, 1), &version).await.expect("insert");
  let deployment = table.deployment_id().to_owned();

  table.delete_deployment_entries(&deployment).await.expect("delete");
  table.delete_deployment_entries(&deployment).await.expect("delete again");

  assert!(!table.initialize(false).await.expect("probe"));
  assert!(table.initialize(true).await.expect("reinit"));
  assert!(table.read_all().await.expect("read").is_empty());
}

pub async fn version_from_before_teardown_is_rejected(table: &dyn MembershipTable) {
  table.initialize(true).await.expect("init");
  let stale = table.read_all().await.expect("read").version().clone();
  let deployment = table.deployment_id().to_owned();

  table.delete_deployment_entries(&deployment).await.expect("delete");
  table.initialize(true).await.expect("reinit");
  let fresh = table.read_all().await.expect("read").version().clone();

  assert_ne!(fresh, stale);
  assert!(!table.insert_row(&sample_entry(1, 1), &stale).await.expect("stale insert"));
  assert!(table.read_all().await.expect("read").is_empty());
  assert!(table.insert_row(&sample_entry(1, 1), &fresh).await.expect("insert"));
}
