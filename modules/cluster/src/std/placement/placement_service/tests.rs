use std::sync::Arc;

use chrono::Utc;

use crate::{
  core::{
    config::PlacementConfig,
    directory::{GrainId, InMemoryGrainDirectory},
    events::{ClusterEvent, ClusterEventPublisher},
    membership::{EntryEtag, MembershipEntry, MembershipTableData, SiloAddress, SiloStatus, TableVersion},
    placement::{GrainTypeRegistry, PlacementDecision, PlacementDirectorRegistry, PlacementError, PlacementStrategy},
  },
  std::placement::PlacementService,
};

fn grain_types() -> GrainTypeRegistry {
  GrainTypeRegistry::default()
    .with_grain_type("ledger", "Bank.LedgerGrain", PlacementStrategy::Pinned)
    .with_grain_type("session", "Web.SessionGrain", PlacementStrategy::PreferLocal)
}

fn membership(active: &[SiloAddress], dead: &[SiloAddress]) -> MembershipTableData {
  let rows = active
    .iter()
    .map(|silo| (*silo, SiloStatus::Active))
    .chain(dead.iter().map(|silo| (*silo, SiloStatus::Dead)))
    .map(|(silo, status)| (MembershipEntry::new(silo, "host", Utc::now()).with_status(status), EntryEtag::new("e")))
    .collect();
  MembershipTableData::new(rows, TableVersion::new(4, "v4"))
}

fn service(local: SiloAddress, directory: &Arc<InMemoryGrainDirectory>) -> PlacementService {
  PlacementService::new(local, directory.clone(), grain_types(), PlacementConfig::default())
}

#[tokio::test]
async fn pinned_grain_is_refused_away_from_its_owner() {
  let s1 = SiloAddress::new_local(11111, 1);
  let s2 = SiloAddress::new_local(11112, 1);
  let directory = Arc::new(InMemoryGrainDirectory::new());
  let events = Arc::new(ClusterEventPublisher::new());
  let on_s1 = service(s1, &directory).with_events(events.clone());
  let on_s2 = service(s2, &directory).with_events(events.clone());
  let grain = GrainId::new("ledger", "acct-1");

  let placed = on_s1.add_activation(&grain).await.expect("placement");
  assert_eq!(placed.grain_type_name(), "Bank.LedgerGrain");
  let existing = directory.register(grain.clone(), *placed.silo()).expect("registration");
  let refused = on_s2.select_activation(&grain).await.expect("decision");

  assert_eq!(refused, PlacementDecision::Refuse { existing: vec![existing.clone()] });
  assert_eq!(events.drain(), vec![
    ClusterEvent::PlacementResolved { grain: grain.clone(), silo: s1, strategy: PlacementStrategy::Pinned },
    ClusterEvent::PlacementRefused { grain, existing: vec![existing] },
  ]);
}

#[tokio::test]
async fn prefer_local_migrates_after_membership_update() {
  let s1 = SiloAddress::new_local(1, 1);
  let s2 = SiloAddress::new_local(2, 1);
  let directory = Arc::new(InMemoryGrainDirectory::new());
  let on_s2 = service(s2, &directory);
  let grain = GrainId::new("session", "u-1");
  directory.register(grain.clone(), s1).expect("registration");

  on_s2.update_membership(&membership(&[s1, s2], &[]));
  let before = on_s2.select_activation(&grain).await.expect("decision");
  on_s2.update_membership(&membership(&[s2], &[s1]));
  let after = on_s2.select_activation(&grain).await.expect("decision");

  assert_eq!(before.placement().map(|result| *result.silo()), Some(s1));
  assert_eq!(after.placement().map(|result| *result.silo()), Some(s2));
}

#[tokio::test]
async fn ensure_target_alive_tracks_membership() {
  let s1 = SiloAddress::new_local(1, 1);
  let s2 = SiloAddress::new_local(2, 1);
  let on_s1 = service(s1, &Arc::new(InMemoryGrainDirectory::new()));
  assert_eq!(on_s1.active_silos(), vec![s1]);

  on_s1.update_membership(&membership(&[s1, s2], &[]));
  assert_eq!(on_s1.ensure_target_alive(&s2), Ok(()));

  on_s1.update_membership(&membership(&[s1], &[s2]));
  assert_eq!(on_s1.ensure_target_alive(&s2), Err(PlacementError::SiloUnavailable(s2)));
}

#[tokio::test]
async fn missing_director_is_reported() {
  let s1 = SiloAddress::new_local(1, 1);
  let on_s1 = service(s1, &Arc::new(InMemoryGrainDirectory::new())).with_directors(PlacementDirectorRegistry::new());

  let result = on_s1.select_activation(&GrainId::new("ledger", "x")).await;

  assert_eq!(result, Err(PlacementError::UnknownStrategy(PlacementStrategy::Pinned)));
}

#[tokio::test]
async fn unregistered_kinds_use_random_among_active() {
  let s1 = SiloAddress::new_local(1, 1);
  let s2 = SiloAddress::new_local(2, 1);
  let on_s1 = service(s1, &Arc::new(InMemoryGrainDirectory::new()));
  on_s1.update_membership(&membership(&[s2], &[s1]));

  let result = on_s1.add_activation(&GrainId::new("worker", "7")).await.expect("placement");

  assert_eq!(result.silo(), &s2);
  assert_eq!(result.strategy(), PlacementStrategy::Random);
  assert_eq!(result.grain_type_name(), "worker");
}
