use std::collections::BTreeSet;

use crate::core::{
  directory::GrainId,
  membership::SiloAddress,
  placement::{PlacementDirector, PlacementStrategy, RandomPlacementDirector, test_context::TestContext},
};

#[tokio::test]
async fn add_picks_only_active_silos() {
  let active: Vec<_> = (1..=3).map(|port| SiloAddress::new_local(port, 1)).collect();
  let context = TestContext::new(SiloAddress::new_local(9, 1), active.clone());
  let director = RandomPlacementDirector::with_seed(42);
  let mut seen = BTreeSet::new();

  for key in 0..64 {
    let result = director
      .on_add_activation(PlacementStrategy::Random, &GrainId::new("worker", key.to_string()), &context)
      .await
      .expect("placement");
    assert!(active.contains(result.silo()));
    seen.insert(*result.silo());
  }

  assert_eq!(seen.len(), 3);
}

#[tokio::test]
async fn add_falls_back_to_local_without_active_view() {
  let local = SiloAddress::new_local(9, 1);
  let context = TestContext::new(local, Vec::new());

  let result = RandomPlacementDirector::with_seed(1)
    .on_add_activation(PlacementStrategy::Random, &GrainId::new("worker", "a"), &context)
    .await
    .expect("placement");

  assert_eq!(result.silo(), &local);
}

#[tokio::test]
async fn select_reuses_live_activation() {
  let s1 = SiloAddress::new_local(1, 1);
  let s2 = SiloAddress::new_local(2, 1);
  let context = TestContext::new(s2, vec![s1, s2]);
  let grain = GrainId::new("worker", "a");
  context.directory.register(grain.clone(), s1).expect("registration");

  let decision = RandomPlacementDirector::with_seed(3)
    .on_select_activation(PlacementStrategy::Random, &grain, &context)
    .await
    .expect("decision");

  assert_eq!(decision.placement().map(|result| *result.silo()), Some(s1));
}
