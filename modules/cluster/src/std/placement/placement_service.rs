//! Placement entry point for the local silo.

extern crate std;

use alloc::{sync::Arc, vec::Vec};
use std::sync::{PoisonError, RwLock};

use tracing::{debug, info};

use super::local_placement_context::LocalPlacementContext;
use crate::core::{
  config::PlacementConfig,
  directory::{GrainDirectory, GrainId},
  events::{ClusterEvent, ClusterEventPublisher},
  membership::{MembershipTableData, SiloAddress},
  placement::{GrainTypeRegistry, PlacementDecision, PlacementDirectorRegistry, PlacementError, PlacementResult},
};

#[cfg(test)]
mod tests;

/// Resolves where grain activations live, as seen from the local silo.
///
/// The grain's kind selects the strategy, the strategy selects the director, and the director
/// decides against the directory and the latest active-silo view. Refusals are returned as
/// [`PlacementDecision::Refuse`]; they are answers, not failures.
pub struct PlacementService {
  local:       SiloAddress,
  directory:   Arc<dyn GrainDirectory>,
  grain_types: Arc<GrainTypeRegistry>,
  directors:   PlacementDirectorRegistry,
  config:      PlacementConfig,
  active:      RwLock<Vec<SiloAddress>>,
  events:      Option<Arc<ClusterEventPublisher>>,
}

impl PlacementService {
  /// Creates a service using the built-in directors. Until the first membership update only the
  /// local silo is considered active.
  #[must_use]
  pub fn new(
    local: SiloAddress,
    directory: Arc<dyn GrainDirectory>,
    grain_types: GrainTypeRegistry,
    config: PlacementConfig,
  ) -> Self {
    Self {
      local,
      directory,
      grain_types: Arc::new(grain_types),
      directors: PlacementDirectorRegistry::with_defaults(),
      config,
      active: RwLock::new(alloc::vec![local]),
      events: None,
    }
  }

  /// Replaces the dispatch table.
  #[must_use]
  pub fn with_directors(mut self, directors: PlacementDirectorRegistry) -> Self {
    self.directors = directors;
    self
  }

  /// Publishes placement events to `events`.
  #[must_use]
  pub fn with_events(mut self, events: Arc<ClusterEventPublisher>) -> Self {
    self.events = Some(events);
    self
  }

  /// Silo this service places for.
  #[must_use]
  pub const fn local_silo(&self) -> SiloAddress {
    self.local
  }

  /// Replaces the active-silo view with the active rows of `snapshot`.
  pub fn update_membership(&self, snapshot: &MembershipTableData) {
    let active = snapshot.active_silos();
    info!(local = %self.local, version = %snapshot.version(), active = active.len(), "placement membership view updated");
    *self.active.write().unwrap_or_else(PoisonError::into_inner) = active;
  }

  /// Current active-silo view.
  #[must_use]
  pub fn active_silos(&self) -> Vec<SiloAddress> {
    self.active.read().unwrap_or_else(PoisonError::into_inner).clone()
  }

  /// Decides where a call to `grain` should go, or refuses to host it here.
  ///
  /// # Errors
  ///
  /// Returns [`PlacementError`] when no director serves the grain's strategy or the directory
  /// cannot be consulted.
  pub async fn select_activation(&self, grain: &GrainId) -> Result<PlacementDecision, PlacementError> {
    let strategy = self.grain_types.strategy_for(grain);
    let director = self.directors.resolve(strategy)?;
    let context = self.context();
    let decision = director.on_select_activation(strategy, grain, &context).await?;
    match &decision {
      | PlacementDecision::Place(result) => {
        debug!(grain = %grain, silo = %result.silo(), strategy = %strategy, "activation selected");
        self.publish(ClusterEvent::PlacementResolved { grain: grain.clone(), silo: *result.silo(), strategy });
      },
      | PlacementDecision::Refuse { existing } => {
        debug!(grain = %grain, local = %self.local, existing = existing.len(), "activation refused");
        self.publish(ClusterEvent::PlacementRefused { grain: grain.clone(), existing: existing.clone() });
      },
    }
    Ok(decision)
  }

  /// Chooses the silo for a new activation of `grain`.
  ///
  /// # Errors
  ///
  /// Returns [`PlacementError`] when no director serves the grain's strategy.
  pub async fn add_activation(&self, grain: &GrainId) -> Result<PlacementResult, PlacementError> {
    let strategy = self.grain_types.strategy_for(grain);
    let director = self.directors.resolve(strategy)?;
    let context = self.context();
    let result = director.on_add_activation(strategy, grain, &context).await?;
    debug!(grain = %grain, silo = %result.silo(), strategy = %strategy, "activation placed");
    self.publish(ClusterEvent::PlacementResolved { grain: grain.clone(), silo: *result.silo(), strategy });
    Ok(result)
  }

  /// Checks that a route to `silo` still targets an active silo.
  ///
  /// # Errors
  ///
  /// Returns [`PlacementError::SiloUnavailable`] when `silo` is not in the active view.
  pub fn ensure_target_alive(&self, silo: &SiloAddress) -> Result<(), PlacementError> {
    if self.active.read().unwrap_or_else(PoisonError::into_inner).contains(silo) {
      Ok(())
    } else {
      Err(PlacementError::SiloUnavailable(*silo))
    }
  }

  fn context(&self) -> LocalPlacementContext {
    LocalPlacementContext::new(
      self.local,
      self.directory.clone(),
      self.grain_types.clone(),
      self.active_silos(),
      self.config.lookup_timeout(),
    )
  }

  fn publish(&self, event: ClusterEvent) {
    if let Some(events) = &self.events {
      events.enqueue(event);
    }
  }
}

impl core::fmt::Debug for PlacementService {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PlacementService")
      .field("local", &self.local)
      .field("directors", &self.directors)
      .field("config", &self.config)
      .finish_non_exhaustive()
  }
}
