//! Read, decide and conditionally write loop over a membership table.

use alloc::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::{membership_update_error::MembershipUpdateError, timeout_membership_table::TimeoutMembershipTable};
use crate::core::{
  config::{MembershipTableConfig, RetryPolicy},
  events::{ClusterEvent, ClusterEventPublisher},
  membership::{MembershipEntry, MembershipTable, SiloAddress, SiloStatus, Suspicion},
  retry::{RetryOutcome, RetryPolicyRunner},
};


/// Drives conditional writes against a membership table.
///
/// Every mutation re-reads the row, decides the new content from what it read and attempts a
/// compare-and-swap. A lost race backs off according to the retry policy and starts over. Table
/// faults are returned as they are.
#[derive(Clone)]
pub struct MembershipTableUpdater {
  table:        Arc<dyn MembershipTable>,
  retry_policy: RetryPolicy,
  events:       Option<Arc<ClusterEventPublisher>>,
}

impl MembershipTableUpdater {
  /// Creates an updater using `retry_policy` for contended writes.
  ///
  /// Calls reach `table` as is; deadlines are whatever `table` enforces.
  #[must_use]
  pub fn new(table: Arc<dyn MembershipTable>, retry_policy: RetryPolicy) -> Self {
    Self { table, retry_policy, events: None }
  }

  /// Creates an updater with the config's retry policy that bounds every table call by the
  /// config's operation timeout.
  #[must_use]
  pub fn from_config(table: Arc<dyn MembershipTable>, config: &MembershipTableConfig) -> Self {
    let bounded: Arc<dyn MembershipTable> = Arc::new(TimeoutMembershipTable::from_config(table, config));
    Self::new(bounded, config.retry_policy().clone())
  }

  /// Publishes membership events to `events`.
  #[must_use]
  pub fn with_events(mut self, events: Arc<ClusterEventPublisher>) -> Self {
    self.events = Some(events);
    self
  }

  /// Underlying table.
  #[must_use]
  pub fn table(&self) -> &Arc<dyn MembershipTable> {
    &self.table
  }

  /// Inserts the row for a new silo incarnation.
  ///
  /// # Errors
  ///
  /// Returns [`MembershipUpdateError::AlreadyExists`] when the silo already has a row,
  /// [`MembershipUpdateError::RetryExhausted`] when contention persists, and table faults as is.
  pub async fn insert_entry(&self, entry: &MembershipEntry) -> Result<(), MembershipUpdateError> {
    let silo = *entry.silo_address();
    let mut runner = RetryPolicyRunner::new(self.retry_policy.clone());
    loop {
      let snapshot = self.table.read_row(&silo).await?;
      if snapshot.entry_for(&silo).is_some() {
        return Err(MembershipUpdateError::AlreadyExists(silo));
      }
      if self.table.insert_row(entry, snapshot.version()).await? {
        info!(silo = %silo, status = %entry.status(), "membership row inserted");
        self.publish(ClusterEvent::SiloRegistered { silo });
        return Ok(());
      }
      Self::back_off(&mut runner, "insert_entry", &silo).await?;
    }
  }

  /// Rewrites the row of `silo` with whatever `decide` returns.
  ///
  /// `decide` sees the freshly read row on every attempt. Returning `Ok(None)` leaves the row
  /// untouched and yields the stored entry.
  ///
  /// # Errors
  ///
  /// Returns [`MembershipUpdateError::NotFound`] when the row is missing, errors produced by
  /// `decide`, [`MembershipUpdateError::RetryExhausted`] when contention persists, and table
  /// faults as is.
  pub async fn update_entry<F>(&self, silo: &SiloAddress, mut decide: F) -> Result<MembershipEntry, MembershipUpdateError>
  where
    F: FnMut(&MembershipEntry) -> Result<Option<MembershipEntry>, MembershipUpdateError> + Send, {
    let mut runner = RetryPolicyRunner::new(self.retry_policy.clone());
    loop {
      let snapshot = self.table.read_row(silo).await?;
      let Some((current, etag)) = snapshot.entry_for(silo) else {
        return Err(MembershipUpdateError::NotFound(*silo));
      };
      let Some(next) = decide(current)? else {
        return Ok(current.clone());
      };
      if self.table.update_row(&next, etag, snapshot.version()).await? {
        return Ok(next);
      }
      Self::back_off(&mut runner, "update_entry", silo).await?;
    }
  }

  /// Moves `silo` forward to `status`. Writing the current status again is a no-op.
  ///
  /// # Errors
  ///
  /// Returns [`MembershipUpdateError::InvalidTransition`] for a backward move, plus the errors of
  /// [`Self::update_entry`].
  pub async fn update_status(
    &self,
    silo: &SiloAddress,
    status: SiloStatus,
  ) -> Result<MembershipEntry, MembershipUpdateError> {
    let mut previous = status;
    let updated = self
      .update_entry(silo, |current| {
        previous = current.status();
        if current.status() == status {
          return Ok(None);
        }
        if !current.status().can_transition_to(status) {
          return Err(MembershipUpdateError::InvalidTransition { silo: *silo, from: current.status(), to: status });
        }
        Ok(Some(current.clone().with_status(status).with_i_am_alive_time(Utc::now())))
      })
      .await?;
    if previous != status {
      info!(silo = %silo, from = %previous, to = %status, "silo status changed");
      self.publish(ClusterEvent::SiloStatusChanged { silo: *silo, from: previous, to: status });
    }
    Ok(updated)
  }

  /// Appends a suspicion raised by `suspecting` against `silo`.
  ///
  /// # Errors
  ///
  /// Returns the errors of [`Self::update_entry`].
  pub async fn add_suspicion(
    &self,
    silo: &SiloAddress,
    suspecting: &SiloAddress,
    suspected_at: DateTime<Utc>,
  ) -> Result<MembershipEntry, MembershipUpdateError> {
    let updated = self
      .update_entry(silo, |current| Ok(Some(current.clone().with_suspicion(Suspicion::new(*suspecting, suspected_at)))))
      .await?;
    warn!(silo = %silo, suspecting = %suspecting, votes = updated.suspicions().len(), "suspicion recorded");
    self.publish(ClusterEvent::SuspicionRecorded { silo: *silo, suspecting: *suspecting });
    Ok(updated)
  }

  /// Refreshes the I-am-alive time of `entry`'s row without touching the version.
  ///
  /// # Errors
  ///
  /// Returns table faults as is.
  pub async fn heartbeat(&self, entry: &MembershipEntry, alive_at: DateTime<Utc>) -> Result<(), MembershipUpdateError> {
    let refreshed = entry.clone().with_i_am_alive_time(alive_at);
    self.table.merge_alive(&refreshed).await?;
    debug!(silo = %entry.silo_address(), "heartbeat merged");
    Ok(())
  }

  async fn back_off(
    runner: &mut RetryPolicyRunner,
    operation: &'static str,
    silo: &SiloAddress,
  ) -> Result<(), MembershipUpdateError> {
    match runner.next_outcome() {
      | RetryOutcome::RetryAfter(delay) => {
        debug!(operation, silo = %silo, attempt = runner.attempts(), ?delay, "membership write lost the race, retrying");
        if !delay.is_zero() {
          tokio::time::sleep(delay).await;
        }
        Ok(())
      },
      | RetryOutcome::GiveUp => {
        warn!(operation, silo = %silo, attempts = runner.attempts(), "membership write retries exhausted");
        Err(MembershipUpdateError::RetryExhausted { operation, silo: *silo, attempts: runner.attempts() })
      },
    }
  }

  fn publish(&self, event: ClusterEvent) {
    if let Some(events) = &self.events {
      events.enqueue(event);
    }
  }
}

impl core::fmt::Debug for MembershipTableUpdater {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("MembershipTableUpdater")
      .field("deployment_id", &self.table.deployment_id())
      .field("retry_policy", &self.retry_policy)
      .finish()
  }
}
