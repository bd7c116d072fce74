use alloc::{collections::VecDeque, vec::Vec};

use spin::Mutex;
use tracing::warn;

use crate::core::events::cluster_event::ClusterEvent;


/// Events kept by [`ClusterEventPublisher::new`] before the oldest ones are dropped.
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// Lightweight publisher that queues events until an observer drains them.
///
/// The queue is bounded. Once full, each new event evicts the oldest pending one.
#[derive(Debug)]
pub struct ClusterEventPublisher {
  state: Mutex<QueueState>,
}

#[derive(Debug)]
struct QueueState {
  queue:    VecDeque<ClusterEvent>,
  capacity: usize,
  dropped:  u64,
}

impl ClusterEventPublisher {
  /// Creates a publisher holding up to [`DEFAULT_EVENT_CAPACITY`] events.
  #[must_use]
  pub const fn new() -> Self {
    Self::with_capacity(DEFAULT_EVENT_CAPACITY)
  }

  /// Creates a publisher holding up to `capacity` events. A zero capacity is raised to one.
  #[must_use]
  pub const fn with_capacity(capacity: usize) -> Self {
    let capacity = if capacity == 0 { 1 } else { capacity };
    Self { state: Mutex::new(QueueState { queue: VecDeque::new(), capacity, dropped: 0 }) }
  }

  /// Enqueues an event for later draining, evicting the oldest one when the queue is full.
  pub fn enqueue(&self, event: ClusterEvent) {
    let mut state = self.state.lock();
    if state.queue.len() >= state.capacity {
      state.queue.pop_front();
      state.dropped = state.dropped.saturating_add(1);
      if state.dropped == 1 {
        warn!(capacity = state.capacity, "cluster event queue full, dropping oldest events");
      }
    }
    state.queue.push_back(event);
  }

  /// Drains all pending events.
  pub fn drain(&self) -> Vec<ClusterEvent> {
    self.state.lock().queue.drain(..).collect()
  }

  /// Number of events waiting to be drained.
  #[must_use]
  pub fn pending(&self) -> usize {
    self.state.lock().queue.len()
  }

  /// Number of events evicted because nobody drained the queue in time.
  #[must_use]
  pub fn dropped(&self) -> u64 {
    self.state.lock().dropped
  }
}

impl Default for ClusterEventPublisher {
  fn default() -> Self {
    Self::new()
  }
}
