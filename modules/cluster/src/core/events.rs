//! Membership and placement events queued for observers.

/// Event payload.
pub mod cluster_event;
/// Queue that buffers events until drained.
pub mod event_publisher;

pub use cluster_event::ClusterEvent;
pub use event_publisher::{ClusterEventPublisher, DEFAULT_EVENT_CAPACITY};
