//! Core primitives for silo membership and grain placement.

/// Configuration values for the membership table and placement.
pub mod config;
/// Grain directory contract and in-memory directory.
pub mod directory;
/// Events emitted by membership and placement.
pub mod events;
/// Membership entry model and the membership table contract.
pub mod membership;
/// Placement strategies, directors and their dispatch table.
pub mod placement;
/// Retry driver for contended conditional writes.
pub mod retry;
