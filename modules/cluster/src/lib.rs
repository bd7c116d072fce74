//! Silo membership and grain placement core.
//!
//! Silos agree on who is alive through a shared membership table guarded by optimistic
//! concurrency, discover gateways and the primary silo through the silo instance registry, and
//! decide where a grain activation lives through strategy-specific placement directors.
//!
//! `core` holds runtime-agnostic types, contracts and placement algorithms. `std` holds the
//! tokio/filesystem pieces: table backends, the CAS retry driver, the registry and the placement
//! service.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

extern crate alloc;

/// Runtime-agnostic membership, directory and placement primitives.
pub mod core;
/// Host-runtime backends, registry and placement service.
pub mod std;
