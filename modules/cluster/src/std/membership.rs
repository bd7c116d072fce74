//! Membership table backends and the conditional-write driver.

/// Versioned row set shared by the backends.
pub mod deployment_table;
/// JSON-file backend.
pub mod file_membership_table;
/// Shared in-process storage.
pub mod in_memory_membership_store;
/// Backend over the shared in-process storage.
pub mod in_memory_membership_table;
/// Read, decide and conditionally write with bounded retries.
pub mod membership_table_updater;
/// Errors raised by the updater.
pub mod membership_update_error;
/// Deadline decorator for any backend.
pub mod timeout_membership_table;

pub use deployment_table::DeploymentTable;
pub use file_membership_table::FileMembershipTable;
pub use in_memory_membership_store::InMemoryMembershipStore;
pub use in_memory_membership_table::InMemoryMembershipTable;
pub use membership_table_updater::MembershipTableUpdater;
pub use membership_update_error::MembershipUpdateError;
pub use timeout_membership_table::TimeoutMembershipTable;
