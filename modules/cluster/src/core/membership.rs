//! Membership entry model and the storage-agnostic membership table contract.

/// Per-row concurrency token.
pub mod entry_etag;
/// Row for one silo incarnation.
pub mod membership_entry;
/// Storage-agnostic table contract.
pub mod membership_table;
/// Snapshot returned by table reads.
pub mod membership_table_data;
/// Errors raised by table backends.
pub mod membership_table_error;
/// Errors produced while decoding row keys.
pub mod row_key_error;
/// Silo identity (endpoint + generation).
pub mod silo_address;
/// Silo lifecycle status.
pub mod silo_status;
/// Suspicion annotation appended by peers.
pub mod suspicion;
/// Whole-table version stamp.
pub mod table_version;

pub use entry_etag::EntryEtag;
pub use membership_entry::MembershipEntry;
pub use membership_table::MembershipTable;
pub use membership_table_data::MembershipTableData;
pub use membership_table_error::MembershipTableError;
pub use row_key_error::RowKeyError;
pub use silo_address::SiloAddress;
pub use silo_status::{SiloStatus, UnknownSiloStatus};
pub use suspicion::Suspicion;
pub use table_version::TableVersion;
