//! Silo instance registry used for bootstrap and gateway discovery.

/// Flat storage row for one silo incarnation.
pub mod silo_instance_record;
/// Register, activate, unregister and discovery queries.
pub mod silo_instance_registry;
/// Errors raised while decoding records.
pub mod silo_record_error;
/// Errors raised by the registry.
pub mod silo_registry_error;

pub use silo_instance_record::SiloInstanceRecord;
pub use silo_instance_registry::SiloInstanceRegistry;
pub use silo_record_error::SiloRecordError;
pub use silo_registry_error::SiloRegistryError;
