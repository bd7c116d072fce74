//! Grain directory contract and its in-memory implementation.

/// Activation location triple.
pub mod activation_address;
/// Opaque per-activation identifier.
pub mod activation_id;
/// Errors raised by directory lookups.
pub mod directory_error;
/// Lookup contract consumed by placement.
pub mod grain_directory;
/// Grain identity.
pub mod grain_id;
/// Single-process directory.
pub mod in_memory_grain_directory;
/// Errors raised when registering an activation.
pub mod registration_error;

pub use activation_address::ActivationAddress;
pub use activation_id::ActivationId;
pub use directory_error::DirectoryError;
pub use grain_directory::GrainDirectory;
pub use grain_id::GrainId;
pub use in_memory_grain_directory::InMemoryGrainDirectory;
pub use registration_error::RegistrationError;
