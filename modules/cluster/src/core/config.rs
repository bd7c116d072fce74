//! Configuration values for the membership table and placement.

/// Errors raised by configuration builders.
pub mod config_error;
/// Membership table settings.
pub mod membership_table_config;
/// Builder for `MembershipTableConfig`.
pub mod membership_table_config_builder;
/// Placement settings.
pub mod placement_config;
/// Jitter variants applied to retry delays.
pub mod retry_jitter;
/// Bounded exponential backoff description.
pub mod retry_policy;

pub use config_error::ConfigError;
pub use membership_table_config::MembershipTableConfig;
pub use membership_table_config_builder::MembershipTableConfigBuilder;
pub use placement_config::PlacementConfig;
pub use retry_jitter::RetryJitter;
pub use retry_policy::RetryPolicy;
