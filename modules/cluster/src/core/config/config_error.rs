/// Errors that can occur while building a configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
  /// No deployment id was supplied.
  #[error("deployment id must be configured before building the membership table config")]
  MissingDeploymentId,
  /// The deployment id was empty or whitespace only.
  #[error("deployment id must not be blank")]
  BlankDeploymentId,
  /// A timeout was configured as zero.
  #[error("`{0}` must be greater than zero")]
  ZeroTimeout(&'static str),
  /// The retry backoff bounds are inverted.
  #[error("initial backoff must not exceed max backoff")]
  InvertedBackoff,
}
