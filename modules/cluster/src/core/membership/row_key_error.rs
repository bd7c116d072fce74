use alloc::string::String;

use thiserror::Error;

/// Errors produced while decoding a silo row key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowKeyError {
  /// A separator-delimited component is absent.
  #[error("row key `{row_key}` is missing its {component} component")]
  MissingComponent {
    /// Offending row key.
    row_key:   String,
    /// Name of the missing component.
    component: &'static str,
  },
  /// A component is present but cannot be parsed.
  #[error("row key `{row_key}` has an invalid {component} component")]
  InvalidComponent {
    /// Offending row key.
    row_key:   String,
    /// Name of the unparsable component.
    component: &'static str,
  },
}
