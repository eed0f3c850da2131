//! The registry error taxonomy.

use thiserror::Error;

/// Errors surfaced by registry registration, initialization and lookup.
///
/// Every error is returned to the caller immediately; nothing is retried or
/// swallowed inside the registry. The one conversion from a failure condition
/// into a value is [`Registry::get_or_else`](crate::Registry::get_or_else),
/// which maps `NotFound` and `AmbiguousLookup` onto its fallback factory.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
  /// Malformed registration input: an empty or duplicate bean name, or a
  /// source added once the registry is already initialized.
  #[error("invalid source configuration: {0}")]
  Configuration(String),

  /// A declared bean could not be constructed during initialization. The
  /// registry is left in its failed terminal state, and later operations on
  /// it report this variant as well.
  #[error("registry initialization failed: {0}")]
  Initialization(String),

  /// A strict lookup matched no registered bean.
  #[error("no bean of type `{type_name}` is registered")]
  NotFound { type_name: &'static str },

  /// A strict lookup matched several beans and not exactly one of them is
  /// marked preferred.
  #[error("{count} beans of type `{type_name}` match and none resolves as the preferred default")]
  AmbiguousLookup {
    type_name: &'static str,
    count: usize,
  },

  /// The registry was closed before the operation ran.
  #[error("registry is closed")]
  ClosedRegistry,
}
