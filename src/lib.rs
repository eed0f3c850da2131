//! # Bean Registry
//!
//! A small, explicit bean registry for Rust.
//!
//! Callers declare [`Source`]s — configuration units listing which beans to
//! construct and how — hand them to a [`Registry`], and trigger a single eager
//! initialization pass. From then on the registry answers lookups against the
//! set of constructed beans of a requested type.
//!
//! ## Core Concepts
//!
//! - **Registry**: owns the lifecycle of every constructed bean, from
//!   registration through [`close`](Registry::close).
//! - **Source**: an inert declaration of beans; nothing is constructed until
//!   [`initialize`](Registry::initialize) runs, and construction is
//!   all-or-nothing.
//! - **Lookups**: a collection form ([`get_all`](Registry::get_all), plus an
//!   iterator and a named variant), a strict form ([`get_one`](Registry::get_one))
//!   and an optional form with a fallback factory
//!   ([`get_or_else`](Registry::get_or_else)).
//! - **Preferred default**: a per-bean marker that resolves strict lookups
//!   when several beans of one type are registered.
//!
//! ## Quick Start
//!
//! ```
//! use bean_registry::{Record, Registry, RegistryError, Source};
//!
//! # fn main() -> Result<(), RegistryError> {
//! let mut registry = Registry::new();
//!
//! let mut source = Source::new();
//! source.add_preferred_bean("record-primary", || Record::new(1, "primary"));
//! source.add_bean("record-secondary", || Record::new(2, "secondary"));
//! registry.register_source(source)?;
//! registry.initialize()?;
//!
//! // The collection lookup sees both beans, in registration order.
//! assert_eq!(registry.get_all::<Record>()?.len(), 2);
//!
//! // The strict lookup resolves through the preferred marker.
//! let primary = registry.get_one::<Record>()?;
//! assert_eq!(primary.to_string(), "Record{id=1, name='primary'}");
//!
//! // The optional lookup only builds its fallback when nothing matches.
//! let found = registry.get_or_else(Record::create_default)?;
//! assert_eq!(found.id(), Some(1));
//!
//! registry.close();
//! # Ok(())
//! # }
//! ```

mod core;
mod error;
mod record;
mod registry;
mod source;

pub use crate::core::BeanError;
pub use error::RegistryError;
pub use record::Record;
pub use registry::{LifecycleState, Registry};
pub use source::Source;
