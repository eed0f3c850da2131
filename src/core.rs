//! Core, non-public data structures for the bean registry.

use std::any::{Any, TypeId};
use std::error::Error;
use std::fmt;

use once_cell::sync::OnceCell;

/// The error type a fallible bean factory may return.
pub type BeanError = Box<dyn Error + Send + Sync>;

/// A constructed bean, type-erased. The box wraps an `Arc<T>` so that lookups
/// can hand out cheap clones of the same instance.
pub(crate) type BeanInstance = Box<dyn Any + Send + Sync>;

pub(crate) type BeanFactory = Box<dyn Fn() -> Result<BeanInstance, BeanError> + Send + Sync>;

pub(crate) type TeardownHook = Box<dyn Fn(&(dyn Any + Send + Sync)) + Send + Sync>;

#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct BeanKey {
  pub(crate) type_id: TypeId,
  pub(crate) name: String,
}

impl BeanKey {
  pub(crate) fn new<T: Any + Send + Sync>(name: &str) -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      name: name.to_owned(),
    }
  }
}

impl fmt::Debug for BeanKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Key(TypeId({:?}), Name({}))", self.type_id, self.name)
  }
}

/// One declared bean: how to build it, and the slot it is built into.
///
/// The `cell` stays empty until the registry's initialization pass runs the
/// factory; lookups only ever see materialized cells.
pub(crate) struct BeanDefinition {
  pub(crate) key: BeanKey,
  pub(crate) type_name: &'static str,
  pub(crate) preferred: bool,
  pub(crate) factory: BeanFactory,
  pub(crate) teardown: Option<TeardownHook>,
  pub(crate) cell: OnceCell<BeanInstance>,
}

impl BeanDefinition {
  pub(crate) fn materialize(&self) -> Result<(), BeanError> {
    let instance = (self.factory)()?;
    // Definitions are materialized exactly once, by the single initialization
    // pass; a second set is an internal bug, not a caller error.
    if self.cell.set(instance).is_err() {
      panic!("bean {:?} was materialized twice", self.key);
    }
    Ok(())
  }
}
