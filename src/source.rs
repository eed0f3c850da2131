//! Configuration sources: ordered lists of bean definitions.

use std::any::Any;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::core::{BeanDefinition, BeanError, BeanInstance, BeanKey, TeardownHook};

/// A configuration unit declaring which beans to construct and how.
///
/// A `Source` is inert: building one never fails and has no effect until it is
/// handed to [`Registry::register_source`](crate::Registry::register_source),
/// where its bean names are validated. Beans keep the order they were added
/// in, and that order is what collection lookups later observe.
#[derive(Default)]
pub struct Source {
  definitions: Vec<BeanDefinition>,
}

impl Source {
  /// Creates a new, empty `Source`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- PRIVATE HELPERS ---

  fn add_internal<T: Any + Send + Sync>(
    &mut self,
    name: &str,
    preferred: bool,
    factory: impl Fn() -> Result<T, BeanError> + Send + Sync + 'static,
    teardown: Option<TeardownHook>,
  ) -> &mut Self {
    self.definitions.push(BeanDefinition {
      key: BeanKey::new::<T>(name),
      type_name: std::any::type_name::<T>(),
      preferred,
      factory: Box::new(move || factory().map(|value| Box::new(Arc::new(value)) as BeanInstance)),
      teardown,
      cell: OnceCell::new(),
    });
    self
  }

  // --- PUBLIC API ---

  /// Declares a bean built by an infallible factory.
  pub fn add_bean<T: Any + Send + Sync>(
    &mut self,
    name: &str,
    factory: impl Fn() -> T + Send + Sync + 'static,
  ) -> &mut Self {
    self.add_internal(name, false, move || Ok(factory()), None)
  }

  /// Declares a bean carrying the preferred-default marker, which resolves
  /// strict lookups when several beans of the same type are registered.
  pub fn add_preferred_bean<T: Any + Send + Sync>(
    &mut self,
    name: &str,
    factory: impl Fn() -> T + Send + Sync + 'static,
  ) -> &mut Self {
    self.add_internal(name, true, move || Ok(factory()), None)
  }

  /// Declares a bean whose factory may fail. A returned error aborts the
  /// registry's initialization.
  pub fn add_fallible_bean<T: Any + Send + Sync>(
    &mut self,
    name: &str,
    factory: impl Fn() -> Result<T, BeanError> + Send + Sync + 'static,
  ) -> &mut Self {
    self.add_internal(name, false, factory, None)
  }

  /// Declares a bean with a teardown hook. The hook runs against the
  /// constructed instance when the registry closes.
  pub fn add_bean_with_teardown<T: Any + Send + Sync>(
    &mut self,
    name: &str,
    factory: impl Fn() -> T + Send + Sync + 'static,
    teardown: impl Fn(&T) + Send + Sync + 'static,
  ) -> &mut Self {
    let erased: TeardownHook = Box::new(move |instance| {
      if let Some(bean) = instance.downcast_ref::<Arc<T>>() {
        teardown(bean);
      }
    });
    self.add_internal(name, false, move || Ok(factory()), Some(erased))
  }

  pub(crate) fn into_definitions(self) -> Vec<BeanDefinition> {
    self.definitions
  }
}
