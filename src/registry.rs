//! The `Registry` itself: lifecycle management and the lookup operations.

use std::any::{Any, TypeId};
use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;

use crate::core::BeanDefinition;
use crate::error::RegistryError;
use crate::source::Source;

/// Where a registry is in its life.
///
/// The machine is `Unregistered → Registering → Ready → Closed`, with `Failed`
/// as an absorbing state entered when initialization aborts. No transition
/// leaves `Closed` or `Failed`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
  #[default]
  Unregistered,
  Registering,
  Ready,
  Closed,
  Failed,
}

/// The bean registry.
///
/// Sources are queued with [`register_source`](Registry::register_source),
/// every declared bean is constructed eagerly by
/// [`initialize`](Registry::initialize), and lookups answer against the set of
/// constructed beans of the requested type. Construction is all-or-nothing: a
/// single factory failure aborts initialization and the registry never becomes
/// partially ready.
///
/// Mutating operations take `&mut self`; the registry does no internal
/// serialization of its lifecycle, so callers wanting to share one across
/// threads must bring their own.
#[derive(Default)]
pub struct Registry {
  /// Every queued definition, in registration order.
  definitions: Vec<BeanDefinition>,
  /// Type index over `definitions`, built during initialization.
  index: DashMap<TypeId, Vec<usize>>,
  names: HashSet<String>,
  state: LifecycleState,
}

impl Registry {
  /// Creates a new, empty `Registry`.
  pub fn new() -> Self {
    Self::default()
  }

  /// The registry's current lifecycle state.
  pub fn state(&self) -> LifecycleState {
    self.state
  }

  // --- PRIVATE HELPERS ---

  fn failed_error() -> RegistryError {
    RegistryError::Initialization("registry is in the failed state".to_owned())
  }

  fn ensure_open(&self) -> Result<(), RegistryError> {
    match self.state {
      LifecycleState::Closed => Err(RegistryError::ClosedRegistry),
      LifecycleState::Failed => Err(Self::failed_error()),
      _ => Ok(()),
    }
  }

  fn indices_of<T: Any + Send + Sync>(&self) -> Vec<usize> {
    self
      .index
      .get(&TypeId::of::<T>())
      .map(|entry| entry.value().clone())
      .unwrap_or_default()
  }

  fn instance<T: Any + Send + Sync>(&self, idx: usize) -> Arc<T> {
    let definition = &self.definitions[idx];
    definition
      .cell
      .get()
      .and_then(|instance| instance.downcast_ref::<Arc<T>>())
      .cloned()
      .unwrap_or_else(|| {
        panic!(
          "bean {:?} is indexed for type `{}` but holds another type",
          definition.key,
          std::any::type_name::<T>()
        )
      })
  }

  // --- REGISTRATION & LIFECYCLE ---

  /// Queues a source's bean definitions for construction.
  ///
  /// The whole source is validated before anything is queued: every bean name
  /// must be non-empty and unique across the registry, and a rejected source
  /// registers none of its beans. Nothing is constructed until
  /// [`initialize`](Registry::initialize) runs.
  pub fn register_source(&mut self, source: Source) -> Result<(), RegistryError> {
    match self.state {
      LifecycleState::Unregistered | LifecycleState::Registering => {}
      LifecycleState::Ready => {
        return Err(RegistryError::Configuration(
          "sources cannot be added once the registry is initialized".to_owned(),
        ))
      }
      LifecycleState::Closed => return Err(RegistryError::ClosedRegistry),
      LifecycleState::Failed => return Err(Self::failed_error()),
    }

    let definitions = source.into_definitions();
    let mut batch: HashSet<&str> = HashSet::new();
    for definition in &definitions {
      let name = definition.key.name.as_str();
      if name.is_empty() {
        return Err(RegistryError::Configuration(
          "bean name must not be empty".to_owned(),
        ));
      }
      if self.names.contains(name) || !batch.insert(name) {
        return Err(RegistryError::Configuration(format!(
          "duplicate bean name `{name}`"
        )));
      }
    }

    tracing::debug!(beans = definitions.len(), "queued bean definitions");
    self
      .names
      .extend(definitions.iter().map(|definition| definition.key.name.clone()));
    self.definitions.extend(definitions);
    self.state = LifecycleState::Registering;
    Ok(())
  }

  /// Constructs every queued bean and moves the registry to `Ready`.
  ///
  /// Beans are built eagerly, in registration order. The first factory
  /// failure aborts: the registry enters its `Failed` terminal state, nothing
  /// is visible to lookups, and the error names the offending bean.
  pub fn initialize(&mut self) -> Result<(), RegistryError> {
    match self.state {
      LifecycleState::Unregistered | LifecycleState::Registering => {}
      LifecycleState::Ready => {
        return Err(RegistryError::Initialization(
          "registry is already initialized".to_owned(),
        ))
      }
      LifecycleState::Closed => return Err(RegistryError::ClosedRegistry),
      LifecycleState::Failed => return Err(Self::failed_error()),
    }

    for (idx, definition) in self.definitions.iter().enumerate() {
      if let Err(err) = definition.materialize() {
        self.state = LifecycleState::Failed;
        self.index.clear();
        tracing::error!(bean = %definition.key.name, %err, "bean construction failed");
        return Err(RegistryError::Initialization(format!(
          "bean `{}` could not be constructed: {err}",
          definition.key.name
        )));
      }
      self.index.entry(definition.key.type_id).or_default().push(idx);
    }

    self.state = LifecycleState::Ready;
    tracing::debug!(beans = self.definitions.len(), "registry ready");
    Ok(())
  }

  /// Runs teardown hooks in reverse registration order, releases every bean,
  /// and moves the registry to `Closed`.
  ///
  /// Closing an already-closed registry is a no-op. Closing a `Failed`
  /// registry releases whatever was constructed but stays `Failed`.
  pub fn close(&mut self) {
    match self.state {
      LifecycleState::Closed => {}
      LifecycleState::Failed => self.release(),
      _ => {
        self.release();
        self.state = LifecycleState::Closed;
        tracing::debug!("registry closed");
      }
    }
  }

  fn release(&mut self) {
    for definition in self.definitions.iter().rev() {
      if let (Some(hook), Some(instance)) = (definition.teardown.as_ref(), definition.cell.get()) {
        hook(instance.as_ref());
      }
    }
    self.definitions.clear();
    self.index.clear();
    self.names.clear();
  }

  // --- LOOKUPS ---

  /// Every constructed bean of type `T`, in registration order.
  ///
  /// Zero matches yield an empty vec, not an error.
  pub fn get_all<T: Any + Send + Sync>(&self) -> Result<Vec<Arc<T>>, RegistryError> {
    self.ensure_open()?;
    Ok(
      self
        .indices_of::<T>()
        .into_iter()
        .map(|idx| self.instance(idx))
        .collect(),
    )
  }

  /// The collection lookup paired with each bean's declared name.
  pub fn get_all_named<T: Any + Send + Sync>(
    &self,
  ) -> Result<Vec<(String, Arc<T>)>, RegistryError> {
    self.ensure_open()?;
    Ok(
      self
        .indices_of::<T>()
        .into_iter()
        .map(|idx| (self.definitions[idx].key.name.clone(), self.instance(idx)))
        .collect(),
    )
  }

  /// The iterator form of [`get_all`](Registry::get_all).
  pub fn iter<T: Any + Send + Sync>(
    &self,
  ) -> Result<impl Iterator<Item = Arc<T>> + '_, RegistryError> {
    self.ensure_open()?;
    Ok(
      self
        .indices_of::<T>()
        .into_iter()
        .map(move |idx| self.instance(idx)),
    )
  }

  /// The single bean of type `T`.
  ///
  /// Fails with [`RegistryError::NotFound`] on zero matches. With several
  /// matches, the one bean carrying the preferred marker wins; zero or more
  /// than one preferred marker is an [`RegistryError::AmbiguousLookup`].
  pub fn get_one<T: Any + Send + Sync>(&self) -> Result<Arc<T>, RegistryError> {
    self.ensure_open()?;
    let matches = self.indices_of::<T>();
    match matches.as_slice() {
      [] => Err(RegistryError::NotFound {
        type_name: std::any::type_name::<T>(),
      }),
      [idx] => Ok(self.instance(*idx)),
      _ => {
        let mut preferred = matches
          .iter()
          .copied()
          .filter(|&idx| self.definitions[idx].preferred);
        match (preferred.next(), preferred.next()) {
          (Some(idx), None) => Ok(self.instance(idx)),
          _ => Err(RegistryError::AmbiguousLookup {
            type_name: std::any::type_name::<T>(),
            count: matches.len(),
          }),
        }
      }
    }
  }

  /// The strict lookup result when it exists, the fallback's value otherwise.
  ///
  /// On a missed or ambiguous match the fallback factory builds the returned
  /// value; it is handed back in a fresh `Arc` and never registered. This is
  /// the only operation that converts a lookup failure into a value, so it
  /// only errs once the registry is closed or failed.
  pub fn get_or_else<T: Any + Send + Sync>(
    &self,
    fallback: impl FnOnce() -> T,
  ) -> Result<Arc<T>, RegistryError> {
    self.ensure_open()?;
    match self.get_one::<T>() {
      Ok(bean) => Ok(bean),
      Err(RegistryError::NotFound { .. }) | Err(RegistryError::AmbiguousLookup { .. }) => {
        tracing::debug!(
          type_name = std::any::type_name::<T>(),
          "strict lookup missed, building fallback"
        );
        Ok(Arc::new(fallback()))
      }
      Err(other) => Err(other),
    }
  }
}
