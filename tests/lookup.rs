use bean_registry::{Record, Registry, RegistryError, Source};
use pretty_assertions::assert_eq;
use std::sync::Arc;

// --- Test Fixtures ---

// A second bean type, so tests can show that lookups only see their own type.
#[derive(Debug, PartialEq, Eq)]
struct Widget {
  label: &'static str,
}

fn ready_registry(sources: Vec<Source>) -> Registry {
  let mut registry = Registry::new();
  for source in sources {
    registry
      .register_source(source)
      .expect("source should be accepted");
  }
  registry.initialize().expect("initialization should succeed");
  registry
}

// --- Collection Lookup ---

#[test]
fn get_all_is_empty_when_nothing_of_the_type_is_registered() {
  // Arrange: a registry with beans of another type only.
  let mut source = Source::new();
  source.add_bean("widget", || Widget { label: "w" });
  let registry = ready_registry(vec![source]);

  // Act
  let records = registry.get_all::<Record>().unwrap();

  // Assert: empty, not an error.
  assert_eq!(records, Vec::<Arc<Record>>::new());
}

#[test]
fn get_all_returns_the_single_declared_record() {
  // Arrange
  let mut source = Source::new();
  source.add_bean("record-a", || Record::new(1, "a"));
  let registry = ready_registry(vec![source]);

  // Act
  let records = registry.get_all::<Record>().unwrap();

  // Assert
  let rendered: Vec<String> = records.iter().map(|r| r.to_string()).collect();
  assert_eq!(rendered, vec!["Record{id=1, name='a'}".to_string()]);
}

#[test]
fn get_all_preserves_registration_order_across_sources() {
  // Arrange: two sources, two beans each.
  let mut first = Source::new();
  first.add_bean("record-1", || Record::new(1, "one"));
  first.add_bean("record-2", || Record::new(2, "two"));
  let mut second = Source::new();
  second.add_bean("record-3", || Record::new(3, "three"));
  let registry = ready_registry(vec![first, second]);

  // Act
  let ids: Vec<Option<i32>> = registry
    .get_all::<Record>()
    .unwrap()
    .iter()
    .map(|r| r.id())
    .collect();

  // Assert
  assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
}

#[test]
fn get_all_named_pairs_declared_names_with_beans() {
  // Arrange
  let mut source = Source::new();
  source.add_bean("record-a", || Record::new(1, "a"));
  source.add_bean("record-b", || Record::new(2, "b"));
  let registry = ready_registry(vec![source]);

  // Act
  let named = registry.get_all_named::<Record>().unwrap();

  // Assert
  let names: Vec<&str> = named.iter().map(|(name, _)| name.as_str()).collect();
  assert_eq!(names, vec!["record-a", "record-b"]);
  assert_eq!(named[0].1.id(), Some(1));
  assert_eq!(named[1].1.id(), Some(2));
}

#[test]
fn iter_yields_beans_in_registration_order() {
  // Arrange
  let mut source = Source::new();
  source.add_bean("record-a", || Record::new(1, "a"));
  source.add_bean("record-b", || Record::new(2, "b"));
  let registry = ready_registry(vec![source]);

  // Act
  let ids: Vec<Option<i32>> = registry.iter::<Record>().unwrap().map(|r| r.id()).collect();

  // Assert
  assert_eq!(ids, vec![Some(1), Some(2)]);
}

// --- Strict Lookup ---

#[test]
fn get_one_returns_the_sole_match() {
  // Arrange
  let mut source = Source::new();
  source.add_bean("record-a", || Record::new(1, "a"));
  let registry = ready_registry(vec![source]);

  // Act
  let one = registry.get_one::<Record>().unwrap();
  let optional = registry.get_or_else(Record::create_default).unwrap();

  // Assert: both strict and optional lookup hand out the same instance.
  assert_eq!(one.id(), Some(1));
  assert!(Arc::ptr_eq(&one, &optional));
}

#[test]
fn get_one_fails_with_not_found_on_zero_matches() {
  // Arrange
  let registry = ready_registry(vec![]);

  // Act
  let err = registry.get_one::<Record>().unwrap_err();

  // Assert
  assert!(matches!(err, RegistryError::NotFound { .. }));
}

#[test]
fn get_one_is_ambiguous_with_two_unmarked_beans() {
  // Arrange: two sources each declaring a record, no preferred flag anywhere.
  let mut first = Source::new();
  first.add_bean("record-a", || Record::new(1, "a"));
  let mut second = Source::new();
  second.add_bean("record-b", || Record::new(2, "b"));
  let registry = ready_registry(vec![first, second]);

  // Act
  let err = registry.get_one::<Record>().unwrap_err();

  // Assert
  assert!(matches!(err, RegistryError::AmbiguousLookup { count: 2, .. }));
}

#[test]
fn preferred_bean_wins_the_strict_lookup_among_many() {
  // Arrange
  let mut source = Source::new();
  source.add_bean("record-a", || Record::new(1, "a"));
  source.add_preferred_bean("record-b", || Record::new(2, "b"));
  source.add_bean("record-c", || Record::new(3, "c"));
  let registry = ready_registry(vec![source]);

  // Act
  let one = registry.get_one::<Record>().unwrap();

  // Assert
  assert_eq!(one.id(), Some(2));
}

#[test]
fn two_preferred_beans_are_still_ambiguous() {
  // Arrange
  let mut source = Source::new();
  source.add_preferred_bean("record-a", || Record::new(1, "a"));
  source.add_preferred_bean("record-b", || Record::new(2, "b"));
  let registry = ready_registry(vec![source]);

  // Act
  let err = registry.get_one::<Record>().unwrap_err();

  // Assert
  assert!(matches!(err, RegistryError::AmbiguousLookup { count: 2, .. }));
}

// --- Optional Lookup ---

#[test]
fn get_or_else_builds_the_fallback_when_nothing_matches() {
  // Arrange: zero sources.
  let registry = ready_registry(vec![]);

  // Act
  let record = registry.get_or_else(Record::create_default).unwrap();

  // Assert: the factory-path marker instance.
  assert_eq!(record.to_string(), "Record{id=123, name='default-created'}");
}

#[test]
fn get_or_else_does_not_register_the_fallback() {
  // Arrange
  let registry = ready_registry(vec![]);

  // Act
  let _ = registry.get_or_else(Record::create_default).unwrap();

  // Assert: the registry is unchanged by the fallback path.
  assert!(registry.get_all::<Record>().unwrap().is_empty());
  assert!(matches!(
    registry.get_one::<Record>().unwrap_err(),
    RegistryError::NotFound { .. }
  ));
}

#[test]
fn get_or_else_falls_back_on_an_ambiguous_match() {
  // Arrange: two unmarked records.
  let mut source = Source::new();
  source.add_bean("record-a", || Record::new(1, "a"));
  source.add_bean("record-b", || Record::new(2, "b"));
  let registry = ready_registry(vec![source]);

  // Act
  let record = registry.get_or_else(Record::create_default).unwrap();

  // Assert: the fallback value, not either registered bean.
  assert_eq!(record.id(), Some(123));
}

#[test]
fn get_or_else_resolves_through_the_preferred_marker() {
  // Arrange
  let mut source = Source::new();
  source.add_preferred_bean("record-a", || Record::new(1, "a"));
  source.add_bean("record-b", || Record::new(2, "b"));
  let registry = ready_registry(vec![source]);

  // Act
  let record = registry.get_or_else(Record::create_default).unwrap();

  // Assert: the preferred bean, so the fallback never ran.
  assert_eq!(record.id(), Some(1));
}
