use bean_registry::Record;
use pretty_assertions::assert_eq;

#[test]
fn create_default_carries_the_factory_path_marker() {
  let record = Record::create_default();

  assert_eq!(record.id(), Some(123));
  assert_eq!(record.name(), Some("default-created"));
}

#[test]
fn display_renders_the_fixed_form() {
  let record = Record::new(1, "a");

  assert_eq!(record.to_string(), "Record{id=1, name='a'}");
}

#[test]
fn display_renders_unset_fields_as_null() {
  let record = Record::default();

  assert_eq!(record.to_string(), "Record{id=null, name='null'}");
}

#[test]
fn setters_overwrite_without_validation() {
  let mut record = Record::default();

  record.set_id(-7);
  record.set_name("");

  assert_eq!(record.id(), Some(-7));
  assert_eq!(record.name(), Some(""));
  assert_eq!(record.to_string(), "Record{id=-7, name=''}");
}
