//! A passive record type used by the demo driver and the tests.

use std::fmt;

/// A plain data holder with an identifier and a name.
///
/// Both fields start unset; there is no validation anywhere. The
/// [`create_default`](Record::create_default) factory builds the marker
/// instance that optional lookups fall back to, distinguishable from
/// registry-constructed records by its name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Record {
  id: Option<i32>,
  name: Option<String>,
}

impl Record {
  pub fn new(id: i32, name: impl Into<String>) -> Self {
    Self {
      id: Some(id),
      name: Some(name.into()),
    }
  }

  /// The factory-path default: `id=123, name="default-created"`.
  pub fn create_default() -> Self {
    Self::new(123, "default-created")
  }

  pub fn id(&self) -> Option<i32> {
    self.id
  }

  pub fn set_id(&mut self, id: i32) {
    self.id = Some(id);
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  pub fn set_name(&mut self, name: impl Into<String>) {
    self.name = Some(name.into());
  }
}

impl fmt::Display for Record {
  /// Renders as `Record{id=<id>, name='<name>'}`, with unset fields printed
  /// as `null`.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Record{{id=")?;
    match self.id {
      Some(id) => write!(f, "{id}")?,
      None => write!(f, "null")?,
    }
    write!(f, ", name='")?;
    match &self.name {
      Some(name) => write!(f, "{name}")?,
      None => write!(f, "null")?,
    }
    write!(f, "'}}")
  }
}
