//! Drives the four lookup variations against a small registry of records.

use bean_registry::{Record, Registry, RegistryError, Source};
use tracing_subscriber::EnvFilter;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  if let Err(err) = run() {
    eprintln!("record lookup failed: {err}");
    std::process::exit(1);
  }
}

fn run() -> Result<(), RegistryError> {
  let mut registry = Registry::new();

  let mut source = Source::new();
  source.add_preferred_bean("record-primary", || Record::new(1, "primary"));
  source.add_bean("record-secondary", || Record::new(2, "secondary"));
  registry.register_source(source)?;
  registry.initialize()?;

  // Collection lookup: every record, with its bean name.
  for (name, record) in registry.get_all_named::<Record>()? {
    println!("{name}==={record}");
  }

  // Strict lookup: the preferred marker picks the winner.
  println!("{}", registry.get_one::<Record>()?);

  // Optional lookup: the fallback factory only fires when nothing matches.
  println!("{}", registry.get_or_else(Record::create_default)?);

  // Iterator lookup: the stream form of the collection lookup.
  for record in registry.iter::<Record>()? {
    println!("{record}");
  }

  registry.close();
  Ok(())
}
