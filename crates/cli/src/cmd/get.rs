//! Get command implementation.
//!
//! Reads one or more `view:attr,...` specs and prints the selected values.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use fsattr_core::{AttrMap, AttributeSpec, LinkOption};
use fsattr_platform::Provider;

use crate::output::{OutputFormat, print_json, print_stat};

pub fn cmd_get(
  provider: &Provider,
  path: &Path,
  specs: &[String],
  options: &[LinkOption],
  output: OutputFormat,
) -> Result<()> {
  let mut results: BTreeMap<&str, AttrMap> = BTreeMap::new();
  for spec in specs {
    let attrs = provider
      .read_attributes(path, spec, options)
      .with_context(|| format!("Failed to read '{}' from {}", spec, path.display()))?;
    results.insert(spec.as_str(), attrs);
  }

  if output.is_json() {
    if let [spec] = specs {
      print_json(&results[spec.as_str()])?;
    } else {
      print_json(&results)?;
    }
    return Ok(());
  }

  for spec in specs {
    let view = AttributeSpec::parse(spec)?.view;
    for (name, value) in &results[spec.as_str()] {
      print_stat(&format!("{}:{}", view, name), &value.to_string());
    }
  }

  Ok(())
}
