use std::path::Path;

use anyhow::{Context, Result};

use fsattr_core::{AttributeSpec, LinkOption};
use fsattr_platform::Provider;

use crate::output::{OutputFormat, print_json, print_success};
use crate::value::parse_value;

pub fn cmd_set(
  provider: &Provider,
  path: &Path,
  spec: &str,
  raw: &str,
  options: &[LinkOption],
  output: OutputFormat,
) -> Result<()> {
  let (view, attribute) = AttributeSpec::parse_single(spec)?;
  let value = parse_value(view, attribute, raw)?;

  provider
    .set_attribute(path, spec, value.clone(), options)
    .with_context(|| format!("Failed to set '{}' on {}", spec, path.display()))?;

  if output.is_json() {
    print_json(&serde_json::json!({
      "path": path,
      "view": view,
      "attribute": attribute,
      "value": value,
    }))?;
  } else {
    print_success(&format!("Set {}:{} on {}", view, attribute, path.display()));
  }

  Ok(())
}
