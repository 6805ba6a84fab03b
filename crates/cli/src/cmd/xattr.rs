//! User-defined extended attribute commands.

use std::path::Path;

use anyhow::{Context, Result};

use fsattr_core::{AttrValue, LinkOption};
use fsattr_platform::Provider;

use crate::output::{OutputFormat, format_bytes, print_info, print_json, print_stat, print_success};

pub fn cmd_xattr_list(provider: &Provider, path: &Path, options: &[LinkOption], output: OutputFormat) -> Result<()> {
  let view = provider.user_defined_view(path, options)?;
  let names = view
    .list()
    .with_context(|| format!("Failed to list attributes of {}", path.display()))?;

  if output.is_json() {
    let mut entries = Vec::with_capacity(names.len());
    for name in &names {
      entries.push(serde_json::json!({ "name": name, "size": view.size(name)? }));
    }
    print_json(&entries)?;
  } else if names.is_empty() {
    print_info(&format!("No user attributes on {}", path.display()));
  } else {
    for name in &names {
      print_stat(name, &format_bytes(view.size(name)? as u64));
    }
  }

  Ok(())
}

pub fn cmd_xattr_get(
  provider: &Provider,
  path: &Path,
  name: &str,
  options: &[LinkOption],
  output: OutputFormat,
) -> Result<()> {
  let value = AttrValue::Bytes(provider.user_defined_view(path, options)?.read(name)?);

  if output.is_json() {
    print_json(&serde_json::json!({ "name": name, "value": value.to_string() }))?;
  } else {
    println!("{}", value);
  }

  Ok(())
}

pub fn cmd_xattr_set(
  provider: &Provider,
  path: &Path,
  name: &str,
  value: &str,
  options: &[LinkOption],
  output: OutputFormat,
) -> Result<()> {
  provider
    .user_defined_view(path, options)?
    .write(name, value.as_bytes())
    .with_context(|| format!("Failed to write '{}' on {}", name, path.display()))?;

  if output.is_json() {
    print_json(&serde_json::json!({ "name": name, "size": value.len() }))?;
  } else {
    print_success(&format!("Set {} on {}", name, path.display()));
  }

  Ok(())
}

pub fn cmd_xattr_rm(
  provider: &Provider,
  path: &Path,
  name: &str,
  options: &[LinkOption],
  output: OutputFormat,
) -> Result<()> {
  provider
    .user_defined_view(path, options)?
    .delete(name)
    .with_context(|| format!("Failed to remove '{}' from {}", name, path.display()))?;

  if output.is_json() {
    print_json(&serde_json::json!({ "name": name, "removed": true }))?;
  } else {
    print_success(&format!("Removed {} from {}", name, path.display()));
  }

  Ok(())
}
