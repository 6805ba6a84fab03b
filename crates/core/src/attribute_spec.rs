//! `view:attr1,attr2` attribute selectors

use crate::{AttrError, Result};

/// View used when a spec has no `view:` prefix
pub const DEFAULT_VIEW: &str = "basic";

/// A parsed attribute selector borrowing from its source string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec<'a> {
  pub view: &'a str,
  pub attributes: Vec<&'a str>,
}

impl<'a> AttributeSpec<'a> {
  /// Parse a read selector such as `posix:permissions,owner` or `size`
  pub fn parse(spec: &'a str) -> Result<Self> {
    let (view, list) = match spec.split_once(':') {
      Some((view, list)) => (view, list),
      None => (DEFAULT_VIEW, spec),
    };

    if view.is_empty() {
      return Err(invalid(spec, "empty view name"));
    }

    let attributes: Vec<&str> = list.split(',').collect();
    if attributes.iter().any(|name| name.is_empty()) {
      return Err(invalid(spec, "empty attribute name"));
    }

    Ok(Self { view, attributes })
  }

  /// Parse a write selector, which must name exactly one attribute
  pub fn parse_single(spec: &'a str) -> Result<(&'a str, &'a str)> {
    let parsed = Self::parse(spec)?;
    match parsed.attributes.as_slice() {
      [name] if *name != "*" => Ok((parsed.view, *name)),
      _ => Err(invalid(spec, "exactly one attribute name is required")),
    }
  }
}

fn invalid(spec: &str, reason: &'static str) -> AttrError {
  AttrError::InvalidAttributeSpec {
    spec: spec.to_string(),
    reason,
  }
}
