//! Conversion of command-line strings into attribute values.

use anyhow::{Context, Result};

use fsattr_core::{AttrValue, FileTime, PosixPermissions, UserPrincipal};

/// Parse `raw` into the value type `view:attribute` expects.
///
/// Attributes without a dedicated parser are passed on as text, leaving it to
/// the view to reject read-only or unknown names.
pub fn parse_value(view: &str, attribute: &str, raw: &str) -> Result<AttrValue> {
  if view == "user" {
    return Ok(AttrValue::from(raw));
  }

  let value = match attribute {
    "lastModifiedTime" | "lastAccessTime" | "creationTime" => raw
      .parse::<FileTime>()
      .map(AttrValue::from)
      .with_context(|| format!("'{}' is not an RFC 3339 time", raw))?,
    "permissions" => parse_permissions(raw)?.into(),
    "owner" => UserPrincipal::lookup_user(raw)?.into(),
    "group" => UserPrincipal::lookup_group(raw)?.into(),
    "mode" => AttrValue::from(parse_octal(raw)?),
    "uid" | "gid" => raw
      .parse::<u32>()
      .map(AttrValue::from)
      .with_context(|| format!("'{}' is not a numeric id", raw))?,
    _ => AttrValue::from(raw),
  };
  Ok(value)
}

/// `rwxr-x---` or an octal mode such as `750`
fn parse_permissions(raw: &str) -> Result<PosixPermissions> {
  if raw.len() <= 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
    return Ok(PosixPermissions::from_mode(parse_octal(raw)?));
  }
  Ok(raw.parse()?)
}

fn parse_octal(raw: &str) -> Result<u32> {
  let digits = raw.strip_prefix("0o").unwrap_or(raw);
  u32::from_str_radix(digits, 8).with_context(|| format!("'{}' is not an octal mode", raw))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn user_values_are_text() {
    assert_eq!(parse_value("user", "mode", "644").unwrap(), AttrValue::from("644"));
  }

  #[test]
  fn times_are_rfc3339() {
    let value = parse_value("basic", "lastModifiedTime", "2020-09-13T12:26:40Z").unwrap();
    assert_eq!(value, AttrValue::Time(FileTime::new(1_600_000_000, 0)));
    assert!(parse_value("basic", "lastAccessTime", "yesterday").is_err());
  }

  #[test]
  fn permissions_accept_both_forms() {
    let symbolic = parse_value("posix", "permissions", "rw-r-----").unwrap();
    let octal = parse_value("posix", "permissions", "640").unwrap();
    assert_eq!(symbolic, octal);
    assert!(parse_value("posix", "permissions", "rw-").is_err());
  }

  #[test]
  fn modes_are_octal() {
    assert_eq!(parse_value("unix", "mode", "0o755").unwrap(), AttrValue::from(0o755u32));
    assert_eq!(parse_value("unix", "mode", "600").unwrap(), AttrValue::from(0o600u32));
    assert!(parse_value("unix", "mode", "999").is_err());
  }

  #[test]
  fn numeric_owner_falls_back_to_id() {
    let value = parse_value("posix", "owner", "4000000000").unwrap();
    assert_eq!(value.as_principal("owner").unwrap().id(), 4_000_000_000);
  }

  #[test]
  fn other_attributes_pass_through() {
    assert_eq!(parse_value("basic", "size", "10").unwrap(), AttrValue::from("10"));
  }
}
