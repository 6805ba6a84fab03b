use std::ffi::OsString;

use tracing::debug;

use super::{AttributeView, DynamicAttributeView, UserDefinedAttributeView};
use crate::path::UnixPath;
use crate::value::{AttrMap, AttrValue};
use crate::{AttrError, Result};

/// User-defined attributes stored as OS extended attributes.
///
/// `namespace` is prepended to every name on the way down and stripped from
/// listed names on the way up (Linux keeps user attributes under `user.`;
/// BSD-style systems store the name as given).
#[derive(Debug, Clone)]
pub struct XattrUserView {
  file: UnixPath,
  follow_links: bool,
  namespace: Option<&'static str>,
}

impl XattrUserView {
  pub fn new(file: UnixPath, follow_links: bool, namespace: Option<&'static str>) -> Self {
    Self {
      file,
      follow_links,
      namespace,
    }
  }

  pub fn namespace(&self) -> Option<&'static str> {
    self.namespace
  }

  fn qualified(&self, name: &str) -> Result<String> {
    if name.is_empty() {
      return Err(AttrError::unknown(self.name(), name));
    }
    Ok(match self.namespace {
      Some(namespace) => format!("{}{}", namespace, name),
      None => name.to_string(),
    })
  }

  /// The caller-facing form of a listed name, or `None` when it belongs to
  /// another namespace or is not valid UTF-8
  fn visible_name(&self, raw: OsString) -> Option<String> {
    let name = match raw.into_string() {
      Ok(name) => name,
      Err(raw) => {
        debug!(path = %self.file, name = ?raw, "skipping extended attribute with non-UTF-8 name");
        return None;
      }
    };
    match self.namespace {
      Some(namespace) => name.strip_prefix(namespace).map(str::to_string),
      None => Some(name),
    }
  }
}

impl AttributeView for XattrUserView {
  fn name(&self) -> &'static str {
    "user"
  }

  fn path(&self) -> &UnixPath {
    &self.file
  }

  fn follow_links(&self) -> bool {
    self.follow_links
  }
}

impl DynamicAttributeView for XattrUserView {
  fn read_attributes(&self, attributes: &[&str]) -> Result<AttrMap> {
    let mut map = AttrMap::new();

    if attributes.contains(&"*") {
      for name in self.list()? {
        let value = self.read(&name)?;
        map.insert(name, AttrValue::Bytes(value));
      }
    }

    for name in attributes.iter().filter(|name| **name != "*") {
      if !map.contains_key(*name) {
        map.insert(name.to_string(), AttrValue::Bytes(self.read(name)?));
      }
    }

    Ok(map)
  }

  fn set_attribute(&self, attribute: &str, value: AttrValue) -> Result<()> {
    self.write(attribute, value.as_bytes(attribute)?)
  }
}

impl UserDefinedAttributeView for XattrUserView {
  fn list(&self) -> Result<Vec<String>> {
    let path = self.file.as_path();
    let names = if self.follow_links {
      xattr::list_deref(path)
    } else {
      xattr::list(path)
    }
    .map_err(|e| AttrError::io("listxattr", path, e))?;

    let mut listed: Vec<String> = names.filter_map(|name| self.visible_name(name)).collect();
    listed.sort();
    Ok(listed)
  }

  fn size(&self, name: &str) -> Result<usize> {
    self.read(name).map(|value| value.len())
  }

  fn read(&self, name: &str) -> Result<Vec<u8>> {
    let qualified = self.qualified(name)?;
    let path = self.file.as_path();
    let value = if self.follow_links {
      xattr::get_deref(path, &qualified)
    } else {
      xattr::get(path, &qualified)
    }
    .map_err(|e| AttrError::io("getxattr", path, e))?;

    value.ok_or_else(|| AttrError::AttributeNotFound {
      path: path.to_path_buf(),
      name: name.to_string(),
    })
  }

  fn write(&self, name: &str, value: &[u8]) -> Result<()> {
    let qualified = self.qualified(name)?;
    let path = self.file.as_path();
    if self.follow_links {
      xattr::set_deref(path, &qualified, value)
    } else {
      xattr::set(path, &qualified, value)
    }
    .map_err(|e| AttrError::io("setxattr", path, e))?;

    debug!(path = %self.file, name, len = value.len(), "wrote extended attribute");
    Ok(())
  }

  fn delete(&self, name: &str) -> Result<()> {
    let qualified = self.qualified(name)?;
    let path = self.file.as_path();
    if self.follow_links {
      xattr::remove_deref(path, &qualified)
    } else {
      xattr::remove(path, &qualified)
    }
    .map_err(|e| AttrError::io("removexattr", path, e))?;

    debug!(path = %self.file, name, "removed extended attribute");
    Ok(())
  }
}
