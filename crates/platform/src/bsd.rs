//! BSD and macOS attribute views
//!
//! BSD-derived systems store extended attribute names as given and report
//! file flags and a birth time in stat. Where the running target does not
//! expose one of those fields it is simply left out of reads.

use std::fs::Metadata;

use fsattr_core::view::{
  AttributesBuilder, BASIC_ATTRIBUTES, POSIX_ATTRIBUTES, UNIX_ATTRIBUTES, UnixAttributes, UnixBasicView,
  UnixNativeView, UnixPosixView, XattrUserView,
};
use fsattr_core::{
  AttrError, AttrMap, AttrValue, AttributeView, DynamicAttributeView, FileTime, PlatformResolver, Result, UnixPath,
  UnixResolver, ViewFactory,
};
use serde::Serialize;

use crate::ensure_xattr_support;

pub const BSD_ATTRIBUTES: &[&str] = &["flags", "birthtime"];

/// Unix attributes plus the BSD stat extras
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BsdAttributes {
  #[serde(flatten)]
  pub unix: UnixAttributes,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub flags: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub birthtime: Option<FileTime>,
}

impl BsdAttributes {
  pub fn from_metadata(meta: &Metadata) -> Self {
    Self {
      unix: UnixAttributes::from_metadata(meta),
      flags: file_flags(meta),
      birthtime: birth_time(meta),
    }
  }
}

#[cfg(target_os = "macos")]
fn file_flags(meta: &Metadata) -> Option<u32> {
  use std::os::macos::fs::MetadataExt;
  Some(meta.st_flags())
}

#[cfg(target_os = "freebsd")]
fn file_flags(meta: &Metadata) -> Option<u32> {
  use std::os::freebsd::fs::MetadataExt;
  Some(meta.st_flags())
}

#[cfg(not(any(target_os = "macos", target_os = "freebsd")))]
fn file_flags(_meta: &Metadata) -> Option<u32> {
  None
}

fn birth_time(meta: &Metadata) -> Option<FileTime> {
  meta.created().ok().map(FileTime::from_system_time)
}

/// The BSD "unix" view
#[derive(Debug, Clone)]
pub struct BsdUnixView {
  native: UnixNativeView,
}

impl BsdUnixView {
  pub fn new(file: UnixPath, follow_links: bool) -> Self {
    Self {
      native: UnixNativeView::new(file, follow_links),
    }
  }

  pub fn read_bsd(&self) -> Result<BsdAttributes> {
    Ok(BsdAttributes::from_metadata(&self.stat()?))
  }

  fn stat(&self) -> Result<Metadata> {
    let file = self.path();
    file.metadata(self.follow_links()).map_err(|source| AttrError::Io {
      op: "stat",
      path: file.as_path().to_path_buf(),
      source,
    })
  }
}

impl AttributeView for BsdUnixView {
  fn name(&self) -> &'static str {
    "unix"
  }

  fn path(&self) -> &UnixPath {
    self.native.path()
  }

  fn follow_links(&self) -> bool {
    self.native.follow_links()
  }
}

impl DynamicAttributeView for BsdUnixView {
  fn read_attributes(&self, attributes: &[&str]) -> Result<AttrMap> {
    let mut builder = AttributesBuilder::new(
      self.name(),
      &[BASIC_ATTRIBUTES, POSIX_ATTRIBUTES, UNIX_ATTRIBUTES, BSD_ATTRIBUTES],
      attributes,
    )?;
    let meta = self.stat()?;
    self.native.collect(&mut builder, &meta);
    if let Some(flags) = file_flags(&meta) {
      builder.add("flags", flags);
    }
    if let Some(birthtime) = birth_time(&meta) {
      builder.add("birthtime", birthtime);
    }
    Ok(builder.finish())
  }

  fn set_attribute(&self, attribute: &str, value: AttrValue) -> Result<()> {
    if BSD_ATTRIBUTES.contains(&attribute) {
      return Err(AttrError::ReadOnlyAttribute {
        attribute: attribute.to_string(),
      });
    }
    self.native.try_set(attribute, &value).unwrap_or_else(|| {
      Err(AttrError::UnknownAttribute {
        view: self.name(),
        attribute: attribute.to_string(),
      })
    })
  }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BsdViewFactory;

impl ViewFactory for BsdViewFactory {
  type Basic = UnixBasicView;
  type Posix = UnixPosixView;
  type Unix = BsdUnixView;
  type UserDefined = XattrUserView;

  fn basic_view(&self, file: UnixPath, follow_links: bool) -> Result<UnixBasicView> {
    Ok(UnixBasicView::new(file, follow_links))
  }

  fn posix_view(&self, file: UnixPath, follow_links: bool) -> Result<UnixPosixView> {
    Ok(UnixPosixView::new(file, follow_links))
  }

  fn unix_view(&self, file: UnixPath, follow_links: bool) -> Result<BsdUnixView> {
    Ok(BsdUnixView::new(file, follow_links))
  }

  fn user_defined_view(&self, file: UnixPath, follow_links: bool) -> Result<XattrUserView> {
    ensure_xattr_support(&file)?;
    Ok(XattrUserView::new(file, follow_links, None))
  }
}

/// BSD views in front of the generic unix layer
pub type BsdResolver<F = UnixResolver> = PlatformResolver<BsdViewFactory, F>;

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::TempDir;

  fn view_for(temp: &TempDir) -> BsdUnixView {
    let path = temp.path().join("file");
    fs::write(&path, b"bsd").unwrap();
    BsdUnixView::new(UnixPath::new(&path).unwrap(), true)
  }

  #[test]
  fn reads_generic_unix_fields() {
    let temp = TempDir::new().unwrap();
    let view = view_for(&temp);
    let map = view.read_attributes(&["size", "nlink", "permissions"]).unwrap();
    assert_eq!(map["size"], AttrValue::UInt(3));
    assert_eq!(map["nlink"], AttrValue::UInt(1));
    assert!(map.contains_key("permissions"));
  }

  #[test]
  fn flags_are_reported_where_available() {
    let temp = TempDir::new().unwrap();
    let view = view_for(&temp);
    let map = view.read_attributes(&["flags"]).unwrap();
    assert_eq!(
      map.contains_key("flags"),
      cfg!(any(target_os = "macos", target_os = "freebsd"))
    );
  }

  #[test]
  fn extras_are_read_only() {
    let temp = TempDir::new().unwrap();
    let view = view_for(&temp);
    for name in BSD_ATTRIBUTES {
      let err = view.set_attribute(name, AttrValue::UInt(0)).unwrap_err();
      assert!(matches!(err, AttrError::ReadOnlyAttribute { .. }));
    }
  }

  #[test]
  fn mode_is_writable() {
    let temp = TempDir::new().unwrap();
    let view = view_for(&temp);
    view.set_attribute("mode", AttrValue::UInt(0o600)).unwrap();
    assert_eq!(view.read_bsd().unwrap().unix.mode & 0o777, 0o600);
  }

  #[test]
  fn unknown_names_are_rejected() {
    let temp = TempDir::new().unwrap();
    let view = view_for(&temp);
    let err = view.set_attribute("archived", AttrValue::Bool(true)).unwrap_err();
    assert!(matches!(err, AttrError::UnknownAttribute { view: "unix", .. }));
  }

  #[test]
  fn user_view_has_no_namespace() {
    let view = BsdViewFactory
      .user_defined_view(UnixPath::new("/tmp/file").unwrap(), true)
      .unwrap();
    assert_eq!(view.namespace(), None);
  }
}
