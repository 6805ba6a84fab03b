use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;

use serde::Serialize;

use super::basic::stat;
use super::{
  AttributeView, AttributesBuilder, BASIC_ATTRIBUTES, DynamicAttributeView, POSIX_ATTRIBUTES, PosixAttributes,
  UnixPosixView,
};
use crate::path::UnixPath;
use crate::value::{AttrMap, AttrValue, FileTime};
use crate::{AttrError, Result};

pub const UNIX_ATTRIBUTES: &[&str] = &["mode", "ino", "dev", "rdev", "nlink", "uid", "gid", "ctime"];

/// Everything stat reports, beyond the portable posix subset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnixAttributes {
  #[serde(flatten)]
  pub posix: PosixAttributes,
  pub mode: u32,
  pub ino: u64,
  pub dev: u64,
  pub rdev: u64,
  pub nlink: u64,
  pub uid: u32,
  pub gid: u32,
  pub ctime: FileTime,
}

impl UnixAttributes {
  pub fn from_metadata(meta: &Metadata) -> Self {
    Self {
      posix: PosixAttributes::from_metadata(meta),
      mode: meta.mode(),
      ino: meta.ino(),
      dev: meta.dev(),
      rdev: meta.rdev(),
      nlink: meta.nlink(),
      uid: meta.uid(),
      gid: meta.gid(),
      ctime: FileTime::new(meta.ctime(), meta.ctime_nsec() as u32),
    }
  }
}

/// The "unix" view: posix attributes plus raw stat fields
#[derive(Debug, Clone)]
pub struct UnixNativeView {
  posix: UnixPosixView,
}

impl UnixNativeView {
  pub fn new(file: UnixPath, follow_links: bool) -> Self {
    Self {
      posix: UnixPosixView::new(file, follow_links),
    }
  }

  pub fn posix(&self) -> &UnixPosixView {
    &self.posix
  }

  pub fn read_unix(&self) -> Result<UnixAttributes> {
    let meta = stat(self.path(), self.follow_links())?;
    Ok(UnixAttributes::from_metadata(&meta))
  }

  pub fn collect(&self, builder: &mut AttributesBuilder, meta: &Metadata) {
    self.posix.collect(builder, meta);
    builder.add("mode", meta.mode());
    builder.add("ino", meta.ino());
    builder.add("dev", meta.dev());
    builder.add("rdev", meta.rdev());
    builder.add("nlink", meta.nlink());
    builder.add("uid", meta.uid());
    builder.add("gid", meta.gid());
    builder.add("ctime", FileTime::new(meta.ctime(), meta.ctime_nsec() as u32));
  }

  /// Write a unix, posix or basic attribute by name; `None` if unrecognized
  pub fn try_set(&self, attribute: &str, value: &AttrValue) -> Option<Result<()>> {
    let result = match attribute {
      "mode" => value
        .as_u32(attribute)
        .and_then(|mode| self.posix.set_mode(mode & 0o7777)),
      "uid" => value
        .as_u32(attribute)
        .and_then(|uid| self.posix.set_ids(Some(uid), None)),
      "gid" => value
        .as_u32(attribute)
        .and_then(|gid| self.posix.set_ids(None, Some(gid))),
      other if UNIX_ATTRIBUTES.contains(&other) => Err(AttrError::ReadOnlyAttribute {
        attribute: other.to_string(),
      }),
      _ => return self.posix.try_set(attribute, value),
    };
    Some(result)
  }
}

impl AttributeView for UnixNativeView {
  fn name(&self) -> &'static str {
    "unix"
  }

  fn path(&self) -> &UnixPath {
    self.posix.path()
  }

  fn follow_links(&self) -> bool {
    self.posix.follow_links()
  }
}

impl DynamicAttributeView for UnixNativeView {
  fn read_attributes(&self, attributes: &[&str]) -> Result<AttrMap> {
    let mut builder = AttributesBuilder::new(
      self.name(),
      &[BASIC_ATTRIBUTES, POSIX_ATTRIBUTES, UNIX_ATTRIBUTES],
      attributes,
    )?;
    let meta = stat(self.path(), self.follow_links())?;
    self.collect(&mut builder, &meta);
    Ok(builder.finish())
  }

  fn set_attribute(&self, attribute: &str, value: AttrValue) -> Result<()> {
    self
      .try_set(attribute, &value)
      .unwrap_or_else(|| Err(AttrError::unknown(self.name(), attribute)))
  }
}
