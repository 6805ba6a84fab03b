use std::fs::Metadata;
use std::io;
use std::os::unix::fs::MetadataExt;

use nix::sys::stat::{lutimes, utimes};
use nix::sys::time::{TimeVal, TimeValLike};
use serde::Serialize;
use tracing::debug;

use super::{AttributeView, AttributesBuilder, BasicAttributeView, DynamicAttributeView};
use crate::path::UnixPath;
use crate::value::{AttrMap, AttrValue, FileKey, FileTime};
use crate::{AttrError, Result};

pub const BASIC_ATTRIBUTES: &[&str] = &[
  "lastModifiedTime",
  "lastAccessTime",
  "creationTime",
  "size",
  "isRegularFile",
  "isDirectory",
  "isSymbolicLink",
  "isOther",
  "fileKey",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
  Regular,
  Directory,
  SymbolicLink,
  Other,
}

/// Attributes common to every file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicAttributes {
  pub last_modified_time: FileTime,
  pub last_access_time: FileTime,
  /// Birth time where the platform reports one, otherwise the modification time
  pub creation_time: FileTime,
  pub size: u64,
  pub kind: FileKind,
  pub file_key: FileKey,
}

impl BasicAttributes {
  pub fn from_metadata(meta: &Metadata) -> Self {
    let last_modified_time = FileTime::new(meta.mtime(), meta.mtime_nsec() as u32);
    let file_type = meta.file_type();
    let kind = if file_type.is_symlink() {
      FileKind::SymbolicLink
    } else if file_type.is_dir() {
      FileKind::Directory
    } else if file_type.is_file() {
      FileKind::Regular
    } else {
      FileKind::Other
    };

    Self {
      last_modified_time,
      last_access_time: FileTime::new(meta.atime(), meta.atime_nsec() as u32),
      creation_time: meta
        .created()
        .map(FileTime::from_system_time)
        .unwrap_or(last_modified_time),
      size: meta.size(),
      kind,
      file_key: FileKey {
        dev: meta.dev(),
        ino: meta.ino(),
      },
    }
  }

  pub fn is_regular_file(&self) -> bool {
    self.kind == FileKind::Regular
  }

  pub fn is_directory(&self) -> bool {
    self.kind == FileKind::Directory
  }

  pub fn is_symbolic_link(&self) -> bool {
    self.kind == FileKind::SymbolicLink
  }

  pub fn is_other(&self) -> bool {
    self.kind == FileKind::Other
  }
}

pub(crate) fn stat(file: &UnixPath, follow_links: bool) -> Result<Metadata> {
  file
    .metadata(follow_links)
    .map_err(|e| AttrError::io("stat", file.as_path(), e))
}

/// Basic view over the stat/utimes family
#[derive(Debug, Clone)]
pub struct UnixBasicView {
  file: UnixPath,
  follow_links: bool,
}

impl UnixBasicView {
  pub fn new(file: UnixPath, follow_links: bool) -> Self {
    Self { file, follow_links }
  }

  /// Add the basic attributes selected in `builder` from `meta`
  pub fn collect(&self, builder: &mut AttributesBuilder, meta: &Metadata) {
    let attrs = BasicAttributes::from_metadata(meta);
    builder.add("lastModifiedTime", attrs.last_modified_time);
    builder.add("lastAccessTime", attrs.last_access_time);
    builder.add("creationTime", attrs.creation_time);
    builder.add("size", attrs.size);
    builder.add("isRegularFile", attrs.is_regular_file());
    builder.add("isDirectory", attrs.is_directory());
    builder.add("isSymbolicLink", attrs.is_symbolic_link());
    builder.add("isOther", attrs.is_other());
    builder.add("fileKey", attrs.file_key);
  }

  /// Write a basic attribute by name. Returns `None` when `attribute` is not
  /// a basic attribute, so richer views can try their own names first.
  pub fn try_set(&self, attribute: &str, value: &AttrValue) -> Option<Result<()>> {
    let result = match attribute {
      "lastModifiedTime" => value
        .as_time(attribute)
        .and_then(|time| self.set_times(Some(time), None, None)),
      "lastAccessTime" => value
        .as_time(attribute)
        .and_then(|time| self.set_times(None, Some(time), None)),
      "creationTime" => value
        .as_time(attribute)
        .and_then(|time| self.set_times(None, None, Some(time))),
      other if BASIC_ATTRIBUTES.contains(&other) => Err(AttrError::ReadOnlyAttribute {
        attribute: other.to_string(),
      }),
      _ => return None,
    };
    Some(result)
  }
}

impl AttributeView for UnixBasicView {
  fn name(&self) -> &'static str {
    "basic"
  }

  fn path(&self) -> &UnixPath {
    &self.file
  }

  fn follow_links(&self) -> bool {
    self.follow_links
  }
}

impl DynamicAttributeView for UnixBasicView {
  fn read_attributes(&self, attributes: &[&str]) -> Result<AttrMap> {
    let mut builder = AttributesBuilder::new(self.name(), &[BASIC_ATTRIBUTES], attributes)?;
    let meta = stat(&self.file, self.follow_links)?;
    self.collect(&mut builder, &meta);
    Ok(builder.finish())
  }

  fn set_attribute(&self, attribute: &str, value: AttrValue) -> Result<()> {
    self
      .try_set(attribute, &value)
      .unwrap_or_else(|| Err(AttrError::unknown(self.name(), attribute)))
  }
}

impl BasicAttributeView for UnixBasicView {
  fn read_basic(&self) -> Result<BasicAttributes> {
    let meta = stat(&self.file, self.follow_links)?;
    Ok(BasicAttributes::from_metadata(&meta))
  }

  fn set_times(
    &self,
    last_modified: Option<FileTime>,
    last_access: Option<FileTime>,
    creation: Option<FileTime>,
  ) -> Result<()> {
    // No supported target exposes a settable birth time through utimes.
    let _ = creation;

    let (modified, access) = match (last_modified, last_access) {
      (None, None) => return Ok(()),
      (Some(modified), Some(access)) => (modified, access),
      (modified, access) => {
        let current = self.read_basic()?;
        (
          modified.unwrap_or(current.last_modified_time),
          access.unwrap_or(current.last_access_time),
        )
      }
    };

    let atime = TimeVal::microseconds(
      access
        .to_micros()
        .ok_or_else(|| AttrError::invalid_value("lastAccessTime", "a time within the representable range"))?,
    );
    let mtime = TimeVal::microseconds(
      modified
        .to_micros()
        .ok_or_else(|| AttrError::invalid_value("lastModifiedTime", "a time within the representable range"))?,
    );
    let path = self.file.as_path();
    let result = if self.follow_links {
      utimes(path, &atime, &mtime)
    } else {
      lutimes(path, &atime, &mtime)
    };
    result.map_err(|errno| AttrError::io("utimes", path, io::Error::from(errno)))?;

    debug!(path = %self.file, %modified, %access, "updated file times");
    Ok(())
  }
}
