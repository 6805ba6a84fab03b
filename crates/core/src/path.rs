//! Validated path handle that views bind to

use std::fmt;
use std::fs;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use crate::{AttrError, Result};

/// A path that can be handed to the unix syscall layer.
///
/// Construction rejects paths the kernel can never accept (empty paths and
/// paths with interior NUL bytes). It does not touch the filesystem, so a
/// `UnixPath` may name a file that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnixPath(PathBuf);

impl UnixPath {
  pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let bytes = path.as_os_str().as_bytes();

    if bytes.is_empty() {
      return Err(AttrError::InvalidPath {
        path: path.to_path_buf(),
        reason: "path is empty",
      });
    }

    if bytes.contains(&0) {
      return Err(AttrError::InvalidPath {
        path: path.to_path_buf(),
        reason: "path contains a NUL byte",
      });
    }

    Ok(Self(path.to_path_buf()))
  }

  pub fn as_path(&self) -> &Path {
    &self.0
  }

  /// Read metadata, following a trailing symbolic link only when asked to
  pub fn metadata(&self, follow_links: bool) -> io::Result<fs::Metadata> {
    if follow_links {
      fs::metadata(&self.0)
    } else {
      fs::symlink_metadata(&self.0)
    }
  }
}

impl AsRef<Path> for UnixPath {
  fn as_ref(&self) -> &Path {
    &self.0
  }
}

impl TryFrom<&Path> for UnixPath {
  type Error = AttrError;

  fn try_from(path: &Path) -> Result<Self> {
    Self::new(path)
  }
}

impl fmt::Display for UnixPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.display())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::ffi::OsStr;

  #[test]
  fn accepts_relative_and_absolute_paths() {
    assert!(UnixPath::new("/etc/hosts").is_ok());
    assert!(UnixPath::new("foo/bar").is_ok());
  }

  #[test]
  fn rejects_empty_path() {
    let err = UnixPath::new("").unwrap_err();
    assert!(matches!(err, AttrError::InvalidPath { reason: "path is empty", .. }));
  }

  #[test]
  fn rejects_nul_byte() {
    let raw = Path::new(OsStr::from_bytes(b"/tmp/a\0b"));
    let err = UnixPath::new(raw).unwrap_err();
    assert!(matches!(err, AttrError::InvalidPath { .. }));
    assert!(!err.is_unsupported_view());
  }

  #[test]
  fn metadata_respects_link_following() {
    let temp = tempfile::TempDir::new().unwrap();
    let target = temp.path().join("target");
    let link = temp.path().join("link");
    fs::write(&target, b"data").unwrap();
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let path = UnixPath::new(&link).unwrap();
    assert!(path.metadata(true).unwrap().is_file());
    assert!(path.metadata(false).unwrap().file_type().is_symlink());
  }
}
