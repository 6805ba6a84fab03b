use std::fs::{self, Metadata, Permissions};
use std::io;
use std::os::unix::fs::{MetadataExt, PermissionsExt, chown, lchown};

use nix::errno::Errno;
use nix::fcntl::AT_FDCWD;
use nix::libc::mode_t;
use nix::sys::stat::{FchmodatFlags, Mode, fchmodat};
use serde::Serialize;
use tracing::debug;

use super::basic::stat;
use super::{
  AttributeView, AttributesBuilder, BASIC_ATTRIBUTES, BasicAttributeView, BasicAttributes, DynamicAttributeView,
  OwnerAttributeView, PosixAttributeView, UnixBasicView,
};
use crate::path::UnixPath;
use crate::principal::UserPrincipal;
use crate::value::{AttrMap, AttrValue, FileTime, PosixPermissions};
use crate::{AttrError, Result};

pub const POSIX_ATTRIBUTES: &[&str] = &["permissions", "owner", "group"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PosixAttributes {
  #[serde(flatten)]
  pub basic: BasicAttributes,
  pub owner: UserPrincipal,
  pub group: UserPrincipal,
  pub permissions: PosixPermissions,
}

impl PosixAttributes {
  pub fn from_metadata(meta: &Metadata) -> Self {
    Self {
      basic: BasicAttributes::from_metadata(meta),
      owner: UserPrincipal::from_uid(meta.uid()),
      group: UserPrincipal::from_gid(meta.gid()),
      permissions: PosixPermissions::from_mode(meta.mode()),
    }
  }
}

/// POSIX view: basic attributes plus owner, group and permission bits
#[derive(Debug, Clone)]
pub struct UnixPosixView {
  basic: UnixBasicView,
}

impl UnixPosixView {
  pub fn new(file: UnixPath, follow_links: bool) -> Self {
    Self {
      basic: UnixBasicView::new(file, follow_links),
    }
  }

  pub fn collect(&self, builder: &mut AttributesBuilder, meta: &Metadata) {
    self.basic.collect(builder, meta);
    builder.add("permissions", PosixPermissions::from_mode(meta.mode()));
    builder.add_with("owner", || UserPrincipal::from_uid(meta.uid()));
    builder.add_with("group", || UserPrincipal::from_gid(meta.gid()));
  }

  /// Write a posix or basic attribute by name; `None` if the name is neither
  pub fn try_set(&self, attribute: &str, value: &AttrValue) -> Option<Result<()>> {
    let result = match attribute {
      "permissions" => value
        .as_permissions(attribute)
        .and_then(|perms| self.set_permissions(perms)),
      "owner" => value
        .as_principal(attribute)
        .and_then(|owner| self.set_owner(owner)),
      "group" => value
        .as_principal(attribute)
        .and_then(|group| self.set_group(group)),
      _ => return self.basic.try_set(attribute, value),
    };
    Some(result)
  }

  /// Set the full mode bits (including setuid, setgid and sticky)
  pub(crate) fn set_mode(&self, mode: u32) -> Result<()> {
    let path = self.path().as_path();

    if self.follow_links() {
      fs::set_permissions(path, Permissions::from_mode(mode)).map_err(|e| AttrError::io("chmod", path, e))?;
    } else {
      // one call, so the link check and the mode change see the same file
      fchmodat(
        AT_FDCWD,
        path,
        Mode::from_bits_truncate(mode as mode_t),
        FchmodatFlags::NoFollowSymlink,
      )
      .map_err(|errno| match errno {
        Errno::ENOTSUP | Errno::EOPNOTSUPP => AttrError::io(
          "chmod",
          path,
          io::Error::new(io::ErrorKind::Unsupported, "cannot change permissions of a symbolic link"),
        ),
        other => AttrError::io("chmod", path, io::Error::from(other)),
      })?;
    }

    debug!(path = %self.path(), mode = format_args!("{:o}", mode), "updated file mode");
    Ok(())
  }

  pub(crate) fn set_ids(&self, uid: Option<u32>, gid: Option<u32>) -> Result<()> {
    let path = self.path().as_path();
    let result = if self.follow_links() {
      chown(path, uid, gid)
    } else {
      lchown(path, uid, gid)
    };
    result.map_err(|e| AttrError::io("chown", path, e))?;
    debug!(path = %self.path(), ?uid, ?gid, "updated file ownership");
    Ok(())
  }
}

impl AttributeView for UnixPosixView {
  fn name(&self) -> &'static str {
    "posix"
  }

  fn path(&self) -> &UnixPath {
    self.basic.path()
  }

  fn follow_links(&self) -> bool {
    self.basic.follow_links()
  }
}

impl DynamicAttributeView for UnixPosixView {
  fn read_attributes(&self, attributes: &[&str]) -> Result<AttrMap> {
    let mut builder = AttributesBuilder::new(self.name(), &[BASIC_ATTRIBUTES, POSIX_ATTRIBUTES], attributes)?;
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

impl BasicAttributeView for UnixPosixView {
  fn read_basic(&self) -> Result<BasicAttributes> {
    self.basic.read_basic()
  }

  fn set_times(
    &self,
    last_modified: Option<FileTime>,
    last_access: Option<FileTime>,
    creation: Option<FileTime>,
  ) -> Result<()> {
    self.basic.set_times(last_modified, last_access, creation)
  }
}

impl OwnerAttributeView for UnixPosixView {
  fn owner(&self) -> Result<UserPrincipal> {
    let meta = stat(self.path(), self.follow_links())?;
    Ok(UserPrincipal::from_uid(meta.uid()))
  }

  fn set_owner(&self, owner: &UserPrincipal) -> Result<()> {
    if owner.is_group() {
      return Err(AttrError::invalid_value("owner", "a user principal"));
    }
    self.set_ids(Some(owner.id()), None)
  }
}

impl PosixAttributeView for UnixPosixView {
  fn read_posix(&self) -> Result<PosixAttributes> {
    let meta = stat(self.path(), self.follow_links())?;
    Ok(PosixAttributes::from_metadata(&meta))
  }

  fn set_permissions(&self, permissions: PosixPermissions) -> Result<()> {
    self.set_mode(permissions.mode())
  }

  fn set_group(&self, group: &UserPrincipal) -> Result<()> {
    if !group.is_group() {
      return Err(AttrError::invalid_value("group", "a group principal"));
    }
    self.set_ids(None, Some(group.id()))
  }
}
