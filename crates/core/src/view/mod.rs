//! Attribute view traits and the capability tags used to request them.
//!
//! A view is bound to one [`UnixPath`] and one link-following decision when it
//! is created and keeps both for its whole lifetime. Creating a view performs
//! no I/O; the filesystem is only touched by the read and write methods.

mod basic;
mod owner;
mod posix;
mod unix;
mod user;

pub use basic::{BASIC_ATTRIBUTES, BasicAttributes, FileKind, UnixBasicView};
pub use owner::{OWNER_ATTRIBUTES, UnixOwnerView};
pub use posix::{POSIX_ATTRIBUTES, PosixAttributes, UnixPosixView};
pub use unix::{UNIX_ATTRIBUTES, UnixAttributes, UnixNativeView};
pub use user::XattrUserView;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::UnixPath;
use crate::principal::UserPrincipal;
use crate::value::{AttrMap, AttrValue, FileTime, PosixPermissions};
use crate::{AttrError, Result};

/// Capability tag for a type-based view request.
///
/// Not every layer builds every tag: the tags a resolver does not recognize
/// are handed to its fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
  Basic,
  Posix,
  Owner,
  UserDefined,
  Dos,
  Acl,
}

impl ViewType {
  /// The view name that requests the same capability by name
  pub const fn as_str(&self) -> &'static str {
    match self {
      ViewType::Basic => "basic",
      ViewType::Posix => "posix",
      ViewType::Owner => "owner",
      ViewType::UserDefined => "user",
      ViewType::Dos => "dos",
      ViewType::Acl => "acl",
    }
  }
}

impl fmt::Display for ViewType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Common surface of every attribute view
pub trait AttributeView: Send + Sync + fmt::Debug {
  /// Name of the view, as used in `view:attribute` specs
  fn name(&self) -> &'static str;

  /// The path this view is bound to
  fn path(&self) -> &UnixPath;

  /// Whether operations follow a trailing symbolic link
  fn follow_links(&self) -> bool;
}

/// Attribute access by attribute name
pub trait DynamicAttributeView: AttributeView {
  /// Read the named attributes; `"*"` selects every attribute of the view
  fn read_attributes(&self, attributes: &[&str]) -> Result<AttrMap>;

  fn set_attribute(&self, attribute: &str, value: AttrValue) -> Result<()>;
}

pub trait BasicAttributeView: DynamicAttributeView {
  fn read_basic(&self) -> Result<BasicAttributes>;

  /// Update timestamps. `None` keeps the current value; all `None` is a no-op.
  fn set_times(
    &self,
    last_modified: Option<FileTime>,
    last_access: Option<FileTime>,
    creation: Option<FileTime>,
  ) -> Result<()>;
}

pub trait OwnerAttributeView: DynamicAttributeView {
  fn owner(&self) -> Result<UserPrincipal>;

  fn set_owner(&self, owner: &UserPrincipal) -> Result<()>;
}

pub trait PosixAttributeView: BasicAttributeView + OwnerAttributeView {
  fn read_posix(&self) -> Result<PosixAttributes>;

  fn set_permissions(&self, permissions: PosixPermissions) -> Result<()>;

  fn set_group(&self, group: &UserPrincipal) -> Result<()>;
}

/// Arbitrary name/value metadata stored as extended attributes
pub trait UserDefinedAttributeView: DynamicAttributeView {
  fn list(&self) -> Result<Vec<String>>;

  fn size(&self, name: &str) -> Result<usize>;

  fn read(&self, name: &str) -> Result<Vec<u8>>;

  fn write(&self, name: &str, value: &[u8]) -> Result<()>;

  fn delete(&self, name: &str) -> Result<()>;
}

/// A view produced by a type-based request, tagged with its capability
#[derive(Debug)]
pub enum FileAttributeView {
  Basic(Box<dyn BasicAttributeView>),
  Posix(Box<dyn PosixAttributeView>),
  Owner(Box<dyn OwnerAttributeView>),
  UserDefined(Box<dyn UserDefinedAttributeView>),
}

impl FileAttributeView {
  pub fn view_type(&self) -> ViewType {
    match self {
      FileAttributeView::Basic(_) => ViewType::Basic,
      FileAttributeView::Posix(_) => ViewType::Posix,
      FileAttributeView::Owner(_) => ViewType::Owner,
      FileAttributeView::UserDefined(_) => ViewType::UserDefined,
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      FileAttributeView::Basic(v) => v.name(),
      FileAttributeView::Posix(v) => v.name(),
      FileAttributeView::Owner(v) => v.name(),
      FileAttributeView::UserDefined(v) => v.name(),
    }
  }

  pub fn path(&self) -> &UnixPath {
    match self {
      FileAttributeView::Basic(v) => v.path(),
      FileAttributeView::Posix(v) => v.path(),
      FileAttributeView::Owner(v) => v.path(),
      FileAttributeView::UserDefined(v) => v.path(),
    }
  }

  pub fn follow_links(&self) -> bool {
    match self {
      FileAttributeView::Basic(v) => v.follow_links(),
      FileAttributeView::Posix(v) => v.follow_links(),
      FileAttributeView::Owner(v) => v.follow_links(),
      FileAttributeView::UserDefined(v) => v.follow_links(),
    }
  }

  pub fn into_basic(self) -> Option<Box<dyn BasicAttributeView>> {
    match self {
      FileAttributeView::Basic(v) => Some(v),
      _ => None,
    }
  }

  pub fn into_posix(self) -> Option<Box<dyn PosixAttributeView>> {
    match self {
      FileAttributeView::Posix(v) => Some(v),
      _ => None,
    }
  }

  pub fn into_owner(self) -> Option<Box<dyn OwnerAttributeView>> {
    match self {
      FileAttributeView::Owner(v) => Some(v),
      _ => None,
    }
  }

  pub fn into_user_defined(self) -> Option<Box<dyn UserDefinedAttributeView>> {
    match self {
      FileAttributeView::UserDefined(v) => Some(v),
      _ => None,
    }
  }
}

/// Collects the attributes selected by a dynamic read request.
///
/// Requested names are checked against the view's known attribute groups up
/// front, so an unknown name fails the whole read before any I/O happens.
#[derive(Debug)]
pub struct AttributesBuilder {
  all: bool,
  selected: BTreeSet<&'static str>,
  map: AttrMap,
}

impl AttributesBuilder {
  pub fn new(view: &'static str, known: &[&[&'static str]], requested: &[&str]) -> Result<Self> {
    let mut all = false;
    let mut selected = BTreeSet::new();

    for name in requested {
      if *name == "*" {
        all = true;
        continue;
      }
      match known.iter().flat_map(|group| group.iter()).copied().find(|k| k == name) {
        Some(known_name) => {
          selected.insert(known_name);
        }
        None => return Err(AttrError::unknown(view, name)),
      }
    }

    Ok(Self {
      all,
      selected,
      map: AttrMap::new(),
    })
  }

  pub fn wants(&self, name: &str) -> bool {
    self.all || self.selected.contains(name)
  }

  /// Record `value` under `name` if it was requested
  pub fn add(&mut self, name: &str, value: impl Into<AttrValue>) {
    if self.wants(name) {
      self.map.insert(name.to_string(), value.into());
    }
  }

  /// Like [`add`](Self::add), computing the value only when it was requested
  pub fn add_with<V: Into<AttrValue>>(&mut self, name: &str, value: impl FnOnce() -> V) {
    if self.wants(name) {
      self.map.insert(name.to_string(), value().into());
    }
  }

  pub fn finish(self) -> AttrMap {
    self.map
  }
}
