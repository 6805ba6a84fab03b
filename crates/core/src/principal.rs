//! User and group principals backed by the system account database

use std::fmt;
use std::io;

use nix::unistd::{Gid, Group, Uid, User};
use serde::{Serialize, Serializer};

use crate::{AttrError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
  User,
  Group,
}

impl PrincipalKind {
  pub const fn as_str(&self) -> &'static str {
    match self {
      PrincipalKind::User => "user",
      PrincipalKind::Group => "group",
    }
  }
}

impl fmt::Display for PrincipalKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A file owner or group, identified by numeric id.
///
/// The name is informational; ids without an account entry have no name and
/// display as the number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserPrincipal {
  kind: PrincipalKind,
  id: u32,
  name: Option<String>,
}

impl UserPrincipal {
  pub fn user(id: u32, name: Option<String>) -> Self {
    Self {
      kind: PrincipalKind::User,
      id,
      name,
    }
  }

  pub fn group(id: u32, name: Option<String>) -> Self {
    Self {
      kind: PrincipalKind::Group,
      id,
      name,
    }
  }

  /// Principal for a uid, with the account name when one exists
  pub fn from_uid(uid: u32) -> Self {
    let name = User::from_uid(Uid::from_raw(uid)).ok().flatten().map(|u| u.name);
    Self::user(uid, name)
  }

  /// Principal for a gid, with the group name when one exists
  pub fn from_gid(gid: u32) -> Self {
    let name = Group::from_gid(Gid::from_raw(gid)).ok().flatten().map(|g| g.name);
    Self::group(gid, name)
  }

  /// Look up a user by account name.
  ///
  /// A purely numeric name that matches no account is taken as a raw uid.
  pub fn lookup_user(name: &str) -> Result<Self> {
    let found = User::from_name(name).map(|user| user.map(|u| u.uid.as_raw()));
    Self::lookup(PrincipalKind::User, name, found)
  }

  /// Look up a group by name, with the same numeric fallback as [`lookup_user`](Self::lookup_user)
  pub fn lookup_group(name: &str) -> Result<Self> {
    let found = Group::from_name(name).map(|group| group.map(|g| g.gid.as_raw()));
    Self::lookup(PrincipalKind::Group, name, found)
  }

  fn lookup(kind: PrincipalKind, name: &str, found: nix::Result<Option<u32>>) -> Result<Self> {
    let id = found.map_err(|errno| AttrError::PrincipalLookup {
      kind,
      name: name.to_string(),
      source: io::Error::from(errno),
    })?;

    if let Some(id) = id {
      return Ok(Self {
        kind,
        id,
        name: Some(name.to_string()),
      });
    }

    match name.parse::<u32>() {
      Ok(id) => Ok(Self { kind, id, name: None }),
      Err(_) => Err(AttrError::PrincipalNotFound {
        kind,
        name: name.to_string(),
      }),
    }
  }

  pub fn kind(&self) -> PrincipalKind {
    self.kind
  }

  pub fn id(&self) -> u32 {
    self.id
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  pub fn is_group(&self) -> bool {
    self.kind == PrincipalKind::Group
  }
}

impl fmt::Display for UserPrincipal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.name {
      Some(name) => write!(f, "{}", name),
      None => write!(f, "{}", self.id),
    }
  }
}

impl Serialize for UserPrincipal {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}
