//! Attribute values exchanged through dynamic views

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Serialize, Serializer};

use crate::principal::UserPrincipal;
use crate::{AttrError, Result};

/// Attribute name -> value, ordered by name
pub type AttrMap = BTreeMap<String, AttrValue>;

const NANOS_PER_SEC: u32 = 1_000_000_000;

// First second of year 10000, beyond what RFC 3339 can express
const RFC3339_LIMIT: i64 = 253_402_300_800;

/// A file timestamp with nanosecond resolution, relative to the unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileTime {
  secs: i64,
  nanos: u32,
}

impl FileTime {
  pub fn new(secs: i64, nanos: u32) -> Self {
    Self {
      secs: secs.saturating_add(i64::from(nanos / NANOS_PER_SEC)),
      nanos: nanos % NANOS_PER_SEC,
    }
  }

  pub fn from_system_time(time: SystemTime) -> Self {
    match time.duration_since(UNIX_EPOCH) {
      Ok(after) => Self::new(after.as_secs() as i64, after.subsec_nanos()),
      Err(err) => {
        let before = err.duration();
        let secs = -(before.as_secs() as i64);
        match before.subsec_nanos() {
          0 => Self::new(secs, 0),
          nanos => Self::new(secs - 1, NANOS_PER_SEC - nanos),
        }
      }
    }
  }

  /// `None` when the time lies outside what `SystemTime` can hold
  pub fn to_system_time(&self) -> Option<SystemTime> {
    let nanos = Duration::from_nanos(u64::from(self.nanos));
    let whole = Duration::from_secs(self.secs.unsigned_abs());
    if self.secs >= 0 {
      UNIX_EPOCH.checked_add(whole)?.checked_add(nanos)
    } else {
      UNIX_EPOCH.checked_sub(whole)?.checked_add(nanos)
    }
  }

  pub fn secs(&self) -> i64 {
    self.secs
  }

  pub fn nanos(&self) -> u32 {
    self.nanos
  }

  /// `None` when the time does not fit in an `i64` microsecond count
  pub fn to_micros(&self) -> Option<i64> {
    self
      .secs
      .checked_mul(1_000_000)?
      .checked_add(i64::from(self.nanos / 1_000))
  }
}

impl fmt::Display for FileTime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.to_system_time() {
      Some(time) if (0..RFC3339_LIMIT).contains(&self.secs) => {
        write!(f, "{}", humantime::format_rfc3339_nanos(time))
      }
      _ => write!(f, "@{}.{:09}", self.secs, self.nanos),
    }
  }
}

impl FromStr for FileTime {
  type Err = humantime::TimestampError;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    humantime::parse_rfc3339_weak(s).map(Self::from_system_time)
  }
}

impl Serialize for FileTime {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

/// One of the nine POSIX permission bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosixPermission {
  OwnerRead,
  OwnerWrite,
  OwnerExecute,
  GroupRead,
  GroupWrite,
  GroupExecute,
  OthersRead,
  OthersWrite,
  OthersExecute,
}

impl PosixPermission {
  /// All permissions in `rwxrwxrwx` display order
  pub const ALL: [PosixPermission; 9] = [
    PosixPermission::OwnerRead,
    PosixPermission::OwnerWrite,
    PosixPermission::OwnerExecute,
    PosixPermission::GroupRead,
    PosixPermission::GroupWrite,
    PosixPermission::GroupExecute,
    PosixPermission::OthersRead,
    PosixPermission::OthersWrite,
    PosixPermission::OthersExecute,
  ];

  pub const fn bit(self) -> u32 {
    match self {
      PosixPermission::OwnerRead => 0o400,
      PosixPermission::OwnerWrite => 0o200,
      PosixPermission::OwnerExecute => 0o100,
      PosixPermission::GroupRead => 0o040,
      PosixPermission::GroupWrite => 0o020,
      PosixPermission::GroupExecute => 0o010,
      PosixPermission::OthersRead => 0o004,
      PosixPermission::OthersWrite => 0o002,
      PosixPermission::OthersExecute => 0o001,
    }
  }
}

/// Set of POSIX permission bits (the low nine bits of a file mode)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PosixPermissions(u32);

impl PosixPermissions {
  pub const fn from_mode(mode: u32) -> Self {
    Self(mode & 0o777)
  }

  pub const fn mode(self) -> u32 {
    self.0
  }

  pub fn contains(self, permission: PosixPermission) -> bool {
    self.0 & permission.bit() != 0
  }

  pub fn insert(&mut self, permission: PosixPermission) {
    self.0 |= permission.bit();
  }

  pub fn remove(&mut self, permission: PosixPermission) {
    self.0 &= !permission.bit();
  }

  pub fn iter(self) -> impl Iterator<Item = PosixPermission> {
    PosixPermission::ALL.into_iter().filter(move |p| self.contains(*p))
  }
}

impl FromIterator<PosixPermission> for PosixPermissions {
  fn from_iter<I: IntoIterator<Item = PosixPermission>>(iter: I) -> Self {
    let mut perms = Self::default();
    for permission in iter {
      perms.insert(permission);
    }
    perms
  }
}

impl fmt::Display for PosixPermissions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, permission) in PosixPermission::ALL.iter().enumerate() {
      let c = if self.contains(*permission) { b"rwx"[i % 3] as char } else { '-' };
      write!(f, "{}", c)?;
    }
    Ok(())
  }
}

impl FromStr for PosixPermissions {
  type Err = AttrError;

  fn from_str(s: &str) -> Result<Self> {
    let bytes = s.as_bytes();
    if bytes.len() != 9 {
      return Err(AttrError::invalid_value("permissions", "a string like rwxr-x---"));
    }

    let mut perms = Self::default();
    for (i, (&c, permission)) in bytes.iter().zip(PosixPermission::ALL).enumerate() {
      match c {
        b'-' => {}
        c if c == b"rwx"[i % 3] => perms.insert(permission),
        _ => return Err(AttrError::invalid_value("permissions", "a string like rwxr-x---")),
      }
    }
    Ok(perms)
  }
}

impl Serialize for PosixPermissions {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

/// Identity of a file within the system: device and inode number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FileKey {
  pub dev: u64,
  pub ino: u64,
}

impl fmt::Display for FileKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "(dev={:x},ino={})", self.dev, self.ino)
  }
}

/// Value of a single attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
  Bool(bool),
  Int(i64),
  UInt(u64),
  Time(FileTime),
  Permissions(PosixPermissions),
  Principal(UserPrincipal),
  FileKey(FileKey),
  Bytes(#[serde(serialize_with = "bytes_as_text")] Vec<u8>),
  Text(String),
}

/// UTF-8 bytes as text, anything else as `0x`-prefixed hex
fn write_bytes(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
  match std::str::from_utf8(bytes) {
    Ok(text) => f.write_str(text),
    Err(_) => write!(f, "0x{}", hex::encode(bytes)),
  }
}

struct BytesText<'a>(&'a [u8]);

impl fmt::Display for BytesText<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_bytes(f, self.0)
  }
}

fn bytes_as_text<T: AsRef<[u8]>, S: Serializer>(bytes: &T, serializer: S) -> std::result::Result<S::Ok, S::Error> {
  serializer.collect_str(&BytesText(bytes.as_ref()))
}

impl AttrValue {
  pub fn as_time(&self, attribute: &str) -> Result<FileTime> {
    match self {
      AttrValue::Time(time) => Ok(*time),
      _ => Err(AttrError::invalid_value(attribute, "a file time")),
    }
  }

  pub fn as_permissions(&self, attribute: &str) -> Result<PosixPermissions> {
    match self {
      AttrValue::Permissions(perms) => Ok(*perms),
      _ => Err(AttrError::invalid_value(attribute, "a permission set")),
    }
  }

  pub fn as_principal(&self, attribute: &str) -> Result<&UserPrincipal> {
    match self {
      AttrValue::Principal(principal) => Ok(principal),
      _ => Err(AttrError::invalid_value(attribute, "a user or group principal")),
    }
  }

  pub fn as_u32(&self, attribute: &str) -> Result<u32> {
    let value = match self {
      AttrValue::Int(v) => u32::try_from(*v).ok(),
      AttrValue::UInt(v) => u32::try_from(*v).ok(),
      _ => None,
    };
    value.ok_or_else(|| AttrError::invalid_value(attribute, "an unsigned 32-bit integer"))
  }

  /// Raw bytes of a byte or text value
  pub fn as_bytes(&self, attribute: &str) -> Result<&[u8]> {
    match self {
      AttrValue::Bytes(bytes) => Ok(bytes),
      AttrValue::Text(text) => Ok(text.as_bytes()),
      _ => Err(AttrError::invalid_value(attribute, "bytes or text")),
    }
  }
}

impl fmt::Display for AttrValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AttrValue::Bool(v) => write!(f, "{}", v),
      AttrValue::Int(v) => write!(f, "{}", v),
      AttrValue::UInt(v) => write!(f, "{}", v),
      AttrValue::Time(v) => write!(f, "{}", v),
      AttrValue::Permissions(v) => write!(f, "{}", v),
      AttrValue::Principal(v) => write!(f, "{}", v),
      AttrValue::FileKey(v) => write!(f, "{}", v),
      AttrValue::Bytes(v) => write_bytes(f, v),
      AttrValue::Text(v) => write!(f, "{}", v),
    }
  }
}

impl From<bool> for AttrValue {
  fn from(v: bool) -> Self {
    AttrValue::Bool(v)
  }
}

impl From<i64> for AttrValue {
  fn from(v: i64) -> Self {
    AttrValue::Int(v)
  }
}

impl From<u64> for AttrValue {
  fn from(v: u64) -> Self {
    AttrValue::UInt(v)
  }
}

impl From<u32> for AttrValue {
  fn from(v: u32) -> Self {
    AttrValue::UInt(u64::from(v))
  }
}

impl From<FileTime> for AttrValue {
  fn from(v: FileTime) -> Self {
    AttrValue::Time(v)
  }
}

impl From<PosixPermissions> for AttrValue {
  fn from(v: PosixPermissions) -> Self {
    AttrValue::Permissions(v)
  }
}

impl From<UserPrincipal> for AttrValue {
  fn from(v: UserPrincipal) -> Self {
    AttrValue::Principal(v)
  }
}

impl From<FileKey> for AttrValue {
  fn from(v: FileKey) -> Self {
    AttrValue::FileKey(v)
  }
}

impl From<Vec<u8>> for AttrValue {
  fn from(v: Vec<u8>) -> Self {
    AttrValue::Bytes(v)
  }
}

impl From<&str> for AttrValue {
  fn from(v: &str) -> Self {
    AttrValue::Text(v.to_string())
  }
}
