//! Operating system family detection

use serde::{Deserialize, Serialize};
use std::fmt;

/// The family of unix systems whose attribute conventions a build follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
  Linux,
  Bsd,
  Other,
}

impl OsFamily {
  /// Detect the family at compile time
  #[cfg(any(target_os = "linux", target_os = "android"))]
  pub const fn current() -> Self {
    OsFamily::Linux
  }

  #[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
  ))]
  pub const fn current() -> Self {
    OsFamily::Bsd
  }

  #[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
  )))]
  pub const fn current() -> Self {
    OsFamily::Other
  }

  pub const fn as_str(&self) -> &'static str {
    match self {
      OsFamily::Linux => "linux",
      OsFamily::Bsd => "bsd",
      OsFamily::Other => "unix",
    }
  }
}

impl fmt::Display for OsFamily {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
