//! Platform attribute views for fsattr
//!
//! This crate provides the platform layers that sit in front of the generic
//! unix resolver:
//! - `LinuxViewFactory` / `LinuxResolver`
//! - `BsdViewFactory` / `BsdResolver` (also used on macOS)
//! - `NativeResolver`, chosen for the build target
//! - `Provider`, a path-level facade over any resolver

mod bsd;
mod family;
mod linux;
mod provider;

pub use bsd::{BSD_ATTRIBUTES, BsdAttributes, BsdResolver, BsdUnixView, BsdViewFactory};
pub use family::OsFamily;
pub use linux::{LinuxResolver, LinuxViewFactory, USER_NAMESPACE};
pub use provider::Provider;

use fsattr_core::{AttrError, Result, UnixPath};

/// The resolver for the build target
#[cfg(any(target_os = "linux", target_os = "android"))]
pub type NativeResolver = LinuxResolver;

#[cfg(any(
  target_os = "macos",
  target_os = "ios",
  target_os = "freebsd",
  target_os = "openbsd",
  target_os = "netbsd",
  target_os = "dragonfly"
))]
pub type NativeResolver = BsdResolver;

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
pub type NativeResolver = fsattr_core::UnixResolver;

/// User-defined views need OS extended attribute support
pub(crate) fn ensure_xattr_support(file: &UnixPath) -> Result<()> {
  if xattr::SUPPORTED_PLATFORM {
    Ok(())
  } else {
    Err(AttrError::ConstructionFailure {
      view: "user",
      path: file.as_path().to_path_buf(),
      reason: "extended attributes are not available on this target".to_string(),
    })
  }
}
