//! Linux attribute views

use fsattr_core::view::{UnixBasicView, UnixNativeView, UnixPosixView, XattrUserView};
use fsattr_core::{PlatformResolver, Result, UnixPath, UnixResolver, ViewFactory};

use crate::ensure_xattr_support;

/// Linux keeps unprivileged extended attributes in this namespace
pub const USER_NAMESPACE: &str = "user.";

#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxViewFactory;

impl ViewFactory for LinuxViewFactory {
  type Basic = UnixBasicView;
  type Posix = UnixPosixView;
  type Unix = UnixNativeView;
  type UserDefined = XattrUserView;

  fn basic_view(&self, file: UnixPath, follow_links: bool) -> Result<UnixBasicView> {
    Ok(UnixBasicView::new(file, follow_links))
  }

  fn posix_view(&self, file: UnixPath, follow_links: bool) -> Result<UnixPosixView> {
    Ok(UnixPosixView::new(file, follow_links))
  }

  fn unix_view(&self, file: UnixPath, follow_links: bool) -> Result<UnixNativeView> {
    Ok(UnixNativeView::new(file, follow_links))
  }

  fn user_defined_view(&self, file: UnixPath, follow_links: bool) -> Result<XattrUserView> {
    ensure_xattr_support(&file)?;
    Ok(XattrUserView::new(file, follow_links, Some(USER_NAMESPACE)))
  }
}

/// Linux views in front of the generic unix layer
pub type LinuxResolver<F = UnixResolver> = PlatformResolver<LinuxViewFactory, F>;
