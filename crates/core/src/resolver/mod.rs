//! Attribute view resolution.
//!
//! Resolvers form a chain. Each layer builds the views it recognizes and hands
//! every other request, unchanged, to the layer behind it:
//!
//! ```text
//! PlatformResolver (basic, posix, unix, user)
//!   -> UnixResolver (basic, posix, unix, owner)
//!     -> Unsupported (always UnsupportedView)
//! ```

mod platform;
mod unix;

pub use platform::{PlatformResolver, ViewFactory};
pub use unix::UnixResolver;

use std::path::Path;
use std::sync::Arc;

use crate::link::{LinkOption, follow_links};
use crate::path::UnixPath;
use crate::view::{
  BasicAttributeView, DynamicAttributeView, FileAttributeView, OwnerAttributeView, PosixAttributeView,
  UserDefinedAttributeView, ViewType,
};
use crate::{AttrError, Result};

/// Selects and binds attribute views for a path.
///
/// Implementations hold no per-call state; resolving never touches the
/// filesystem.
pub trait AttributeViewResolver: Send + Sync {
  /// Resolve a view by capability tag
  fn resolve_by_type(&self, path: &Path, view: ViewType, options: &[LinkOption]) -> Result<FileAttributeView>;

  /// Resolve a view by name (exact, case-sensitive match)
  fn resolve_by_name(&self, path: &Path, name: &str, options: &[LinkOption]) -> Result<Box<dyn DynamicAttributeView>>;

  /// Names of every view reachable through this resolver, in resolution order
  fn supported_views(&self) -> Vec<&'static str>;
}

impl<R: AttributeViewResolver + ?Sized> AttributeViewResolver for Box<R> {
  fn resolve_by_type(&self, path: &Path, view: ViewType, options: &[LinkOption]) -> Result<FileAttributeView> {
    (**self).resolve_by_type(path, view, options)
  }

  fn resolve_by_name(&self, path: &Path, name: &str, options: &[LinkOption]) -> Result<Box<dyn DynamicAttributeView>> {
    (**self).resolve_by_name(path, name, options)
  }

  fn supported_views(&self) -> Vec<&'static str> {
    (**self).supported_views()
  }
}

impl<R: AttributeViewResolver + ?Sized> AttributeViewResolver for Arc<R> {
  fn resolve_by_type(&self, path: &Path, view: ViewType, options: &[LinkOption]) -> Result<FileAttributeView> {
    (**self).resolve_by_type(path, view, options)
  }

  fn resolve_by_name(&self, path: &Path, name: &str, options: &[LinkOption]) -> Result<Box<dyn DynamicAttributeView>> {
    (**self).resolve_by_name(path, name, options)
  }

  fn supported_views(&self) -> Vec<&'static str> {
    (**self).supported_views()
  }
}

/// End of every chain: recognizes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl AttributeViewResolver for Unsupported {
  fn resolve_by_type(&self, _path: &Path, view: ViewType, _options: &[LinkOption]) -> Result<FileAttributeView> {
    Err(AttrError::UnsupportedView {
      view: view.as_str().to_string(),
    })
  }

  fn resolve_by_name(&self, _path: &Path, name: &str, _options: &[LinkOption]) -> Result<Box<dyn DynamicAttributeView>> {
    Err(AttrError::UnsupportedView { view: name.to_string() })
  }

  fn supported_views(&self) -> Vec<&'static str> {
    Vec::new()
  }
}

/// Typed access on top of [`AttributeViewResolver::resolve_by_type`]
pub trait ViewResolverExt: AttributeViewResolver {
  fn basic_view(&self, path: &Path, options: &[LinkOption]) -> Result<Box<dyn BasicAttributeView>> {
    let view = self.resolve_by_type(path, ViewType::Basic, options)?;
    let name = view.name();
    view.into_basic().ok_or_else(|| mismatch(path, "basic", name))
  }

  fn posix_view(&self, path: &Path, options: &[LinkOption]) -> Result<Box<dyn PosixAttributeView>> {
    let view = self.resolve_by_type(path, ViewType::Posix, options)?;
    let name = view.name();
    view.into_posix().ok_or_else(|| mismatch(path, "posix", name))
  }

  fn owner_view(&self, path: &Path, options: &[LinkOption]) -> Result<Box<dyn OwnerAttributeView>> {
    let view = self.resolve_by_type(path, ViewType::Owner, options)?;
    let name = view.name();
    view.into_owner().ok_or_else(|| mismatch(path, "owner", name))
  }

  fn user_defined_view(&self, path: &Path, options: &[LinkOption]) -> Result<Box<dyn UserDefinedAttributeView>> {
    let view = self.resolve_by_type(path, ViewType::UserDefined, options)?;
    let name = view.name();
    view.into_user_defined().ok_or_else(|| mismatch(path, "user", name))
  }
}

impl<R: AttributeViewResolver + ?Sized> ViewResolverExt for R {}

fn mismatch(path: &Path, wanted: &'static str, got: &str) -> AttrError {
  AttrError::ConstructionFailure {
    view: wanted,
    path: path.to_path_buf(),
    reason: format!("resolver returned a '{}' view", got),
  }
}

/// Convert the path and reduce the link options, once per resolution
pub(crate) fn bind(path: &Path, options: &[LinkOption]) -> Result<(UnixPath, bool)> {
  let file = UnixPath::new(path)?;
  Ok((file, follow_links(options)))
}

/// Append fallback names not already listed by this layer
pub(crate) fn merge_views(own: &[&'static str], fallback: Vec<&'static str>) -> Vec<&'static str> {
  let mut views = own.to_vec();
  for name in fallback {
    if !views.contains(&name) {
      views.push(name);
    }
  }
  views
}
