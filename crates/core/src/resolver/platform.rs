use std::path::Path;

use tracing::{debug, trace};

use super::{AttributeViewResolver, UnixResolver, bind, merge_views};
use crate::link::LinkOption;
use crate::path::UnixPath;
use crate::view::{
  BasicAttributeView, DynamicAttributeView, FileAttributeView, PosixAttributeView, UserDefinedAttributeView, ViewType,
};
use crate::Result;

/// Constructors for the views a platform layer builds itself.
///
/// Each constructor binds a view to `file` and `follow_links`. Construction
/// must not perform I/O; it may fail when the view cannot exist at all for
/// this build (for instance, no extended attribute support).
pub trait ViewFactory: Send + Sync {
  type Basic: BasicAttributeView + 'static;
  type Posix: PosixAttributeView + 'static;
  type Unix: DynamicAttributeView + 'static;
  type UserDefined: UserDefinedAttributeView + 'static;

  fn basic_view(&self, file: UnixPath, follow_links: bool) -> Result<Self::Basic>;

  fn posix_view(&self, file: UnixPath, follow_links: bool) -> Result<Self::Posix>;

  /// The platform-native view, richer than posix
  fn unix_view(&self, file: UnixPath, follow_links: bool) -> Result<Self::Unix>;

  fn user_defined_view(&self, file: UnixPath, follow_links: bool) -> Result<Self::UserDefined>;
}

/// Tags this layer builds itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypedView {
  Basic,
  Posix,
  UserDefined,
}

/// Names this layer builds itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NamedView {
  Basic,
  Posix,
  Unix,
  UserDefined,
}

/// Checked in order; matching is exact and case-sensitive
const NAMED_VIEWS: &[(&str, NamedView)] = &[
  ("basic", NamedView::Basic),
  ("posix", NamedView::Posix),
  ("unix", NamedView::Unix),
  ("user", NamedView::UserDefined),
];

const PLATFORM_VIEW_NAMES: &[&str] = &["basic", "posix", "unix", "user"];

fn classify_type(view: ViewType) -> Option<TypedView> {
  match view {
    ViewType::Basic => Some(TypedView::Basic),
    ViewType::Posix => Some(TypedView::Posix),
    ViewType::UserDefined => Some(TypedView::UserDefined),
    ViewType::Owner | ViewType::Dos | ViewType::Acl => None,
  }
}

fn classify_name(name: &str) -> Option<NamedView> {
  NAMED_VIEWS
    .iter()
    .find(|(candidate, _)| *candidate == name)
    .map(|&(_, view)| view)
}

/// A platform layer over a [`ViewFactory`].
///
/// Requests for basic, posix, unix and user views are built by the factory;
/// everything else goes, unchanged, to `fallback`.
#[derive(Debug, Clone, Default)]
pub struct PlatformResolver<V, F = UnixResolver> {
  views: V,
  fallback: F,
}

impl<V: ViewFactory> PlatformResolver<V> {
  pub fn new(views: V) -> Self {
    Self {
      views,
      fallback: UnixResolver::new(),
    }
  }
}

impl<V, F> PlatformResolver<V, F> {
  pub fn with_fallback(views: V, fallback: F) -> Self {
    Self { views, fallback }
  }

  pub fn views(&self) -> &V {
    &self.views
  }

  pub fn fallback(&self) -> &F {
    &self.fallback
  }
}

impl<V: ViewFactory, F: AttributeViewResolver> AttributeViewResolver for PlatformResolver<V, F> {
  fn resolve_by_type(&self, path: &Path, view: ViewType, options: &[LinkOption]) -> Result<FileAttributeView> {
    let Some(local) = classify_type(view) else {
      trace!(path = ?path, %view, "delegating attribute view to fallback");
      return self.fallback.resolve_by_type(path, view, options);
    };

    let (file, follow_links) = bind(path, options)?;
    let resolved = match local {
      TypedView::Basic => FileAttributeView::Basic(Box::new(self.views.basic_view(file, follow_links)?)),
      TypedView::Posix => FileAttributeView::Posix(Box::new(self.views.posix_view(file, follow_links)?)),
      // user-defined is the only tag left
      TypedView::UserDefined => {
        FileAttributeView::UserDefined(Box::new(self.views.user_defined_view(file, follow_links)?))
      }
    };

    debug!(path = %resolved.path(), %view, follow_links, "resolved attribute view");
    Ok(resolved)
  }

  fn resolve_by_name(&self, path: &Path, name: &str, options: &[LinkOption]) -> Result<Box<dyn DynamicAttributeView>> {
    let Some(local) = classify_name(name) else {
      trace!(path = ?path, view = name, "delegating attribute view to fallback");
      return self.fallback.resolve_by_name(path, name, options);
    };

    let (file, follow_links) = bind(path, options)?;
    let resolved: Box<dyn DynamicAttributeView> = match local {
      NamedView::Basic => Box::new(self.views.basic_view(file, follow_links)?),
      NamedView::Posix => Box::new(self.views.posix_view(file, follow_links)?),
      NamedView::Unix => Box::new(self.views.unix_view(file, follow_links)?),
      // user-defined is the only name left
      NamedView::UserDefined => Box::new(self.views.user_defined_view(file, follow_links)?),
    };

    debug!(path = %resolved.path(), view = name, follow_links, "resolved attribute view");
    Ok(resolved)
  }

  fn supported_views(&self) -> Vec<&'static str> {
    merge_views(PLATFORM_VIEW_NAMES, self.fallback.supported_views())
  }
}
