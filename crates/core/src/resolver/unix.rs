use std::path::Path;

use tracing::{debug, trace};

use super::{AttributeViewResolver, Unsupported, bind, merge_views};
use crate::link::LinkOption;
use crate::view::{
  DynamicAttributeView, FileAttributeView, UnixBasicView, UnixNativeView, UnixOwnerView, UnixPosixView, ViewType,
};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GenericView {
  Basic,
  Posix,
  Unix,
  Owner,
}

const GENERIC_VIEWS: &[(&str, GenericView)] = &[
  ("basic", GenericView::Basic),
  ("posix", GenericView::Posix),
  ("unix", GenericView::Unix),
  ("owner", GenericView::Owner),
];

const UNIX_VIEW_NAMES: &[&str] = &["basic", "posix", "unix", "owner"];

fn classify_name(name: &str) -> Option<GenericView> {
  GENERIC_VIEWS
    .iter()
    .find(|(candidate, _)| *candidate == name)
    .map(|&(_, view)| view)
}

/// The generic unix layer: views every unix filesystem can offer from stat,
/// chmod, chown and utimes alone.
#[derive(Debug, Clone, Default)]
pub struct UnixResolver<F = Unsupported> {
  fallback: F,
}

impl UnixResolver {
  pub fn new() -> Self {
    Self { fallback: Unsupported }
  }
}

impl<F> UnixResolver<F> {
  pub fn with_fallback(fallback: F) -> Self {
    Self { fallback }
  }

  pub fn fallback(&self) -> &F {
    &self.fallback
  }
}

impl<F: AttributeViewResolver> AttributeViewResolver for UnixResolver<F> {
  fn resolve_by_type(&self, path: &Path, view: ViewType, options: &[LinkOption]) -> Result<FileAttributeView> {
    let resolved = match view {
      ViewType::Basic => {
        let (file, follow_links) = bind(path, options)?;
        FileAttributeView::Basic(Box::new(UnixBasicView::new(file, follow_links)))
      }
      ViewType::Posix => {
        let (file, follow_links) = bind(path, options)?;
        FileAttributeView::Posix(Box::new(UnixPosixView::new(file, follow_links)))
      }
      ViewType::Owner => {
        let (file, follow_links) = bind(path, options)?;
        FileAttributeView::Owner(Box::new(UnixOwnerView::new(file, follow_links)))
      }
      ViewType::UserDefined | ViewType::Dos | ViewType::Acl => {
        trace!(path = ?path, %view, "unix layer delegating attribute view");
        return self.fallback.resolve_by_type(path, view, options);
      }
    };

    debug!(path = %resolved.path(), %view, follow_links = resolved.follow_links(), "resolved generic attribute view");
    Ok(resolved)
  }

  fn resolve_by_name(&self, path: &Path, name: &str, options: &[LinkOption]) -> Result<Box<dyn DynamicAttributeView>> {
    let Some(generic) = classify_name(name) else {
      trace!(path = ?path, view = name, "unix layer delegating attribute view");
      return self.fallback.resolve_by_name(path, name, options);
    };

    let (file, follow_links) = bind(path, options)?;
    debug!(path = %file, view = name, follow_links, "resolved generic attribute view");

    let view: Box<dyn DynamicAttributeView> = match generic {
      GenericView::Basic => Box::new(UnixBasicView::new(file, follow_links)),
      GenericView::Posix => Box::new(UnixPosixView::new(file, follow_links)),
      GenericView::Unix => Box::new(UnixNativeView::new(file, follow_links)),
      GenericView::Owner => Box::new(UnixOwnerView::new(file, follow_links)),
    };
    Ok(view)
  }

  fn supported_views(&self) -> Vec<&'static str> {
    merge_views(UNIX_VIEW_NAMES, self.fallback.supported_views())
  }
}
