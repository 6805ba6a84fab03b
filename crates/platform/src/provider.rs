//! Path-level attribute access

use std::fmt;
use std::path::Path;

use fsattr_core::{
  AttrMap, AttrValue, AttributeSpec, AttributeViewResolver, BasicAttributes, DynamicAttributeView, FileAttributeView,
  LinkOption, PosixAttributes, Result, UserDefinedAttributeView, ViewResolverExt, ViewType,
};
use tracing::debug;

use crate::{NativeResolver, OsFamily};

/// Attribute access for paths, backed by one resolver chain.
///
/// `Provider::new()` uses the resolver for the build target; any other chain
/// can be supplied with [`Provider::with_resolver`].
pub struct Provider {
  resolver: Box<dyn AttributeViewResolver>,
  family: OsFamily,
}

impl Provider {
  pub fn new() -> Self {
    Self {
      resolver: Box::new(NativeResolver::default()),
      family: OsFamily::current(),
    }
  }

  pub fn with_resolver<R: AttributeViewResolver + 'static>(resolver: R) -> Self {
    Self {
      resolver: Box::new(resolver),
      family: OsFamily::current(),
    }
  }

  pub fn resolver(&self) -> &dyn AttributeViewResolver {
    self.resolver.as_ref()
  }

  pub fn family(&self) -> OsFamily {
    self.family
  }

  pub fn file_attribute_view(
    &self,
    path: impl AsRef<Path>,
    view: ViewType,
    options: &[LinkOption],
  ) -> Result<FileAttributeView> {
    self.resolver.resolve_by_type(path.as_ref(), view, options)
  }

  pub fn dynamic_view(
    &self,
    path: impl AsRef<Path>,
    name: &str,
    options: &[LinkOption],
  ) -> Result<Box<dyn DynamicAttributeView>> {
    self.resolver.resolve_by_name(path.as_ref(), name, options)
  }

  pub fn user_defined_view(
    &self,
    path: impl AsRef<Path>,
    options: &[LinkOption],
  ) -> Result<Box<dyn UserDefinedAttributeView>> {
    self.resolver.user_defined_view(path.as_ref(), options)
  }

  /// Read the attributes selected by `spec` (`view:a,b`, view defaults to basic)
  pub fn read_attributes(&self, path: impl AsRef<Path>, spec: &str, options: &[LinkOption]) -> Result<AttrMap> {
    let spec = AttributeSpec::parse(spec)?;
    let view = self.dynamic_view(path, spec.view, options)?;
    view.read_attributes(&spec.attributes)
  }

  /// Write the single attribute named by `spec`
  pub fn set_attribute(
    &self,
    path: impl AsRef<Path>,
    spec: &str,
    value: AttrValue,
    options: &[LinkOption],
  ) -> Result<()> {
    let (view, attribute) = AttributeSpec::parse_single(spec)?;
    let view = self.dynamic_view(path, view, options)?;
    view.set_attribute(attribute, value)?;
    debug!(path = %view.path(), view = view.name(), attribute, "set attribute");
    Ok(())
  }

  pub fn read_basic_attributes(&self, path: impl AsRef<Path>, options: &[LinkOption]) -> Result<BasicAttributes> {
    self.resolver.basic_view(path.as_ref(), options)?.read_basic()
  }

  pub fn read_posix_attributes(&self, path: impl AsRef<Path>, options: &[LinkOption]) -> Result<PosixAttributes> {
    self.resolver.posix_view(path.as_ref(), options)?.read_posix()
  }

  pub fn supported_views(&self) -> Vec<&'static str> {
    self.resolver.supported_views()
  }
}

impl Default for Provider {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for Provider {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Provider")
      .field("family", &self.family)
      .field("views", &self.supported_views())
      .finish()
  }
}
