use super::{AttributeView, AttributesBuilder, DynamicAttributeView, OwnerAttributeView, UnixPosixView};
use crate::path::UnixPath;
use crate::principal::UserPrincipal;
use crate::value::{AttrMap, AttrValue};
use crate::{AttrError, Result};

pub const OWNER_ATTRIBUTES: &[&str] = &["owner"];

/// File owner view, layered over the posix view
#[derive(Debug, Clone)]
pub struct UnixOwnerView {
  posix: UnixPosixView,
}

impl UnixOwnerView {
  pub fn new(file: UnixPath, follow_links: bool) -> Self {
    Self {
      posix: UnixPosixView::new(file, follow_links),
    }
  }
}

impl AttributeView for UnixOwnerView {
  fn name(&self) -> &'static str {
    "owner"
  }

  fn path(&self) -> &UnixPath {
    self.posix.path()
  }

  fn follow_links(&self) -> bool {
    self.posix.follow_links()
  }
}

impl DynamicAttributeView for UnixOwnerView {
  fn read_attributes(&self, attributes: &[&str]) -> Result<AttrMap> {
    let mut builder = AttributesBuilder::new(self.name(), &[OWNER_ATTRIBUTES], attributes)?;
    if builder.wants("owner") {
      builder.add("owner", self.owner()?);
    }
    Ok(builder.finish())
  }

  fn set_attribute(&self, attribute: &str, value: AttrValue) -> Result<()> {
    match attribute {
      "owner" => self.set_owner(value.as_principal(attribute)?),
      _ => Err(AttrError::unknown(self.name(), attribute)),
    }
  }
}

impl OwnerAttributeView for UnixOwnerView {
  fn owner(&self) -> Result<UserPrincipal> {
    self.posix.owner()
  }

  fn set_owner(&self, owner: &UserPrincipal) -> Result<()> {
    self.posix.set_owner(owner)
  }
}
