//! Test doubles for resolver tests

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::link::LinkOption;
use crate::path::UnixPath;
use crate::principal::UserPrincipal;
use crate::resolver::{AttributeViewResolver, ViewFactory};
use crate::value::{AttrMap, AttrValue, FileTime, PosixPermissions};
use crate::view::{
  AttributeView, BasicAttributeView, BasicAttributes, DynamicAttributeView, FileAttributeView, OwnerAttributeView,
  PosixAttributeView, PosixAttributes, UserDefinedAttributeView, ViewType,
};
use crate::{AttrError, Result};

/// A view that only remembers how it was built
#[derive(Debug, Clone)]
pub struct StubView {
  name: &'static str,
  file: UnixPath,
  follow_links: bool,
}

impl StubView {
  pub fn new(name: &'static str, file: UnixPath, follow_links: bool) -> Self {
    Self {
      name,
      file,
      follow_links,
    }
  }

  fn unsupported(&self) -> AttrError {
    AttrError::io("stub", self.file.as_path(), io::ErrorKind::Unsupported.into())
  }
}

impl AttributeView for StubView {
  fn name(&self) -> &'static str {
    self.name
  }

  fn path(&self) -> &UnixPath {
    &self.file
  }

  fn follow_links(&self) -> bool {
    self.follow_links
  }
}

impl DynamicAttributeView for StubView {
  fn read_attributes(&self, _attributes: &[&str]) -> Result<AttrMap> {
    Ok(AttrMap::new())
  }

  fn set_attribute(&self, _attribute: &str, _value: AttrValue) -> Result<()> {
    Ok(())
  }
}

impl BasicAttributeView for StubView {
  fn read_basic(&self) -> Result<BasicAttributes> {
    Err(self.unsupported())
  }

  fn set_times(&self, _: Option<FileTime>, _: Option<FileTime>, _: Option<FileTime>) -> Result<()> {
    Ok(())
  }
}

impl OwnerAttributeView for StubView {
  fn owner(&self) -> Result<UserPrincipal> {
    Ok(UserPrincipal::user(0, None))
  }

  fn set_owner(&self, _owner: &UserPrincipal) -> Result<()> {
    Ok(())
  }
}

impl PosixAttributeView for StubView {
  fn read_posix(&self) -> Result<PosixAttributes> {
    Err(self.unsupported())
  }

  fn set_permissions(&self, _permissions: PosixPermissions) -> Result<()> {
    Ok(())
  }

  fn set_group(&self, _group: &UserPrincipal) -> Result<()> {
    Ok(())
  }
}

impl UserDefinedAttributeView for StubView {
  fn list(&self) -> Result<Vec<String>> {
    Ok(Vec::new())
  }

  fn size(&self, name: &str) -> Result<usize> {
    self.read(name).map(|value| value.len())
  }

  fn read(&self, name: &str) -> Result<Vec<u8>> {
    Err(AttrError::AttributeNotFound {
      path: self.file.as_path().to_path_buf(),
      name: name.to_string(),
    })
  }

  fn write(&self, _name: &str, _value: &[u8]) -> Result<()> {
    Ok(())
  }

  fn delete(&self, _name: &str) -> Result<()> {
    Ok(())
  }
}

/// Builds [`StubView`]s named `stub-<view>`
#[derive(Debug, Clone, Copy, Default)]
pub struct StubFactory;

impl ViewFactory for StubFactory {
  type Basic = StubView;
  type Posix = StubView;
  type Unix = StubView;
  type UserDefined = StubView;

  fn basic_view(&self, file: UnixPath, follow_links: bool) -> Result<StubView> {
    Ok(StubView::new("stub-basic", file, follow_links))
  }

  fn posix_view(&self, file: UnixPath, follow_links: bool) -> Result<StubView> {
    Ok(StubView::new("stub-posix", file, follow_links))
  }

  fn unix_view(&self, file: UnixPath, follow_links: bool) -> Result<StubView> {
    Ok(StubView::new("stub-unix", file, follow_links))
  }

  fn user_defined_view(&self, file: UnixPath, follow_links: bool) -> Result<StubView> {
    Ok(StubView::new("stub-user", file, follow_links))
  }
}

/// Fails every construction
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingFactory;

fn refuse(view: &'static str, file: UnixPath) -> Result<StubView> {
  Err(AttrError::ConstructionFailure {
    view,
    path: file.as_path().to_path_buf(),
    reason: "refused by test factory".to_string(),
  })
}

impl ViewFactory for FailingFactory {
  type Basic = StubView;
  type Posix = StubView;
  type Unix = StubView;
  type UserDefined = StubView;

  fn basic_view(&self, file: UnixPath, _follow_links: bool) -> Result<StubView> {
    refuse("basic", file)
  }

  fn posix_view(&self, file: UnixPath, _follow_links: bool) -> Result<StubView> {
    refuse("posix", file)
  }

  fn unix_view(&self, file: UnixPath, _follow_links: bool) -> Result<StubView> {
    refuse("unix", file)
  }

  fn user_defined_view(&self, file: UnixPath, _follow_links: bool) -> Result<StubView> {
    refuse("user", file)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
  ByType {
    path: PathBuf,
    view: ViewType,
    options: Vec<LinkOption>,
  },
  ByName {
    path: PathBuf,
    name: String,
    options: Vec<LinkOption>,
  },
}

/// Fallback that records every request; answers only `owner`
#[derive(Debug, Default)]
pub struct RecordingResolver {
  calls: Mutex<Vec<Call>>,
}

impl RecordingResolver {
  pub fn calls(&self) -> Vec<Call> {
    self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
  }

  fn record(&self, call: Call) {
    if let Ok(mut calls) = self.calls.lock() {
      calls.push(call);
    }
  }
}

impl AttributeViewResolver for RecordingResolver {
  fn resolve_by_type(&self, path: &Path, view: ViewType, options: &[LinkOption]) -> Result<FileAttributeView> {
    self.record(Call::ByType {
      path: path.to_path_buf(),
      view,
      options: options.to_vec(),
    });
    match view {
      ViewType::Owner => Ok(FileAttributeView::Owner(Box::new(StubView::new(
        "fallback-owner",
        UnixPath::new(path)?,
        crate::link::follow_links(options),
      )))),
      other => Err(AttrError::UnsupportedView {
        view: other.as_str().to_string(),
      }),
    }
  }

  fn resolve_by_name(&self, path: &Path, name: &str, options: &[LinkOption]) -> Result<Box<dyn DynamicAttributeView>> {
    self.record(Call::ByName {
      path: path.to_path_buf(),
      name: name.to_string(),
      options: options.to_vec(),
    });
    match name {
      "owner" => Ok(Box::new(StubView::new(
        "fallback-owner",
        UnixPath::new(path)?,
        crate::link::follow_links(options),
      ))),
      other => Err(AttrError::UnsupportedView {
        view: other.to_string(),
      }),
    }
  }

  fn supported_views(&self) -> Vec<&'static str> {
    vec!["owner"]
  }
}
