//! Error types for fsattr-core

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::principal::PrincipalKind;

/// Errors that can occur while resolving or using attribute views
#[derive(Debug, Error)]
pub enum AttrError {
  #[error("attribute view '{view}' is not supported by this filesystem")]
  UnsupportedView { view: String },

  #[error("invalid path {path:?}: {reason}")]
  InvalidPath { path: PathBuf, reason: &'static str },

  #[error("cannot construct '{view}' view for {path}: {reason}")]
  ConstructionFailure {
    view: &'static str,
    path: PathBuf,
    reason: String,
  },

  #[error("'{attribute}' not recognized by the '{view}' view")]
  UnknownAttribute { view: &'static str, attribute: String },

  #[error("'{attribute}' is read-only")]
  ReadOnlyAttribute { attribute: String },

  #[error("invalid value for '{attribute}': expected {expected}")]
  InvalidValue { attribute: String, expected: &'static str },

  #[error("invalid attribute spec '{spec}': {reason}")]
  InvalidAttributeSpec { spec: String, reason: &'static str },

  #[error("{kind} '{name}' not found")]
  PrincipalNotFound { kind: PrincipalKind, name: String },

  #[error("failed to look up {kind} '{name}': {source}")]
  PrincipalLookup {
    kind: PrincipalKind,
    name: String,
    #[source]
    source: io::Error,
  },

  #[error("extended attribute '{name}' not found on {path}")]
  AttributeNotFound { path: PathBuf, name: String },

  #[error("{op} failed for {path}: {source}")]
  Io {
    op: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl AttrError {
  pub(crate) fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
    AttrError::Io {
      op,
      path: path.to_path_buf(),
      source,
    }
  }

  pub(crate) fn unknown(view: &'static str, attribute: &str) -> Self {
    AttrError::UnknownAttribute {
      view,
      attribute: attribute.to_string(),
    }
  }

  pub(crate) fn invalid_value(attribute: &str, expected: &'static str) -> Self {
    AttrError::InvalidValue {
      attribute: attribute.to_string(),
      expected,
    }
  }

  /// True when the request named a view nobody along the resolver chain provides.
  pub fn is_unsupported_view(&self) -> bool {
    matches!(self, AttrError::UnsupportedView { .. })
  }
}
