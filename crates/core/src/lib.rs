//! fsattr-core: Attribute-view resolution for unix filesystems
//!
//! This crate provides the pieces a unix filesystem provider uses to hand out
//! attribute views:
//! - `ViewType` and the attribute view traits
//! - generic unix views built from stat, chmod, chown and utimes
//! - `PlatformResolver`, which builds platform views through a `ViewFactory`
//!   and delegates everything else to the generic `UnixResolver`
//! - `AttributeSpec`, the `view:attr,...` selector used by dynamic access

#[cfg(not(unix))]
compile_error!("fsattr-core only supports unix targets");

mod attribute_spec;
mod error;
mod link;
mod path;
mod principal;
pub mod resolver;
mod value;
pub mod view;

#[cfg(test)]
mod testutil;

pub use attribute_spec::{AttributeSpec, DEFAULT_VIEW};
pub use error::AttrError;
pub use link::{LinkOption, follow_links};
pub use path::UnixPath;
pub use principal::{PrincipalKind, UserPrincipal};
pub use resolver::{AttributeViewResolver, PlatformResolver, UnixResolver, Unsupported, ViewFactory, ViewResolverExt};
pub use value::{AttrMap, AttrValue, FileKey, FileTime, PosixPermission, PosixPermissions};
pub use view::{
  AttributeView, BasicAttributeView, BasicAttributes, DynamicAttributeView, FileAttributeView, OwnerAttributeView,
  PosixAttributeView, PosixAttributes, UserDefinedAttributeView, ViewType,
};

/// Result type for attribute operations
pub type Result<T> = std::result::Result<T, AttrError>;
