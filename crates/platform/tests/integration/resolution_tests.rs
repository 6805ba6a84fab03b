use fsattr_core::{AttrError, LinkOption, ViewType};
use fsattr_platform::Provider;
use nix::unistd::{getgid, getuid};
use tracing_test::traced_test;

use super::common::TestFs;

#[test]
fn posix_view_by_type_follows_links_by_default() {
  let fs = TestFs::new();
  let provider = Provider::new();

  let view = provider.file_attribute_view(&fs.link, ViewType::Posix, &[]).unwrap();
  assert_eq!(view.view_type(), ViewType::Posix);
  assert!(view.follow_links());

  let attrs = view.into_posix().unwrap().read_posix().unwrap();
  assert!(attrs.basic.is_regular_file());
  assert_eq!(attrs.basic.size, 5);
  assert_eq!(attrs.owner.id(), getuid().as_raw());
  assert_eq!(attrs.group.id(), getgid().as_raw());
}

#[test]
fn no_follow_sees_the_link_itself() {
  let fs = TestFs::new();
  let provider = Provider::new();

  let followed = provider.read_basic_attributes(&fs.link, &[]).unwrap();
  assert!(followed.is_regular_file());

  let own = provider
    .read_basic_attributes(&fs.link, &[LinkOption::NoFollowLinks])
    .unwrap();
  assert!(own.is_symbolic_link());
}

#[test]
fn follow_links_option_is_idempotent() {
  let fs = TestFs::new();
  let provider = Provider::new();

  let a = provider
    .dynamic_view(&fs.link, "unix", &[LinkOption::NoFollowLinks])
    .unwrap();
  let b = provider
    .dynamic_view(
      &fs.link,
      "unix",
      &[LinkOption::FollowLinks, LinkOption::NoFollowLinks, LinkOption::NoFollowLinks],
    )
    .unwrap();
  assert_eq!(a.follow_links(), b.follow_links());
  assert_eq!(a.read_attributes(&["ino"]).unwrap(), b.read_attributes(&["ino"]).unwrap());
}

#[test]
fn owner_is_served_by_the_generic_layer() {
  let fs = TestFs::new();
  let provider = Provider::new();

  let view = provider.file_attribute_view(&fs.file, ViewType::Owner, &[]).unwrap();
  let owner = view.into_owner().unwrap().owner().unwrap();
  assert_eq!(owner.id(), getuid().as_raw());
  assert!(!owner.is_group());
}

#[test]
fn unknown_views_are_unsupported() {
  let fs = TestFs::new();
  let provider = Provider::new();

  let err = provider.dynamic_view(&fs.file, "acl", &[]).unwrap_err();
  assert!(matches!(err, AttrError::UnsupportedView { ref view } if view == "acl"));

  let err = provider.file_attribute_view(&fs.file, ViewType::Dos, &[]).unwrap_err();
  assert!(err.is_unsupported_view());

  let err = provider.dynamic_view(&fs.file, "Posix", &[]).unwrap_err();
  assert!(err.is_unsupported_view());
}

#[test]
fn empty_path_is_invalid() {
  let provider = Provider::new();
  let err = provider.dynamic_view("", "posix", &[]).unwrap_err();
  assert!(matches!(err, AttrError::InvalidPath { .. }));
}

#[test]
fn resolving_does_not_touch_the_filesystem() {
  let fs = TestFs::new();
  let provider = Provider::new();

  let view = provider.dynamic_view(fs.missing(), "posix", &[]).unwrap();
  let err = view.read_attributes(&["size"]).unwrap_err();
  assert!(matches!(err, AttrError::Io { op: "stat", .. }));
}

#[test]
#[traced_test]
fn delegation_and_resolution_are_logged() {
  let fs = TestFs::new();
  let provider = Provider::new();

  provider.dynamic_view(&fs.file, "owner", &[]).unwrap();
  assert!(logs_contain("delegating attribute view to fallback"));
  assert!(logs_contain("resolved generic attribute view"));
}
