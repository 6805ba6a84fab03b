use fsattr_core::{AttrError, AttrValue, FileTime, LinkOption, PosixPermissions, UserPrincipal};
use fsattr_platform::Provider;
use nix::unistd::getuid;

use super::common::TestFs;

#[test]
fn spec_without_view_reads_basic() {
  let fs = TestFs::new();
  let map = Provider::new()
    .read_attributes(&fs.file, "size,isRegularFile", &[])
    .unwrap();
  assert_eq!(map.len(), 2);
  assert_eq!(map["size"], AttrValue::UInt(5));
  assert_eq!(map["isRegularFile"], AttrValue::Bool(true));
}

#[test]
fn wildcard_reads_every_posix_attribute() {
  let fs = TestFs::new();
  let map = Provider::new().read_attributes(&fs.file, "posix:*", &[]).unwrap();
  for name in ["permissions", "owner", "group", "size", "lastModifiedTime", "fileKey"] {
    assert!(map.contains_key(name), "missing {name}");
  }
}

#[test]
fn permissions_round_trip_through_specs() {
  let fs = TestFs::new();
  let provider = Provider::new();
  let perms: PosixPermissions = "rw-r-----".parse().unwrap();

  provider
    .set_attribute(&fs.file, "posix:permissions", perms.into(), &[])
    .unwrap();
  let map = provider.read_attributes(&fs.file, "posix:permissions", &[]).unwrap();
  assert_eq!(map["permissions"], AttrValue::Permissions(perms));
  assert_eq!(provider.read_posix_attributes(&fs.file, &[]).unwrap().permissions.mode(), 0o640);
}

#[test]
fn mode_is_written_through_the_unix_view() {
  let fs = TestFs::new();
  let provider = Provider::new();

  provider
    .set_attribute(&fs.file, "unix:mode", AttrValue::UInt(0o600), &[])
    .unwrap();
  let map = provider.read_attributes(&fs.file, "unix:mode", &[]).unwrap();
  assert_eq!(map["mode"].as_u32("mode").unwrap() & 0o777, 0o600);
}

#[test]
fn modification_time_is_written() {
  let fs = TestFs::new();
  let provider = Provider::new();
  let time = FileTime::new(1_600_000_000, 0);

  provider
    .set_attribute(&fs.file, "lastModifiedTime", time.into(), &[])
    .unwrap();
  let attrs = provider.read_basic_attributes(&fs.file, &[]).unwrap();
  assert_eq!(attrs.last_modified_time, time);
}

#[test]
fn link_times_are_set_without_following() {
  let fs = TestFs::new();
  let provider = Provider::new();
  let time = FileTime::new(1_500_000_000, 0);
  let before = provider.read_basic_attributes(&fs.file, &[]).unwrap();

  provider
    .set_attribute(&fs.link, "basic:lastModifiedTime", time.into(), &[LinkOption::NoFollowLinks])
    .unwrap();

  let link = provider
    .read_basic_attributes(&fs.link, &[LinkOption::NoFollowLinks])
    .unwrap();
  assert_eq!(link.last_modified_time, time);
  let target = provider.read_basic_attributes(&fs.file, &[]).unwrap();
  assert_eq!(target.last_modified_time, before.last_modified_time);
}

#[test]
fn owner_can_be_set_to_self() {
  let fs = TestFs::new();
  let provider = Provider::new();
  let me = UserPrincipal::from_uid(getuid().as_raw());

  provider
    .set_attribute(&fs.file, "owner:owner", me.clone().into(), &[])
    .unwrap();
  let map = provider.read_attributes(&fs.file, "owner:owner", &[]).unwrap();
  assert_eq!(map["owner"].as_principal("owner").unwrap().id(), me.id());
}

#[test]
fn spec_errors() {
  let fs = TestFs::new();
  let provider = Provider::new();

  let err = provider.read_attributes(&fs.file, "dos:hidden", &[]).unwrap_err();
  assert!(err.is_unsupported_view());

  let err = provider.read_attributes(&fs.file, "posix:bogus", &[]).unwrap_err();
  assert!(matches!(err, AttrError::UnknownAttribute { view: "posix", .. }));

  let err = provider
    .set_attribute(&fs.file, "basic:size", AttrValue::UInt(1), &[])
    .unwrap_err();
  assert!(matches!(err, AttrError::ReadOnlyAttribute { .. }));

  let err = provider
    .set_attribute(&fs.file, "posix:owner,group", AttrValue::UInt(1), &[])
    .unwrap_err();
  assert!(matches!(err, AttrError::InvalidAttributeSpec { .. }));

  let err = provider
    .set_attribute(&fs.file, "posix:permissions", AttrValue::Bool(true), &[])
    .unwrap_err();
  assert!(matches!(err, AttrError::InvalidValue { .. }));
}

#[test]
fn supported_views_cover_the_whole_chain() {
  let views = Provider::new().supported_views();
  for name in ["basic", "posix", "unix", "owner"] {
    assert!(views.contains(&name), "missing {name}");
  }
  if cfg!(any(target_os = "linux", target_os = "macos", target_os = "freebsd")) {
    assert!(views.contains(&"user"));
  }
}
