use fsattr_core::{AttrError, AttrValue, LinkOption, ViewType};
use fsattr_platform::Provider;

use super::common::TestFs;

#[test]
fn user_attributes_round_trip() {
  let fs = TestFs::new();
  let provider = Provider::new();
  if !fs.xattr_available(&provider) {
    eprintln!("skipping: user extended attributes not supported here");
    return;
  }

  let view = provider.user_defined_view(&fs.file, &[]).unwrap();
  view.write("color", b"blue").unwrap();
  view.write("size", b"large").unwrap();

  assert_eq!(view.list().unwrap(), vec!["color", "size"]);
  assert_eq!(view.read("color").unwrap(), b"blue");
  assert_eq!(view.size("size").unwrap(), 5);

  view.delete("color").unwrap();
  assert_eq!(view.list().unwrap(), vec!["size"]);
  let err = view.read("color").unwrap_err();
  assert!(matches!(err, AttrError::AttributeNotFound { ref name, .. } if name == "color"));
}

#[test]
fn user_view_by_name_with_no_follow() {
  let fs = TestFs::new();
  let provider = Provider::new();

  let view = provider
    .dynamic_view(&fs.file, "user", &[LinkOption::NoFollowLinks])
    .unwrap();
  assert_eq!(view.name(), "user");
  assert!(!view.follow_links());
  assert_eq!(view.path().as_path(), fs.file.as_path());
}

#[test]
fn user_view_by_type() {
  let fs = TestFs::new();
  let view = Provider::new()
    .file_attribute_view(&fs.file, ViewType::UserDefined, &[])
    .unwrap();
  assert_eq!(view.view_type(), ViewType::UserDefined);
  assert!(view.follow_links());
}

#[test]
fn text_values_are_stored_as_bytes() {
  let fs = TestFs::new();
  let provider = Provider::new();
  if !fs.xattr_available(&provider) {
    eprintln!("skipping: user extended attributes not supported here");
    return;
  }

  provider
    .set_attribute(&fs.file, "user:origin", AttrValue::from("https://example.org"), &[])
    .unwrap();
  let map = provider.read_attributes(&fs.file, "user:origin", &[]).unwrap();
  assert_eq!(map["origin"], AttrValue::Bytes(b"https://example.org".to_vec()));
}

#[cfg(target_os = "linux")]
#[test]
fn linux_names_live_in_the_user_namespace() {
  let fs = TestFs::new();
  let provider = Provider::new();
  if !fs.xattr_available(&provider) {
    eprintln!("skipping: user extended attributes not supported here");
    return;
  }

  provider
    .user_defined_view(&fs.file, &[])
    .unwrap()
    .write("mime", b"text/plain")
    .unwrap();
  let raw = xattr::get(&fs.file, "user.mime").unwrap();
  assert_eq!(raw.as_deref(), Some(&b"text/plain"[..]));
}
