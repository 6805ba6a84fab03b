//! Shared test helpers for platform integration tests.

use std::os::unix::fs::symlink;
use std::path::PathBuf;

use fsattr_platform::Provider;
use tempfile::TempDir;

/// A temporary directory holding a regular file and a symbolic link to it.
pub struct TestFs {
  pub temp: TempDir,
  pub file: PathBuf,
  pub link: PathBuf,
}

impl TestFs {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("data.txt");
    let link = temp.path().join("data.lnk");
    std::fs::write(&file, b"hello").unwrap();
    symlink(&file, &link).unwrap();
    Self { temp, file, link }
  }

  /// Path inside the test directory that does not exist.
  pub fn missing(&self) -> PathBuf {
    self.temp.path().join("missing")
  }

  /// Whether the filesystem behind the test directory accepts user xattrs.
  ///
  /// tmpfs on older kernels and some container overlays reject them.
  pub fn xattr_available(&self, provider: &Provider) -> bool {
    let scratch = self.temp.path().join("scratch");
    std::fs::write(&scratch, b"").unwrap();
    match provider.user_defined_view(&scratch, &[]) {
      Ok(view) => view.write("check", b"1").is_ok(),
      Err(_) => false,
    }
  }
}
