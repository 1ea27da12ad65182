//! Filesystem fixture on the build machine.

use std::ffi::CString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use confprobe_core::DirFixture;
use tracing::{debug, warn};

/// [`DirFixture`] resolving relative paths against a base directory.
#[derive(Debug, Clone)]
pub struct OsDirFixture {
    base: PathBuf,
}

impl OsDirFixture {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base.join(path)
    }
}

impl DirFixture for OsDirFixture {
    fn create_dir(&self, path: &Path) {
        let full = self.resolve(path);
        if let Err(e) = fs::create_dir(&full) {
            warn!(path = %full.display(), error = %e, "failed to create scratch directory");
        }
    }

    fn remove_dir(&self, path: &Path) {
        let full = self.resolve(path);
        match fs::remove_dir(&full) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %full.display(), "scratch directory already gone");
            }
            Err(e) => {
                warn!(path = %full.display(), error = %e, "failed to remove scratch directory");
            }
        }
    }

    fn remove(&self, path: &Path) -> bool {
        let full = self.resolve(path);
        let Some(c_path) = full.to_str().and_then(|s| CString::new(s).ok()) else {
            warn!(path = %full.display(), "path not representable as a C string");
            return false;
        };
        c_remove(&c_path)
    }
}

/// The C runtime's `remove()`, which is what compiled code will call.
#[allow(unsafe_code)]
fn c_remove(path: &CString) -> bool {
    // SAFETY: `path` is a valid NUL-terminated string that outlives the call.
    unsafe { libc::remove(path.as_ptr()) == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_and_remove_dir() {
        let base = tempdir().unwrap();
        let fixture = OsDirFixture::new(base.path());
        let scratch = Path::new("scratch");

        fixture.create_dir(scratch);
        assert!(base.path().join(scratch).is_dir());

        fixture.remove_dir(scratch);
        assert!(!base.path().join(scratch).exists());

        // Second removal is a no-op.
        fixture.remove_dir(scratch);
    }

    #[test]
    fn test_remove_deletes_files() {
        let base = tempdir().unwrap();
        let fixture = OsDirFixture::new(base.path());
        fs::write(base.path().join("file.txt"), "x").unwrap();

        assert!(fixture.remove(Path::new("file.txt")));
        assert!(!base.path().join("file.txt").exists());
        assert!(!fixture.remove(Path::new("file.txt")));
    }

    #[test]
    fn test_remove_on_directory_then_cleanup() {
        let base = tempdir().unwrap();
        let fixture = OsDirFixture::new(base.path());
        let scratch = Path::new("dir");

        fixture.create_dir(scratch);
        let zapped = fixture.remove(scratch);
        fixture.remove_dir(scratch);

        assert_eq!(zapped, cfg!(unix));
        assert!(!base.path().join(scratch).exists());
    }
}
