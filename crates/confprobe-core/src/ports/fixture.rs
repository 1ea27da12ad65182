//! Filesystem fixture port.
//!
//! Used only to set up empirical test conditions (e.g. whether the generic
//! remove primitive deletes directories). Failures are observed through the
//! results of later calls, never raised.

use std::path::Path;

/// Best-effort directory primitives on the machine running the probes.
#[cfg_attr(test, mockall::automock)]
pub trait DirFixture: Send + Sync {
    /// Create a single directory. Failure is silent.
    fn create_dir(&self, path: &Path);

    /// Remove an empty directory. Removing a missing path is a no-op.
    fn remove_dir(&self, path: &Path);

    /// Apply the platform's generic remove primitive to `path`.
    ///
    /// Returns true when the primitive reports success.
    fn remove(&self, path: &Path) -> bool;
}
