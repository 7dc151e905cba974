//! Provides testing utility functions for use throughout the workspace.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

#[doc(hidden)]
pub use pretty_assertions::assert_eq as _pretty_assert_eq;

#[derive(PartialEq, Eq)]
pub struct DebugAsDisplay<T>(pub T);

impl<T: std::fmt::Display> std::fmt::Debug for DebugAsDisplay<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Compares two `Display` values, showing a line diff on failure.
#[macro_export]
macro_rules! assert_display_eq {
    ($a:expr, $b:expr) => {
        $crate::_pretty_assert_eq!($crate::DebugAsDisplay($a), $crate::DebugAsDisplay($b))
    };
}

/// Turns on tracing for a test binary. Safe to call from every test.
pub fn init_tracing() {
    std::mem::forget(fpath_tracing::setup_tracing!());
}

static TMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// An empty directory under the system temp dir that gets deleted when this goes out of scope.
pub struct TmpDir {
    path: PathBuf,
}

impl TmpDir {
    pub fn new(name: &str) -> TmpDir {
        let unique = format!(
            "fpath_{}_{}_{}",
            name,
            std::process::id(),
            TMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed)
        );
        let path = std::env::temp_dir().join(unique);

        // ensure_empty_dir will fail if the dir doesn't already exist
        std::fs::create_dir_all(&path).unwrap();
        remove_dir_all::ensure_empty_dir(&path).unwrap();

        TmpDir { path }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// The temp dir as UTF-8, for feeding into a path buffer.
    pub fn path_str(&self) -> &str {
        self.path
            .to_str()
            .expect("temp dir path should be valid UTF-8")
    }
}

impl Drop for TmpDir {
    fn drop(&mut self) {
        // we "discard" the Result because there is no problem when a dir was already removed before we call remove_dir_all
        let _ = remove_dir_all::remove_dir_all(&self.path);
    }
}
