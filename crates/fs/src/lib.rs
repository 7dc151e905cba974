//! A fixed-capacity file path buffer that keeps a UTF-8 copy of the path and a copy in the
//! encoding the OS filesystem APIs take (UTF-16 on Windows, UTF-8 bytes elsewhere), plus the
//! handful of directory calls that consume the native copy.
//!
//! Nothing in here allocates; a [FilePath] is a plain value that can live on the stack.

mod bounded_str;
mod dir;
mod file_path;
mod native_path;
mod transcode;

pub use crate::bounded_str::BoundedStr;
pub use crate::dir::{create_dir, remove_dir};
pub use crate::file_path::{FilePath, Validity, MAX_PATH_LEN, OS_PATH_SEPARATOR};
pub use crate::native_path::NativePath;
pub use crate::transcode::{
    NarrowNative, NativeUnit, TargetNative, Transcode, TranscodeErr, WideNative,
};

// UNIX modules

#[cfg(unix)]
mod error_unix;

#[cfg(unix)]
pub use crate::error_unix::IoError;

// Windows modules

#[cfg(windows)]
mod error_windows;

#[cfg(windows)]
pub use crate::error_windows::IoError;

/// Appends a path separator and a formatted segment to a [FilePath].
///
/// ```
/// use fpath_fs::{append, FilePath, NarrowNative};
///
/// let mut path: FilePath<NarrowNative> = FilePath::new();
///
/// path.set("/tmp");
/// append!(path, "sub{}", 1);
///
/// assert!(path.as_str().unwrap().ends_with("sub1"));
/// ```
#[macro_export]
macro_rules! append {
    ($path:expr, $($arg:tt)*) => {
        $path.append_fmt(::core::format_args!($($arg)*))
    };
}

/// Like [append], but appends at most `max_chars` chars of the formatted segment.
#[macro_export]
macro_rules! append_bounded {
    ($path:expr, $max_chars:expr, $($arg:tt)*) => {
        $path.append_fmt_bounded($max_chars, ::core::format_args!($($arg)*))
    };
}
