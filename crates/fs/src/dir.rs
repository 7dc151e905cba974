use crate::file_path::FilePath;
use crate::native_path::NativePath;
use crate::transcode::TargetNative;
use crate::IoError;
use fpath_tracing::info;

// Everyone can read, write, and search, minus whatever the process umask takes away.
#[cfg(unix)]
const DIR_MODE: u32 = 0o777;

/// Creates a single directory. Its parent must already exist.
pub fn create_dir(path: &NativePath) -> Result<(), IoError> {
    create_dir_with::<RealFs>(path)
}

/// Removes a single empty directory.
///
/// On UNIX this goes through `remove(3)`, so it will also remove a file at `path`.
pub fn remove_dir(path: &NativePath) -> Result<(), IoError> {
    remove_dir_with::<RealFs>(path)
}

impl FilePath<TargetNative> {
    /// [create_dir] on this path, or [IoError::INVALID_PATH] if the path is invalid.
    pub fn create_dir(&self) -> Result<(), IoError> {
        create_dir_with::<RealFs>(self.native_path().ok_or(IoError::INVALID_PATH)?)
    }

    /// [remove_dir] on this path, or [IoError::INVALID_PATH] if the path is invalid.
    pub fn remove_dir(&self) -> Result<(), IoError> {
        remove_dir_with::<RealFs>(self.native_path().ok_or(IoError::INVALID_PATH)?)
    }
}

fn create_dir_with<Fs: DirSyscalls>(path: &NativePath) -> Result<(), IoError> {
    let answer = Fs::mkdir(path);

    info!(?path, ?answer, "create_dir");

    answer
}

fn remove_dir_with<Fs: DirSyscalls>(path: &NativePath) -> Result<(), IoError> {
    let answer = Fs::rmdir(path);

    info!(?path, ?answer, "remove_dir");

    answer
}

/// The actual filesystem implementation that we use when exposing functions.
/// Internally, tests can use fake trait implementations instead of this.
struct RealFs;

trait DirSyscalls {
    fn mkdir(path: &NativePath) -> Result<(), IoError>;
    fn rmdir(path: &NativePath) -> Result<(), IoError>;
}

#[cfg(unix)]
impl DirSyscalls for RealFs {
    fn mkdir(path: &NativePath) -> Result<(), IoError> {
        use core::ffi::{c_char, c_int};

        extern "C" {
            // https://www.man7.org/linux/man-pages/man2/mkdir.2.html
            fn mkdir(pathname: *const c_char, mode: u32) -> c_int;
        }

        if unsafe { mkdir(path.as_ptr(), DIR_MODE) } == 0 {
            Ok(())
        } else {
            Err(IoError::most_recent())
        }
    }

    fn rmdir(path: &NativePath) -> Result<(), IoError> {
        use core::ffi::{c_char, c_int};

        extern "C" {
            // https://www.man7.org/linux/man-pages/man3/remove.3.html
            fn remove(pathname: *const c_char) -> c_int;
        }

        if unsafe { remove(path.as_ptr()) } == 0 {
            Ok(())
        } else {
            Err(IoError::most_recent())
        }
    }
}

#[cfg(windows)]
impl DirSyscalls for RealFs {
    fn mkdir(path: &NativePath) -> Result<(), IoError> {
        extern "system" {
            // https://learn.microsoft.com/en-us/windows/win32/api/fileapi/nf-fileapi-createdirectoryw
            fn CreateDirectoryW(
                lpPathName: *const u16,
                lpSecurityAttributes: *mut core::ffi::c_void,
            ) -> i32;
        }

        if unsafe { CreateDirectoryW(path.as_ptr(), core::ptr::null_mut()) } != 0 {
            Ok(())
        } else {
            Err(IoError::most_recent())
        }
    }

    fn rmdir(path: &NativePath) -> Result<(), IoError> {
        extern "system" {
            // https://learn.microsoft.com/en-us/windows/win32/api/fileapi/nf-fileapi-removedirectoryw
            fn RemoveDirectoryW(lpPathName: *const u16) -> i32;
        }

        if unsafe { RemoveDirectoryW(path.as_ptr()) } != 0 {
            Ok(())
        } else {
            Err(IoError::most_recent())
        }
    }
}
