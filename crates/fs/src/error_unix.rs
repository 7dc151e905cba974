use core::fmt;

/// A raw `errno` value reported by a failed OS call.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IoError(i32);

impl IoError {
    // https://www.man7.org/linux/man-pages/man3/errno.3.html
    pub const NOT_FOUND: Self = Self(2);

    pub const ACCESS_DENIED: Self = Self(13);

    pub const ALREADY_EXISTS: Self = Self(17);

    /// ENOTEMPTY is 39 on Linux but 66 on the BSDs (macOS included).
    #[cfg(any(target_os = "linux", target_os = "android"))]
    pub const NOT_EMPTY: Self = Self(39);

    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    pub const NOT_EMPTY: Self = Self(66);

    /// EINVAL. Also what the path buffer reports when asked to hand an invalid path to the OS.
    pub const INVALID_PATH: Self = Self(22);

    pub const fn from_raw(code: i32) -> Self {
        Self(code)
    }

    pub const fn raw(&self) -> i32 {
        self.0
    }

    #[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
    pub fn most_recent() -> Self {
        extern "C" {
            fn __error() -> *mut i32;
        }

        Self(unsafe { *__error() })
    }

    #[cfg(not(any(target_os = "macos", target_os = "ios", target_os = "freebsd")))]
    pub fn most_recent() -> Self {
        extern "C" {
            fn __errno_location() -> *mut i32;
        }

        Self(unsafe { *__errno_location() })
    }

    /// ENOENT. UNIX has only the one code for a missing path.
    pub fn is_not_found(&self) -> bool {
        *self == Self::NOT_FOUND
    }

    fn name(&self) -> Option<&'static str> {
        match *self {
            Self::NOT_FOUND => Some("NotFound"),
            Self::ACCESS_DENIED => Some("AccessDenied"),
            Self::ALREADY_EXISTS => Some("AlreadyExists"),
            Self::NOT_EMPTY => Some("NotEmpty"),
            Self::INVALID_PATH => Some("InvalidPath"),
            _ => None,
        }
    }
}

impl fmt::Debug for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", name, self.0),
            None => write!(f, "IoError ({})", self.0),
        }
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", std::io::Error::from_raw_os_error(self.0))
    }
}

impl std::error::Error for IoError {}

impl From<IoError> for std::io::Error {
    fn from(err: IoError) -> Self {
        std::io::Error::from_raw_os_error(err.0)
    }
}
