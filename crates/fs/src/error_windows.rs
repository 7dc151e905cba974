use core::fmt;

/// A raw `GetLastError` value reported by a failed OS call.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IoError(u32);

impl IoError {
    // https://learn.microsoft.com/en-us/windows/win32/debug/system-error-codes--0-499-
    pub const NOT_FOUND: Self = Self(3); // ERROR_PATH_NOT_FOUND

    /// What `RemoveDirectoryW` (but not `CreateDirectoryW`) reports for a missing path.
    pub const FILE_NOT_FOUND: Self = Self(2); // ERROR_FILE_NOT_FOUND

    pub const ACCESS_DENIED: Self = Self(5);

    pub const INVALID_PATH: Self = Self(161); // ERROR_BAD_PATHNAME

    pub const NOT_EMPTY: Self = Self(145); // ERROR_DIR_NOT_EMPTY

    pub const ALREADY_EXISTS: Self = Self(183);

    pub const fn from_raw(code: u32) -> Self {
        Self(code)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }

    pub fn most_recent() -> Self {
        extern "system" {
            fn GetLastError() -> u32;
        }

        Self(unsafe { GetLastError() })
    }

    /// Either [IoError::NOT_FOUND] or [IoError::FILE_NOT_FOUND].
    pub fn is_not_found(&self) -> bool {
        *self == Self::NOT_FOUND || *self == Self::FILE_NOT_FOUND
    }

    fn name(&self) -> Option<&'static str> {
        match *self {
            Self::NOT_FOUND | Self::FILE_NOT_FOUND => Some("NotFound"),
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
        write!(f, "{}", std::io::Error::from_raw_os_error(self.0 as i32))
    }
}

impl std::error::Error for IoError {}

impl From<IoError> for std::io::Error {
    fn from(err: IoError) -> Self {
        std::io::Error::from_raw_os_error(err.0 as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::IoError;
    use pretty_assertions::assert_eq;

    #[test]
    fn both_not_found_codes() {
        assert!(IoError::from_raw(2).is_not_found());
        assert!(IoError::from_raw(3).is_not_found());
        assert!(!IoError::ACCESS_DENIED.is_not_found());

        assert_eq!(format!("{:?}", IoError::from_raw(2)), "NotFound (2)");
        assert_eq!(format!("{:?}", IoError::NOT_FOUND), "NotFound (3)");
    }
}
