#[cfg(unix)]
use core::ffi::{c_char, CStr};

#[cfg(windows)]
use widestring::U16CStr;

use crate::transcode::{NativeUnit, TargetNative, Transcode, TranscodeErr};
use core::fmt;

/// A path in exactly the form the OS filesystem APIs take it:
/// nul-terminated UTF-8 bytes on UNIX, nul-terminated UTF-16 on Windows.
///
/// This is always borrowed, usually from a [crate::FilePath].
#[cfg(unix)]
#[repr(transparent)]
pub struct NativePath {
    pub(crate) c_str: CStr,
}

#[cfg(windows)]
#[repr(transparent)]
pub struct NativePath {
    pub(crate) u16_c_str: U16CStr,
}

#[cfg(unix)]
impl NativePath {
    pub fn new(c_str: &CStr) -> &Self {
        // Safety: Self is repr(transparent)
        unsafe { &*(c_str as *const CStr as *const Self) }
    }

    /// The given units must end in a nul and contain no other nul.
    pub fn from_units_with_nul(units: &[NativeUnit]) -> Option<&Self> {
        CStr::from_bytes_with_nul(units).ok().map(Self::new)
    }

    pub fn as_ptr(&self) -> *const c_char {
        self.c_str.as_ptr()
    }

    /// The path's units, not including the nul terminator.
    pub fn units(&self) -> &[NativeUnit] {
        self.c_str.to_bytes()
    }
}

#[cfg(windows)]
impl NativePath {
    pub fn new(u16_c_str: &U16CStr) -> &Self {
        // Safety: Self is repr(transparent)
        unsafe { &*(u16_c_str as *const U16CStr as *const Self) }
    }

    /// The given units must end in a nul and contain no other nul.
    pub fn from_units_with_nul(units: &[NativeUnit]) -> Option<&Self> {
        match units.iter().position(|&unit| unit == 0) {
            Some(index) if index + 1 == units.len() => U16CStr::from_slice_truncate(units)
                .ok()
                .map(Self::new),
            _ => None,
        }
    }

    pub fn as_ptr(&self) -> *const u16 {
        self.u16_c_str.as_ptr()
    }

    /// The path's units, not including the nul terminator.
    pub fn units(&self) -> &[NativeUnit] {
        self.u16_c_str.as_slice()
    }
}

impl NativePath {
    /// Converts back to UTF-8 at the start of `dst`, returning the number of bytes written.
    pub fn to_narrow(&self, dst: &mut [u8]) -> Result<usize, TranscodeErr> {
        TargetNative::native_to_narrow(self.units(), dst)
    }
}

#[cfg(unix)]
impl<'a> From<&'a CStr> for &'a NativePath {
    fn from(c_str: &'a CStr) -> Self {
        NativePath::new(c_str)
    }
}

#[cfg(windows)]
impl<'a> From<&'a U16CStr> for &'a NativePath {
    fn from(u16_c_str: &'a U16CStr) -> Self {
        NativePath::new(u16_c_str)
    }
}

impl fmt::Debug for NativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[cfg(unix)]
        {
            fmt::Debug::fmt(&self.c_str, f)
        }

        #[cfg(windows)]
        {
            fmt::Debug::fmt(&self.u16_c_str.to_string_lossy(), f)
        }
    }
}
