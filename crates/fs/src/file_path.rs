use crate::bounded_str::BoundedStr;
use crate::native_path::NativePath;
use crate::transcode::{nul_terminated_len, TargetNative, Transcode};
use core::{fmt, marker::PhantomData};
use fpath_tracing::debug;

/// Capacity, in code units and including the nul terminator, of both representations of a
/// [FilePath]. The longest path a FilePath can hold is one less than this.
pub const MAX_PATH_LEN: usize = 0x300;

/// What appends put between the existing path and the new segment.
#[cfg(windows)]
pub const OS_PATH_SEPARATOR: char = '\\';

#[cfg(not(windows))]
pub const OS_PATH_SEPARATOR: char = '/';

/// Where formatted segments get written before being appended. Leaves room for the terminator.
type Scratch = BoundedStr<{ MAX_PATH_LEN - 1 }>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Invalid,
    Valid,
}

/// A file path held in two fixed-size buffers: UTF-8 for the application, and the OS-native
/// encoding (chosen by `T`) for handing to filesystem calls. Every mutation goes through the
/// UTF-8 side, after which the native side is regenerated from it.
///
/// A FilePath starts out [Validity::Invalid] and only becomes valid through [FilePath::set].
/// Appending to an invalid path does nothing, and any set or append that can't be represented
/// (too long, contains a nul, or fails to convert) makes the path invalid. This means a chain
/// of appends can be written without checking anything in between; the accessors all return
/// `None` for an invalid path, so that's the one place to check.
///
/// This never allocates.
pub struct FilePath<T: Transcode = TargetNative> {
    /// Always nul-terminated at `narrow_len`, and always UTF-8 up to there.
    narrow: [u8; MAX_PATH_LEN],
    narrow_len: usize,
    /// Always nul-terminated at `native_len`.
    native: [T::Unit; MAX_PATH_LEN],
    native_len: usize,
    validity: Validity,
    _transcoder: PhantomData<T>,
}

impl<T: Transcode> FilePath<T> {
    /// An invalid, zeroed path.
    pub fn new() -> Self {
        Self {
            narrow: [0; MAX_PATH_LEN],
            narrow_len: 0,
            native: [T::NUL; MAX_PATH_LEN],
            native_len: 0,
            validity: Validity::Invalid,
            _transcoder: PhantomData,
        }
    }

    /// Replaces the whole path. The result is invalid if `path` is `MAX_PATH_LEN` bytes or
    /// longer, contains a nul, or can't be converted to the native encoding.
    pub fn set(&mut self, path: &str) {
        if path.len() >= MAX_PATH_LEN {
            debug!(
                len = path.len(),
                "path is too long for a {}-unit buffer", MAX_PATH_LEN
            );

            self.clear();

            return;
        }

        self.narrow = [0; MAX_PATH_LEN];
        self.narrow[..path.len()].copy_from_slice(path.as_bytes());
        self.narrow_len = path.len();
        self.validity = Validity::Valid;

        self.regenerate_native();
    }

    /// Appends a separator followed by the formatted `args`. Prefer the [crate::append] macro.
    ///
    /// The formatted text is cut off if it alone doesn't fit in a path. If the path with the new
    /// segment doesn't fit, or formatting fails, the path becomes invalid. Does nothing to an
    /// invalid path.
    pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) {
        if !self.is_valid() {
            return;
        }

        if let Some(scratch) = self.format_segment(args) {
            self.push_segment(scratch.as_str());
        }
    }

    /// Like [FilePath::append_fmt], but only appends the first `max_chars` chars of the
    /// formatted text. Does nothing if `max_chars` is more than [MAX_PATH_LEN].
    pub fn append_fmt_bounded(&mut self, max_chars: usize, args: fmt::Arguments<'_>) {
        if !self.is_valid() || max_chars > MAX_PATH_LEN {
            return;
        }

        if let Some(scratch) = self.format_segment(args) {
            self.push_segment(scratch.prefix_chars(max_chars));
        }
    }

    /// Formats a segment into scratch space, or clears the path if a formatting impl fails.
    fn format_segment(&mut self, args: fmt::Arguments<'_>) -> Option<Scratch> {
        match Scratch::format(args) {
            Ok(scratch) => Some(scratch),
            Err(fmt::Error) => {
                debug!("formatting a segment failed");

                self.clear();

                None
            }
        }
    }

    /// Appends a separator followed by `segment`.
    pub fn push(&mut self, segment: &str) {
        self.append_fmt(format_args!("{}", segment))
    }

    /// Appends a separator followed by a segment that's in the native encoding, such as a
    /// file name an OS call handed back. The segment ends at its first nul, if it has one.
    ///
    /// If the segment isn't valid in the native encoding, or it doesn't fit, the path becomes
    /// invalid. Does nothing to an invalid path.
    pub fn append_native(&mut self, segment: &[T::Unit]) {
        if !self.is_valid() {
            return;
        }

        let segment = &segment[..nul_terminated_len(segment, T::NUL)];
        let mut scratch = [0u8; MAX_PATH_LEN - 1];

        match T::native_to_narrow(segment, &mut scratch) {
            Ok(len) => match core::str::from_utf8(&scratch[..len]) {
                Ok(narrow) => self.push_segment(narrow),
                Err(_) => {
                    debug!("native segment did not convert to UTF-8");

                    self.clear();
                }
            },
            Err(err) => {
                debug!(%err, "could not convert native segment");

                self.clear();
            }
        }
    }

    /// Makes this an independent copy of `source`, or invalid and zeroed if `source` is absent
    /// or invalid.
    pub fn copy_from(&mut self, source: Option<&Self>) {
        match source {
            Some(source) if source.is_valid() => {
                self.narrow = source.narrow;
                self.narrow_len = source.narrow_len;
                self.native = source.native;
                self.native_len = source.native_len;
                self.validity = Validity::Valid;
            }
            _ => self.clear(),
        }
    }

    /// Makes the path invalid and zeroes both buffers.
    pub fn clear(&mut self) {
        self.narrow = [0; MAX_PATH_LEN];
        self.narrow_len = 0;
        self.native = [T::NUL; MAX_PATH_LEN];
        self.native_len = 0;
        self.validity = Validity::Invalid;
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    pub fn is_valid(&self) -> bool {
        self.validity == Validity::Valid
    }

    /// The path as UTF-8, or None if the path is invalid.
    pub fn as_str(&self) -> Option<&str> {
        if self.is_valid() {
            Some(self.narrow_str())
        } else {
            None
        }
    }

    /// Length of the UTF-8 representation in bytes. Zero for an invalid path.
    pub fn narrow_len(&self) -> usize {
        self.narrow_len
    }

    /// The native representation without its nul terminator, or None if the path is invalid.
    pub fn native_units(&self) -> Option<&[T::Unit]> {
        if self.is_valid() {
            Some(&self.native[..self.native_len])
        } else {
            None
        }
    }

    fn narrow_str(&self) -> &str {
        // Safety: narrow is only ever written from whole &str values.
        unsafe { core::str::from_utf8_unchecked(&self.narrow[..self.narrow_len]) }
    }

    /// The one place the UTF-8 buffer grows. Checks the result fits before writing anything.
    fn push_segment(&mut self, segment: &str) {
        let mut sep_buf = [0u8; 4];
        let separator = OS_PATH_SEPARATOR.encode_utf8(&mut sep_buf).as_bytes();
        let start = self.narrow_len;
        let new_len = start + separator.len() + segment.len();

        // There must still be room for the nul terminator.
        if new_len >= MAX_PATH_LEN {
            debug!(
                len = new_len,
                "appending {:?} would overflow a {}-unit buffer", segment, MAX_PATH_LEN
            );

            self.clear();

            return;
        }

        self.narrow[start..start + separator.len()].copy_from_slice(separator);
        self.narrow[start + separator.len()..new_len].copy_from_slice(segment.as_bytes());
        self.narrow_len = new_len;

        self.regenerate_native();
    }

    /// Rebuilds the native buffer from the UTF-8 buffer, or makes the path invalid if that fails
    /// (which is how a nul that arrived through a formatted segment gets rejected).
    fn regenerate_native(&mut self) {
        self.native = [T::NUL; MAX_PATH_LEN];

        // Safety: narrow is only ever written from whole &str values.
        let narrow = unsafe { core::str::from_utf8_unchecked(&self.narrow[..self.narrow_len]) };

        // Leave the last unit for the terminator.
        match T::narrow_to_native(narrow, &mut self.native[..MAX_PATH_LEN - 1]) {
            Ok(len) => {
                self.native_len = len;
            }
            Err(err) => {
                debug!(%err, "could not convert path to the native encoding");

                self.clear();
            }
        }
    }
}

impl FilePath<TargetNative> {
    /// The path in the form OS filesystem calls take, or None if the path is invalid.
    pub fn native_path(&self) -> Option<&NativePath> {
        if self.is_valid() {
            NativePath::from_units_with_nul(&self.native[..=self.native_len])
        } else {
            None
        }
    }
}

impl<T: Transcode> Default for FilePath<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transcode> Clone for FilePath<T> {
    fn clone(&self) -> Self {
        let mut answer = Self::new();

        answer.copy_from(Some(self));

        answer
    }
}

impl<T: Transcode> fmt::Debug for FilePath<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePath")
            .field("validity", &self.validity)
            .field("path", &self.narrow_str())
            .finish()
    }
}
