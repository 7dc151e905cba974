use core::fmt;

/// A UTF-8 string stored inline in `N` bytes.
///
/// Writes that don't fit are cut off at the last char boundary that does fit, the same way a
/// bounded `snprintf` would, except that a multi-byte char is never split. Once anything has been
/// cut off, every later write is dropped, so the contents are always a prefix of everything that
/// was written. Running out of room is not an error; use [BoundedStr::truncated] to find out
/// whether anything was dropped.
#[derive(Clone, Copy)]
pub struct BoundedStr<const N: usize> {
    bytes: [u8; N],
    len: usize,
    truncated: bool,
}

impl<const N: usize> BoundedStr<N> {
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
            truncated: false,
        }
    }

    /// Formats `args` into a fresh buffer. Fails only if one of the `Display` (etc.) impls
    /// involved returns an error.
    pub fn format(args: fmt::Arguments<'_>) -> Result<Self, fmt::Error> {
        let mut answer = Self::new();

        fmt::write(&mut answer, args)?;

        Ok(answer)
    }

    pub fn as_str(&self) -> &str {
        // Safety: only whole chars from &str inputs are ever copied in.
        unsafe { core::str::from_utf8_unchecked(&self.bytes[..self.len]) }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether some of what was written got cut off.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// The longest prefix of the contents that has at most `max_chars` chars.
    pub fn prefix_chars(&self, max_chars: usize) -> &str {
        let s = self.as_str();

        match s.char_indices().nth(max_chars) {
            Some((byte_index, _)) => &s[..byte_index],
            None => s,
        }
    }

    /// Appends as much of `s` as fits, or nothing if an earlier write was already cut off.
    pub fn push_str(&mut self, s: &str) {
        if self.truncated {
            return;
        }

        let room = N - self.len;
        let take = if s.len() <= room {
            s.len()
        } else {
            self.truncated = true;

            floor_char_boundary(s, room)
        };

        self.bytes[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
    }
}

impl<const N: usize> Default for BoundedStr<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for BoundedStr<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);

        Ok(())
    }
}

impl<const N: usize> fmt::Debug for BoundedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

/// The largest char boundary in `s` that is <= `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        // A char is at most 4 bytes, so this loop runs at most 3 times.
        let mut boundary = index;

        while !s.is_char_boundary(boundary) {
            boundary -= 1;
        }

        boundary
    }
}
