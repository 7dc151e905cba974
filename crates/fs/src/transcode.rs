//! Conversion between the narrow (UTF-8) form of a path and the form the OS wants.
//!
//! Windows filesystem APIs take nul-terminated UTF-16, so [WideNative] converts between UTF-8
//! and UTF-16 code units. Everywhere else the OS takes nul-terminated bytes, so [NarrowNative]
//! is a straight copy. [TargetNative] names whichever one the current target uses.
//!
//! Both are always compiled, regardless of target, since neither one touches the OS.
//!
//! Every conversion either writes its whole output and returns the number of units written, or
//! returns an error having left the destination exactly as it found it.
use core::fmt;

/// Why a conversion could not be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscodeErr {
    /// The input was not valid in its encoding (e.g. an unpaired UTF-16 surrogate or
    /// non-UTF-8 bytes) or it contained a nul, which can't be represented in a nul-terminated path.
    Malformed,
    /// The destination doesn't have room for the converted output.
    Overflow,
}

impl fmt::Display for TranscodeErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscodeErr::Malformed => f.write_str("path is not valid in its source encoding"),
            TranscodeErr::Overflow => f.write_str("converted path does not fit in the destination"),
        }
    }
}

impl std::error::Error for TranscodeErr {}

pub trait Transcode {
    /// One code unit of the native encoding.
    type Unit: Copy + Default + Eq + fmt::Debug;

    /// The native encoding's nul terminator.
    const NUL: Self::Unit;

    /// Converts `src` into native units at the start of `dst`, returning how many were written.
    /// No terminator is written.
    fn narrow_to_native(src: &str, dst: &mut [Self::Unit]) -> Result<usize, TranscodeErr>;

    /// Converts native units into UTF-8 bytes at the start of `dst`, returning how many were
    /// written. No terminator is written.
    fn native_to_narrow(src: &[Self::Unit], dst: &mut [u8]) -> Result<usize, TranscodeErr>;
}

/// UTF-8 on the narrow side, UTF-16 on the native side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WideNative;

/// UTF-8 on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NarrowNative;

#[cfg(windows)]
pub type TargetNative = WideNative;

#[cfg(not(windows))]
pub type TargetNative = NarrowNative;

/// A unit of the current target's native path encoding.
pub type NativeUnit = <TargetNative as Transcode>::Unit;

impl Transcode for WideNative {
    type Unit = u16;

    const NUL: u16 = 0;

    fn narrow_to_native(src: &str, dst: &mut [u16]) -> Result<usize, TranscodeErr> {
        if src.as_bytes().contains(&0) {
            return Err(TranscodeErr::Malformed);
        }

        // Measure first, so a destination that's too small is never partially written.
        let needed = src.encode_utf16().count();

        if needed > dst.len() {
            return Err(TranscodeErr::Overflow);
        }

        for (slot, unit) in dst.iter_mut().zip(src.encode_utf16()) {
            *slot = unit;
        }

        Ok(needed)
    }

    fn native_to_narrow(src: &[u16], dst: &mut [u8]) -> Result<usize, TranscodeErr> {
        let mut needed = 0;

        for result in char::decode_utf16(src.iter().copied()) {
            match result {
                Ok('\0') | Err(_) => return Err(TranscodeErr::Malformed),
                Ok(ch) => needed += ch.len_utf8(),
            }
        }

        if needed > dst.len() {
            return Err(TranscodeErr::Overflow);
        }

        let mut written = 0;

        // The first pass already rejected every unpaired surrogate.
        for ch in char::decode_utf16(src.iter().copied()).flatten() {
            written += ch.encode_utf8(&mut dst[written..]).len();
        }

        Ok(written)
    }
}

impl Transcode for NarrowNative {
    type Unit = u8;

    const NUL: u8 = 0;

    fn narrow_to_native(src: &str, dst: &mut [u8]) -> Result<usize, TranscodeErr> {
        copy_checked(src.as_bytes(), dst)
    }

    fn native_to_narrow(src: &[u8], dst: &mut [u8]) -> Result<usize, TranscodeErr> {
        // The OS may hand back bytes that aren't UTF-8; the narrow side is always UTF-8.
        if core::str::from_utf8(src).is_err() {
            return Err(TranscodeErr::Malformed);
        }

        copy_checked(src, dst)
    }
}

fn copy_checked(src: &[u8], dst: &mut [u8]) -> Result<usize, TranscodeErr> {
    if src.contains(&0) {
        Err(TranscodeErr::Malformed)
    } else if src.len() > dst.len() {
        Err(TranscodeErr::Overflow)
    } else {
        dst[..src.len()].copy_from_slice(src);

        Ok(src.len())
    }
}

/// Length of a native string up to (not including) its first nul, or the whole slice if it
/// has none.
pub(crate) fn nul_terminated_len<U: Copy + Eq>(units: &[U], nul: U) -> usize {
    units.iter().position(|&unit| unit == nul).unwrap_or(units.len())
}

#[cfg(test)]
mod tests {
    use super::{NarrowNative, Transcode, TranscodeErr, WideNative};
    use pretty_assertions::assert_eq;

    #[test]
    fn wide_ascii() {
        let mut dst = [0u16; 8];
        let len = WideNative::narrow_to_native("/tmp", &mut dst).unwrap();

        assert_eq!(&dst[..len], &[0x2f, 0x74, 0x6d, 0x70]);
    }

    #[test]
    fn wide_surrogate_pair() {
        // U+1F600 is 4 bytes of UTF-8 and 2 UTF-16 units.
        let mut dst = [0u16; 4];
        let len = WideNative::narrow_to_native("a\u{1F600}", &mut dst).unwrap();

        assert_eq!(&dst[..len], &[0x61, 0xD83D, 0xDE00]);

        let mut back = [0u8; 8];
        let back_len = WideNative::native_to_narrow(&dst[..len], &mut back).unwrap();

        assert_eq!(core::str::from_utf8(&back[..back_len]), Ok("a\u{1F600}"));
    }

    #[test]
    fn wide_unpaired_surrogate_is_malformed() {
        let mut dst = [0xAAu8; 8];
        let result = WideNative::native_to_narrow(&[0x61, 0xD83D, 0x62], &mut dst);

        assert_eq!(result, Err(TranscodeErr::Malformed));
        assert_eq!(dst, [0xAA; 8], "destination must be left untouched");
    }

    #[test]
    fn wide_overflow_leaves_destination_untouched() {
        let mut dst = [7u16; 3];

        assert_eq!(
            WideNative::narrow_to_native("abcd", &mut dst),
            Err(TranscodeErr::Overflow)
        );
        assert_eq!(dst, [7; 3]);

        // 3 UTF-16 units expand to 9 UTF-8 bytes.
        let mut narrow = [7u8; 8];

        assert_eq!(
            WideNative::native_to_narrow(&[0x65E5, 0x672C, 0x8A9E], &mut narrow),
            Err(TranscodeErr::Overflow)
        );
        assert_eq!(narrow, [7; 8]);
    }

    #[test]
    fn interior_nul_is_malformed() {
        let mut wide = [0u16; 8];
        let mut narrow = [0u8; 8];

        assert_eq!(
            WideNative::narrow_to_native("a\0b", &mut wide),
            Err(TranscodeErr::Malformed)
        );
        assert_eq!(
            WideNative::native_to_narrow(&[0x61, 0, 0x62], &mut narrow),
            Err(TranscodeErr::Malformed)
        );
        assert_eq!(
            NarrowNative::narrow_to_native("a\0b", &mut narrow),
            Err(TranscodeErr::Malformed)
        );
    }

    #[test]
    fn narrow_is_identity() {
        let mut dst = [0u8; 16];
        let len = NarrowNative::narrow_to_native("/tmp/\u{e9}t\u{e9}", &mut dst).unwrap();

        assert_eq!(&dst[..len], "/tmp/\u{e9}t\u{e9}".as_bytes());
    }

    #[test]
    fn narrow_rejects_non_utf8_from_the_os() {
        let mut dst = [0u8; 8];

        assert_eq!(
            NarrowNative::native_to_narrow(&[b'a', 0xFF, b'b'], &mut dst),
            Err(TranscodeErr::Malformed)
        );
        assert_eq!(dst, [0; 8]);
    }

    #[test]
    fn empty_input() {
        let mut wide = [0u16; 1];
        let mut narrow = [0u8; 1];

        assert_eq!(WideNative::narrow_to_native("", &mut wide), Ok(0));
        assert_eq!(WideNative::native_to_narrow(&[], &mut narrow), Ok(0));
        assert_eq!(NarrowNative::narrow_to_native("", &mut narrow), Ok(0));
        assert_eq!(NarrowNative::native_to_narrow(&[], &mut narrow), Ok(0));
    }
}
