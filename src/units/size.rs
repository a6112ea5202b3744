use std::fmt::{self, Write as _};
use std::ops::Deref;

use crate::units::*;

const BINARY_UNITS: [&str; 7] = [B, KIB, MIB, GIB, TIB, PIB, EIB];

/// A rendered size column value, kept on the stack.
///
/// The sizer and the renderer both build one of these per row, so the
/// measured length and the written bytes come from the same code.
#[derive(Clone, Copy)]
pub struct SizeText {
    buf: [u8; Self::CAPACITY],
    len: usize,
    align: bool,
}

impl SizeText {
    // "-9223372036854775808 B" is the longest value we can produce.
    const CAPACITY: usize = 32;

    pub const DIRECTORY: &'static str = "-";

    fn empty(align: bool) -> Self {
        Self {
            buf: [0; Self::CAPACITY],
            len: 0,
            align,
        }
    }

    /// Formats `args` into a new value. Everything formatted here fits in
    /// `CAPACITY`; should a write ever run out of room the text stays empty,
    /// which the sizer and the renderer then agree on.
    fn format(args: fmt::Arguments<'_>, align: bool) -> Self {
        let mut text = Self::empty(align);
        if text.write_fmt(args).is_err() {
            text.len = 0;
        }
        text
    }

    fn directory() -> Self {
        Self::format(format_args!("{}", Self::DIRECTORY), false)
    }

    pub fn as_str(&self) -> &str {
        // only ASCII is ever written
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or(Self::DIRECTORY)
    }

    /// Length once right-aligned to `width`. Only exact byte counts are
    /// aligned; unit sizes and the directory dash keep their natural width.
    pub fn padded_len(&self, width: usize) -> usize {
        if self.align {
            self.len.max(width)
        } else {
            self.len
        }
    }

    /// Appends the text right-aligned to `width`, see [`SizeText::padded_len`].
    pub fn write_padded(&self, dst: &mut Vec<u8>, width: usize) {
        let pad = self.padded_len(width) - self.len;
        dst.extend(std::iter::repeat_n(b' ', pad));
        dst.extend_from_slice(&self.buf[..self.len]);
    }
}

impl fmt::Write for SizeText {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        // refuse instead of cutting a value short
        if end > Self::CAPACITY {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

impl Deref for SizeText {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for SizeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl PartialEq<&str> for SizeText {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Formats a byte count.
///
/// With `exact` the plain decimal count is produced. Otherwise the value is
/// scaled down by 1024 until it fits below 1024 and printed with one decimal
/// and a binary unit, except for plain bytes which print as an integer.
pub fn format_size(bytes: i64, exact: bool) -> SizeText {
    if exact {
        return SizeText::format(format_args!("{bytes}"), true);
    }

    let mut value = bytes as f64;
    let base = 1024.0;
    let mut unit = BINARY_UNITS[0];

    for &next_unit in &BINARY_UNITS[1..] {
        if value < base {
            break;
        }
        value /= base;
        unit = next_unit;
    }

    if unit == B {
        SizeText::format(format_args!("{bytes} {unit}"), false)
    } else {
        SizeText::format(format_args!("{value:.1} {unit}"), false)
    }
}

/// Formats the size column of one entry: directories always show a dash.
pub fn format_entry_size(is_dir: bool, bytes: i64, exact: bool) -> SizeText {
    if is_dir {
        SizeText::directory()
    } else {
        format_size(bytes, exact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_sizes() {
        assert_eq!(format_size(0, true), "0");
        assert_eq!(format_size(1023, true), "1023");
        assert_eq!(format_size(i64::MAX, true), "9223372036854775807");
        assert_eq!(format_size(i64::MIN, true), "-9223372036854775808");
    }

    #[test]
    fn human_sizes() {
        assert_eq!(format_size(0, false), "0 B");
        assert_eq!(format_size(1023, false), "1023 B");
        assert_eq!(format_size(1024, false), "1.0 KiB");
        assert_eq!(format_size(1536, false), "1.5 KiB");
        assert_eq!(format_size(5 * 1024 * 1024, false), "5.0 MiB");
        assert_eq!(format_size(3 << 30, false), "3.0 GiB");
        assert_eq!(format_size(1 << 60, false), "1.0 EiB");
        assert_eq!(format_size(i64::MAX, false), "8.0 EiB");
        assert_eq!(format_size(-5, false), "-5 B");
    }

    #[test]
    fn directories_show_a_dash() {
        assert_eq!(format_entry_size(true, 4096, true), "-");
        assert_eq!(format_entry_size(true, 4096, false), "-");
        assert_eq!(format_entry_size(false, 4096, false), "4.0 KiB");
    }

    #[test]
    fn padding_applies_to_exact_sizes_only() {
        let mut out = Vec::new();
        let exact = format_size(42, true);
        assert_eq!(exact.padded_len(6), 6);
        exact.write_padded(&mut out, 6);
        assert_eq!(out, b"    42");

        let human = format_size(42, false);
        assert_eq!(human.padded_len(19), "42 B".len());

        let dash = format_entry_size(true, 0, true);
        assert_eq!(dash.padded_len(19), 1);
    }

    #[test]
    fn longest_values_fit() {
        assert_eq!(format_size(i64::MIN, false), "-9223372036854775808 B");
        assert_eq!(format_size(i64::MIN, true).len(), 20);
    }

    #[test]
    fn oversized_text_is_left_empty() {
        let long = "9".repeat(SizeText::CAPACITY + 1);
        let text = SizeText::format(format_args!("{long}"), true);
        assert_eq!(text, "");
        assert_eq!(text.padded_len(0), 0);
    }
}
