//! Text strings and dates as they appear in annotation dictionaries.

use encoding_rs::{UTF_16BE, WINDOWS_1252};
use pdfannot_core::ValidationMode;

/// Decode a PDF text string to a Rust string.
///
/// Strings starting with the UTF-16BE byte order mark are decoded as UTF-16BE,
/// strings starting with the UTF-8 BOM (PDF 2.0) as UTF-8, and anything else
/// byte-wise. Windows-1252 is used for the byte-wise case; it agrees with
/// PDFDocEncoding on every printable ASCII and Latin-1 code point.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(b"\xFE\xFF") {
        let (text, _) = UTF_16BE.decode_without_bom_handling(rest);
        return text.into_owned();
    }
    if let Some(rest) = bytes.strip_prefix(b"\xEF\xBB\xBF") {
        return String::from_utf8_lossy(rest).into_owned();
    }
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// Ranges of the optional two-digit fields after the year: month, day,
/// hour, minute, second.
const DATE_FIELDS: [(u32, u32); 5] = [(1, 12), (1, 31), (0, 23), (0, 59), (0, 59)];

/// Whether `text` is a date of the form `D:YYYYMMDDHHmmSSOHH'mm'`.
///
/// Every component after the year is optional, but components cannot be
/// skipped. The apostrophe after the offset minutes is optional. Relaxed
/// mode also accepts dates without the `D:` prefix.
pub fn is_valid_date(text: &str, mode: ValidationMode) -> bool {
    let body = match text.strip_prefix("D:") {
        Some(rest) => rest,
        None if mode == ValidationMode::Relaxed => text,
        None => return false,
    };
    let mut cursor = DateCursor::new(body.as_bytes());
    if cursor.number(4).is_none() {
        return false;
    }
    for (min, max) in DATE_FIELDS {
        match cursor.peek() {
            None => return true,
            Some(b'+' | b'-' | b'Z') => break,
            Some(_) => match cursor.number(2) {
                Some(value) if (min..=max).contains(&value) => {}
                _ => return false,
            },
        }
    }
    cursor.offset()
}

struct DateCursor<'b> {
    bytes: &'b [u8],
    pos: usize,
}

impl<'b> DateCursor<'b> {
    fn new(bytes: &'b [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn skip(&mut self, byte: u8) {
        if self.peek() == Some(byte) {
            self.pos += 1;
        }
    }

    /// Consume exactly `width` ASCII digits.
    fn number(&mut self, width: usize) -> Option<u32> {
        let digits = self.bytes.get(self.pos..self.pos + width)?;
        if !digits.iter().all(u8::is_ascii_digit) {
            return None;
        }
        self.pos += width;
        Some(
            digits
                .iter()
                .fold(0, |acc, d| acc * 10 + u32::from(d - b'0')),
        )
    }

    /// The UTC relationship and offset, then end of input.
    fn offset(&mut self) -> bool {
        match self.peek() {
            None => return true,
            Some(b'+' | b'-' | b'Z') => self.pos += 1,
            Some(_) => return false,
        }
        if self.at_end() {
            return true;
        }
        if !matches!(self.number(2), Some(hours) if hours <= 23) {
            return false;
        }
        self.skip(b'\'');
        if self.at_end() {
            return true;
        }
        if !matches!(self.number(2), Some(minutes) if minutes <= 59) {
            return false;
        }
        self.skip(b'\'');
        self.at_end()
    }
}
