//! Input character encodings and encoding detection.

use crate::error::ErrorKind;

/// The character encoding of a parse buffer.
///
/// Byte order is expressed relative to the host: `Utf16`/`Utf32` are
/// native-order, the `Swapped` variants are the opposite order. Pass the
/// encoding to [`crate::Document::parse`] when it is known; pass `None` to
/// have it detected from the first bytes of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Utf8,
    /// UTF-16 in native byte order.
    Utf16,
    /// UTF-16 in reversed byte order.
    Utf16Swapped,
    /// UTF-32 in native byte order.
    Utf32,
    /// UTF-32 in reversed byte order.
    Utf32Swapped,
}

impl Encoding {
    /// Size of one code unit in bytes: `{1, 2, 2, 4, 4}`.
    #[must_use]
    pub fn code_unit_size(self) -> usize {
        match self {
            Encoding::Utf8 => 1,
            Encoding::Utf16 | Encoding::Utf16Swapped => 2,
            Encoding::Utf32 | Encoding::Utf32Swapped => 4,
        }
    }

    /// Whether code units must be byte-swapped when read.
    #[must_use]
    pub fn is_swapped(self) -> bool {
        matches!(self, Encoding::Utf16Swapped | Encoding::Utf32Swapped)
    }

    /// Infers the encoding from the front of `data`.
    ///
    /// JSON text must start with `{` or `[`, optionally preceded by
    /// whitespace, so the first one or two code units are never zero in the
    /// upper byte *and* lower byte at once; that is enough to separate the
    /// five encodings without BOM handling:
    ///
    /// 1. A byte count indivisible into 16-bit units is UTF-8.
    /// 2. Two leading non-zero bytes mean UTF-8.
    /// 3. Two leading non-zero 16-bit units mean UTF-16; the unit value
    ///    tells the byte order.
    /// 4. A zero leading 32-bit unit is undecidable.
    /// 5. Anything else is UTF-32, byte order from the unit value.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidEncoding`] when no rule applies.
    pub fn detect(data: &[u8]) -> Result<Encoding, ErrorKind> {
        let rem = data.len() % 4;
        if rem != 0 && rem != 2 {
            return Ok(Encoding::Utf8);
        }
        if data.len() >= 2 && data[0] != 0 && data[1] != 0 {
            return Ok(Encoding::Utf8);
        }
        if data.len() >= 2 {
            let unit0 = u16::from_ne_bytes([data[0], data[1]]);
            // A two-byte buffer holds exactly one 16-bit unit.
            let unit1 = if data.len() >= 4 {
                u16::from_ne_bytes([data[2], data[3]])
            } else {
                unit0
            };
            if unit0 != 0 && unit1 != 0 {
                return Ok(if unit0 < 256 {
                    Encoding::Utf16
                } else {
                    Encoding::Utf16Swapped
                });
            }
        }
        if data.len() < 4 {
            return Err(ErrorKind::InvalidEncoding);
        }
        let unit0 = u32::from_ne_bytes([data[0], data[1], data[2], data[3]]);
        if unit0 == 0 {
            return Err(ErrorKind::InvalidEncoding);
        }
        Ok(if unit0 < 256 {
            Encoding::Utf32
        } else {
            Encoding::Utf32Swapped
        })
    }
}
