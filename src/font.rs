//! Fixed-pitch font tables.
//!
//! A table is a flat byte slice: `[width, height, first, last, glyphs...]`,
//! where each glyph is `width` column bytes (bit 0 is the top pixel).

/// Offset of the first glyph byte.
const HEADER_LEN: usize = 4;

/// Reasons a byte slice is not a usable font table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontError {
    /// Shorter than the 4 byte header.
    TooShort,
    /// Glyph width is zero.
    ZeroWidth,
    /// First code point is after the last one.
    InvalidRange,
    /// Fewer glyph bytes than the header announces.
    Truncated,
}

/// A validated font table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    data: &'static [u8],
}

impl Font {
    /// Validates `data` as a font table.
    pub const fn new(data: &'static [u8]) -> Result<Self, FontError> {
        if data.len() < HEADER_LEN {
            return Err(FontError::TooShort);
        }
        let width = data[0] as usize;
        let (first, last) = (data[2], data[3]);
        if width == 0 {
            return Err(FontError::ZeroWidth);
        }
        if first > last {
            return Err(FontError::InvalidRange);
        }
        let glyphs = (last - first) as usize + 1;
        if data.len() < HEADER_LEN + glyphs * width {
            return Err(FontError::Truncated);
        }
        Ok(Self { data })
    }

    /// Glyph width in columns.
    pub const fn width(&self) -> u8 {
        self.data[0]
    }

    /// Glyph height in pixels.
    pub const fn height(&self) -> u8 {
        self.data[1]
    }

    pub const fn first_code(&self) -> u8 {
        self.data[2]
    }

    pub const fn last_code(&self) -> u8 {
        self.data[3]
    }

    pub const fn contains(&self, code: u8) -> bool {
        code >= self.first_code() && code <= self.last_code()
    }

    /// Column bytes of `code`, or `None` if the table has no such glyph.
    pub fn glyph(&self, code: u8) -> Option<&'static [u8]> {
        if !self.contains(code) {
            return None;
        }
        let data: &'static [u8] = self.data;
        let width = usize::from(self.width());
        let start = usize::from(code - self.first_code()) * width + HEADER_LEN;
        data.get(start..start + width)
    }
}

/// Classic 5x7 ASCII font covering `0x20..=0x7E`.
pub const FONT_5X7: Font = match Font::new(&FONT_5X7_DATA) {
    Ok(font) => font,
    Err(_) => panic!("malformed built-in font"),
};

#[rustfmt::skip]
const FONT_5X7_DATA: [u8; HEADER_LEN + 95 * 5] = [
    0x05, 0x08, 0x20, 0x7E,
    0x00, 0x00, 0x00, 0x00, 0x00, // 0x20 space
    0x00, 0x00, 0x5F, 0x00, 0x00, // 0x21 !
    0x00, 0x07, 0x00, 0x07, 0x00, // 0x22 "
    0x14, 0x7F, 0x14, 0x7F, 0x14, // 0x23 #
    0x24, 0x2A, 0x7F, 0x2A, 0x12, // 0x24 $
    0x23, 0x13, 0x08, 0x64, 0x62, // 0x25 %
    0x36, 0x49, 0x55, 0x22, 0x50, // 0x26 &
    0x00, 0x05, 0x03, 0x00, 0x00, // 0x27 '
    0x00, 0x1C, 0x22, 0x41, 0x00, // 0x28 (
    0x00, 0x41, 0x22, 0x1C, 0x00, // 0x29 )
    0x14, 0x08, 0x3E, 0x08, 0x14, // 0x2A *
    0x08, 0x08, 0x3E, 0x08, 0x08, // 0x2B +
    0x00, 0x50, 0x30, 0x00, 0x00, // 0x2C ,
    0x08, 0x08, 0x08, 0x08, 0x08, // 0x2D -
    0x00, 0x60, 0x60, 0x00, 0x00, // 0x2E .
    0x20, 0x10, 0x08, 0x04, 0x02, // 0x2F /
    0x3E, 0x51, 0x49, 0x45, 0x3E, // 0x30 0
    0x00, 0x42, 0x7F, 0x40, 0x00, // 0x31 1
    0x42, 0x61, 0x51, 0x49, 0x46, // 0x32 2
    0x21, 0x41, 0x45, 0x4B, 0x31, // 0x33 3
    0x18, 0x14, 0x12, 0x7F, 0x10, // 0x34 4
    0x27, 0x45, 0x45, 0x45, 0x39, // 0x35 5
    0x3C, 0x4A, 0x49, 0x49, 0x30, // 0x36 6
    0x01, 0x71, 0x09, 0x05, 0x03, // 0x37 7
    0x36, 0x49, 0x49, 0x49, 0x36, // 0x38 8
    0x06, 0x49, 0x49, 0x29, 0x1E, // 0x39 9
    0x00, 0x36, 0x36, 0x00, 0x00, // 0x3A :
    0x00, 0x56, 0x36, 0x00, 0x00, // 0x3B ;
    0x08, 0x14, 0x22, 0x41, 0x00, // 0x3C <
    0x14, 0x14, 0x14, 0x14, 0x14, // 0x3D =
    0x00, 0x41, 0x22, 0x14, 0x08, // 0x3E >
    0x02, 0x01, 0x51, 0x09, 0x06, // 0x3F ?
    0x32, 0x49, 0x79, 0x41, 0x3E, // 0x40 @
    0x7E, 0x11, 0x11, 0x11, 0x7E, // 0x41 A
    0x7F, 0x49, 0x49, 0x49, 0x36, // 0x42 B
    0x3E, 0x41, 0x41, 0x41, 0x22, // 0x43 C
    0x7F, 0x41, 0x41, 0x22, 0x1C, // 0x44 D
    0x7F, 0x49, 0x49, 0x49, 0x41, // 0x45 E
    0x7F, 0x09, 0x09, 0x09, 0x01, // 0x46 F
    0x3E, 0x41, 0x49, 0x49, 0x7A, // 0x47 G
    0x7F, 0x08, 0x08, 0x08, 0x7F, // 0x48 H
    0x00, 0x41, 0x7F, 0x41, 0x00, // 0x49 I
    0x20, 0x40, 0x41, 0x3F, 0x01, // 0x4A J
    0x7F, 0x08, 0x14, 0x22, 0x41, // 0x4B K
    0x7F, 0x40, 0x40, 0x40, 0x40, // 0x4C L
    0x7F, 0x02, 0x0C, 0x02, 0x7F, // 0x4D M
    0x7F, 0x04, 0x08, 0x10, 0x7F, // 0x4E N
    0x3E, 0x41, 0x41, 0x41, 0x3E, // 0x4F O
    0x7F, 0x09, 0x09, 0x09, 0x06, // 0x50 P
    0x3E, 0x41, 0x51, 0x21, 0x5E, // 0x51 Q
    0x7F, 0x09, 0x19, 0x29, 0x46, // 0x52 R
    0x46, 0x49, 0x49, 0x49, 0x31, // 0x53 S
    0x01, 0x01, 0x7F, 0x01, 0x01, // 0x54 T
    0x3F, 0x40, 0x40, 0x40, 0x3F, // 0x55 U
    0x1F, 0x20, 0x40, 0x20, 0x1F, // 0x56 V
    0x3F, 0x40, 0x38, 0x40, 0x3F, // 0x57 W
    0x63, 0x14, 0x08, 0x14, 0x63, // 0x58 X
    0x07, 0x08, 0x70, 0x08, 0x07, // 0x59 Y
    0x61, 0x51, 0x49, 0x45, 0x43, // 0x5A Z
    0x00, 0x7F, 0x41, 0x41, 0x00, // 0x5B [
    0x02, 0x04, 0x08, 0x10, 0x20, // 0x5C \
    0x00, 0x41, 0x41, 0x7F, 0x00, // 0x5D ]
    0x04, 0x02, 0x01, 0x02, 0x04, // 0x5E ^
    0x40, 0x40, 0x40, 0x40, 0x40, // 0x5F _
    0x00, 0x01, 0x02, 0x04, 0x00, // 0x60 `
    0x20, 0x54, 0x54, 0x54, 0x78, // 0x61 a
    0x7F, 0x48, 0x44, 0x44, 0x38, // 0x62 b
    0x38, 0x44, 0x44, 0x44, 0x20, // 0x63 c
    0x38, 0x44, 0x44, 0x48, 0x7F, // 0x64 d
    0x38, 0x54, 0x54, 0x54, 0x18, // 0x65 e
    0x08, 0x7E, 0x09, 0x01, 0x02, // 0x66 f
    0x0C, 0x52, 0x52, 0x52, 0x3E, // 0x67 g
    0x7F, 0x08, 0x04, 0x04, 0x78, // 0x68 h
    0x00, 0x44, 0x7D, 0x40, 0x00, // 0x69 i
    0x20, 0x40, 0x44, 0x3D, 0x00, // 0x6A j
    0x7F, 0x10, 0x28, 0x44, 0x00, // 0x6B k
    0x00, 0x41, 0x7F, 0x40, 0x00, // 0x6C l
    0x7C, 0x04, 0x18, 0x04, 0x78, // 0x6D m
    0x7C, 0x08, 0x04, 0x04, 0x78, // 0x6E n
    0x38, 0x44, 0x44, 0x44, 0x38, // 0x6F o
    0x7C, 0x14, 0x14, 0x14, 0x08, // 0x70 p
    0x08, 0x14, 0x14, 0x18, 0x7C, // 0x71 q
    0x7C, 0x08, 0x04, 0x04, 0x08, // 0x72 r
    0x48, 0x54, 0x54, 0x54, 0x20, // 0x73 s
    0x04, 0x3F, 0x44, 0x40, 0x20, // 0x74 t
    0x3C, 0x40, 0x40, 0x20, 0x7C, // 0x75 u
    0x1C, 0x20, 0x40, 0x20, 0x1C, // 0x76 v
    0x3C, 0x40, 0x30, 0x40, 0x3C, // 0x77 w
    0x44, 0x28, 0x10, 0x28, 0x44, // 0x78 x
    0x0C, 0x50, 0x50, 0x50, 0x3C, // 0x79 y
    0x44, 0x64, 0x54, 0x4C, 0x44, // 0x7A z
    0x00, 0x08, 0x36, 0x41, 0x00, // 0x7B {
    0x00, 0x00, 0x7F, 0x00, 0x00, // 0x7C |
    0x00, 0x41, 0x36, 0x08, 0x00, // 0x7D }
    0x10, 0x08, 0x08, 0x10, 0x08, // 0x7E ~
];

#[cfg(test)]
mod tests {
    use super::*;

    static TINY: [u8; 10] = [3, 8, b'A', b'B', 1, 2, 3, 4, 5, 6];

    #[test]
    fn header_is_validated() {
        static SHORT: [u8; 3] = [5, 8, 0x20];
        static ZERO: [u8; 4] = [0, 8, 0x20, 0x20];
        static BACKWARDS: [u8; 9] = [5, 8, 0x21, 0x20, 0, 0, 0, 0, 0];
        static TRUNCATED: [u8; 8] = [5, 8, 0x20, 0x20, 0, 0, 0, 0];

        assert_eq!(Font::new(&SHORT), Err(FontError::TooShort));
        assert_eq!(Font::new(&ZERO), Err(FontError::ZeroWidth));
        assert_eq!(Font::new(&BACKWARDS), Err(FontError::InvalidRange));
        assert_eq!(Font::new(&TRUNCATED), Err(FontError::Truncated));
        assert!(Font::new(&TINY).is_ok());
    }

    #[test]
    fn glyph_offsets() {
        let font = Font::new(&TINY).unwrap();
        assert_eq!(font.glyph(b'A'), Some(&[1, 2, 3][..]));
        assert_eq!(font.glyph(b'B'), Some(&[4, 5, 6][..]));
        assert_eq!(font.glyph(b'@'), None);
        assert_eq!(font.glyph(b'C'), None);
    }

    #[test]
    fn builtin_font_covers_printable_ascii() {
        assert_eq!(FONT_5X7.width(), 5);
        assert_eq!(FONT_5X7.height(), 8);
        assert_eq!(FONT_5X7.first_code(), b' ');
        assert_eq!(FONT_5X7.last_code(), b'~');
        assert_eq!(FONT_5X7.glyph(b' '), Some(&[0u8; 5][..]));
        assert_eq!(FONT_5X7.glyph(b'A'), Some(&[0x7E, 0x11, 0x11, 0x11, 0x7E][..]));
        assert_eq!(FONT_5X7.glyph(0x7F), None);
    }
}
