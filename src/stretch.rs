//! Double size glyph rendering.
//!
//! A glyph column of 8 pixels is stretched to 16 pixels and written twice,
//! so a 5 column glyph becomes a 12 x 16 bitmap including one blank padding
//! column on each side. [`StretchBuffer::smooth`] then fills the notches the
//! doubling leaves on diagonal strokes.

/// Columns in a stretched glyph, padding included.
pub const COLUMNS: usize = 12;

/// Source glyph columns that fit in a [`StretchBuffer`].
pub const MAX_SOURCE_COLUMNS: usize = (COLUMNS - 2) / 2;

/// 4 bit windows tested per column pair.
const WINDOWS: u32 = 6;

const UPPER_PAIR: u16 = 0b1100;
const LOWER_PAIR: u16 = 0b0011;
const WINDOW_MASK: u16 = 0b1111;

/// Stretches `abcdefgh` into `aabbccddeeffgghh`.
pub const fn stretch(x: u8) -> u16 {
    let mut d = x as u16; // 00000000 abcdefgh
    d = (d & 0xF0) << 4 | (d & 0x0F); // 0000abcd 0000efgh
    d = (d << 2 | d) & 0x3333; // 00ab00cd 00ef00gh
    d = (d << 1 | d) & 0x5555; // 0a0b0c0d 0e0f0g0h
    d | d << 1
}

/// 12 x 16 pixel glyph bitmap.
///
/// Byte `c` holds pixels 0-7 of column `c` (the upper page) and byte
/// `c + 12` holds pixels 8-15 (the page below).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StretchBuffer([u8; 2 * COLUMNS]);

impl StretchBuffer {
    /// Stretches the glyph `columns`. Columns past [`MAX_SOURCE_COLUMNS`]
    /// are dropped.
    pub fn from_glyph(columns: &[u8]) -> Self {
        let mut buffer = Self::default();
        for (x, &column) in columns.iter().take(MAX_SOURCE_COLUMNS).enumerate() {
            let stretched = stretch(column);
            buffer.set_column(2 * x + 1, stretched);
            buffer.set_column(2 * x + 2, stretched);
        }
        buffer
    }

    pub const fn from_bytes(bytes: [u8; 2 * COLUMNS]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 2 * COLUMNS] {
        &self.0
    }

    /// Bytes for the upper page.
    pub fn top(&self) -> &[u8] {
        &self.0[..COLUMNS]
    }

    /// Bytes for the lower page.
    pub fn bottom(&self) -> &[u8] {
        &self.0[COLUMNS..]
    }

    /// 16 pixel value of column `c`, bit 0 at the top.
    pub fn column(&self, c: usize) -> u16 {
        u16::from(self.0[c + COLUMNS]) << 8 | u16::from(self.0[c])
    }

    fn set_column(&mut self, c: usize, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.0[c] = low;
        self.0[c + COLUMNS] = high;
    }

    fn add_pixels(&mut self, c: usize, bits: u16) {
        let value = self.column(c) | bits;
        self.set_column(c, value);
    }

    /// Adds one pixel on each side of every stair step between neighbouring
    /// columns.
    ///
    /// Matching is done against the bitmap as it was on entry, and pixels
    /// are only ever added.
    pub fn smooth(&mut self) {
        let snapshot = *self;
        for left in 1..COLUMNS - 1 {
            let right = left + 1;
            let (l, r) = (snapshot.column(left), snapshot.column(right));
            for window in 0..WINDOWS {
                let shift = 2 * window;
                let lw = (l >> shift) & WINDOW_MASK;
                let rw = (r >> shift) & WINDOW_MASK;
                if lw == UPPER_PAIR && rw == LOWER_PAIR {
                    self.add_pixels(left, 0b0010 << shift);
                    self.add_pixels(right, 0b0100 << shift);
                } else if lw == LOWER_PAIR && rw == UPPER_PAIR {
                    self.add_pixels(left, 0b0100 << shift);
                    self.add_pixels(right, 0b0010 << shift);
                }
            }
        }
    }
}
