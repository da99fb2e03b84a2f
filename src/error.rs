use crate::font::FontError;

/// Error returned by [`Display`](crate::Display) and
/// [`Builder::init`](crate::Builder::init).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<DiError, PinError = core::convert::Infallible> {
    /// Error caused by the display interface.
    Interface(DiError),
    /// Error caused by the reset pin.
    ResetPin(PinError),
    /// The character has no glyph in the current font.
    ///
    /// Only returned when strict glyph checking is enabled; otherwise such
    /// characters are skipped.
    GlyphOutOfRange(u8),
    /// The font table is malformed.
    Font(FontError),
}

impl<DiError, PinError> From<FontError> for Error<DiError, PinError> {
    fn from(value: FontError) -> Self {
        Self::Font(value)
    }
}
