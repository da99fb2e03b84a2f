//! Text cursor.
//!
//! The cursor only tracks where the next glyph goes; the driver turns the
//! returned [`Step`]s into bus traffic.

use crate::options::Scale;
use crate::{HEIGHT, PAGES, WIDTH};

/// Tab stops are this many glyph advances apart.
const TAB_WIDTH: u16 = 4;

/// Control codes understood by the text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Control {
    Backspace,
    Tab,
    LineFeed,
    CarriageReturn,
}

impl Control {
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x08 => Some(Control::Backspace),
            b'\t' => Some(Control::Tab),
            b'\n' => Some(Control::LineFeed),
            b'\r' => Some(Control::CarriageReturn),
            _ => None,
        }
    }
}

/// Horizontal and vertical spacing of glyphs at the current scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pitch {
    pub glyph_width: u8,
    pub scale: Scale,
}

impl Pitch {
    /// Columns taken by one glyph including its spacer columns.
    pub fn advance(&self) -> u16 {
        let scale = u16::from(self.scale.factor());
        u16::from(self.glyph_width) * scale + scale
    }

    /// Pages taken by one line of text.
    pub fn line_height(&self) -> u8 {
        self.scale.factor()
    }
}

/// What the driver has to do after a cursor transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Step {
    /// Point the controller's RAM address at the cursor.
    Reposition,
    /// Clear the display; the cursor is already back at the origin.
    Clear,
}

/// Column and page of the next glyph.
///
/// The column may run past the right edge after a tab or an advance, the
/// next printable glyph wraps it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    column: u16,
    row: u8,
}

impl Cursor {
    pub const fn new(column: u16, row: u8) -> Self {
        Self { column, row }
    }

    pub const fn column(&self) -> u16 {
        self.column
    }

    /// Page index of the top of the current line.
    pub const fn row(&self) -> u8 {
        self.row
    }

    pub fn home(&mut self) {
        *self = Self::default();
    }

    /// RAM address of the cursor, if it lies on the display.
    pub fn address(&self) -> Option<(u8, u8)> {
        let column = u8::try_from(self.column).ok().filter(|&c| c < WIDTH)?;
        (self.row < PAGES).then_some((column, self.row))
    }

    /// Applies a control code.
    pub fn control(&mut self, control: Control, pitch: Pitch) -> Step {
        match control {
            Control::CarriageReturn => {
                self.column = 0;
                Step::Reposition
            }
            Control::LineFeed => self.line_feed(pitch),
            Control::Tab => {
                self.column = self.column.saturating_add(TAB_WIDTH * pitch.advance());
                Step::Reposition
            }
            Control::Backspace => {
                self.column = self.column.saturating_sub(pitch.advance());
                Step::Reposition
            }
        }
    }

    /// Wraps to the next line when the cursor is past the right edge.
    pub fn wrap(&mut self, pitch: Pitch) -> Option<Step> {
        if self.column < u16::from(WIDTH) {
            return None;
        }
        self.column = 0;
        Some(self.line_feed(pitch))
    }

    /// Moves past a glyph that was just drawn.
    pub fn advance(&mut self, pitch: Pitch) {
        self.column = self.column.saturating_add(pitch.advance());
    }

    // The display does not scroll; running off the bottom starts over on a
    // blank screen.
    fn line_feed(&mut self, pitch: Pitch) -> Step {
        self.row = self.row.saturating_add(pitch.line_height());
        if u16::from(self.row) * 8 >= u16::from(HEIGHT) {
            self.home();
            Step::Clear
        } else {
            Step::Reposition
        }
    }
}
