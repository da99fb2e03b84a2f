#![cfg_attr(not(test), no_std)]

//! This crate provides a blocking, text oriented driver for LCD panels driven
//! by the UltraChip UC1609 controller (192 x 64 pixels, monochrome).
//!
//! The driver writes straight through to the controller's display RAM; there
//! is no framebuffer. Text is rendered from fixed pitch font tables at normal
//! or double size, where double size glyphs are stretched and optionally
//! smoothed before they are sent.
//!
//! ## Example
//!
//! ```rust,ignore
//! use uc1609::{interface::SpiInterface, Builder};
//!
//! let di = SpiInterface::new(spi_bus, cd_pin, cs_pin);
//! let mut display = Builder::new(di).reset_pin(rst).init(&mut delay)?;
//!
//! display.write_text_at("Temp: 21C", 0, 0)?;
//! display.set_scale(2);
//! display.write_text_at("READY", 0, 4)?;
//! ```

use embedded_graphics_core::geometry::{OriginDimensions, Point, Size};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, warn};

pub mod interface;

pub mod options;
use crate::options::{ColorInversion, ModelOptions, Orientation, Scale};

mod builder;
pub use builder::*;

mod error;
pub use error::Error;

mod batch;
pub mod command;
pub mod cursor;
pub mod font;
pub mod stretch;

use command::{Command, InterfaceExt};
use cursor::{Control, Cursor, Pitch, Step};
use font::Font;
use stretch::StretchBuffer;

#[cfg(test)]
mod _mock;

/// Display width in pixels.
pub const WIDTH: u8 = 192;

/// Display height in pixels.
pub const HEIGHT: u8 = 64;

/// Number of 8 pixel pages.
pub const PAGES: u8 = HEIGHT / 8;

/// Minimum active low time of the reset pulse in µs.
pub const RESET_DURATION_US: u32 = 3;

/// Time the controller needs after a reset, in ms.
pub const RESET_SETTLE_MS: u32 = 5;

/// Display driver structure.
pub struct Display<DI, RST>
where
    DI: interface::Interface,
    RST: OutputPin,
{
    /// The display interface.
    di: DI,
    /// The reset pin.
    rst: Option<RST>,
    /// Display options.
    options: ModelOptions,
    /// Where the next glyph goes.
    cursor: Cursor,
    /// Whether the controller's RAM address is known to equal the cursor.
    address_synced: bool,
}

type DisplayError<DI, RST> =
    Error<<DI as interface::Interface>::Error, <RST as embedded_hal::digital::ErrorType>::Error>;

impl<DI, RST> Display<DI, RST>
where
    DI: interface::Interface,
    RST: OutputPin,
{
    /// Returns the current display options.
    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    /// Returns the text cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Returns the current display orientation.
    pub fn orientation(&self) -> Orientation {
        self.options.orientation
    }

    pub fn scale(&self) -> Scale {
        self.options.scale
    }

    /// Pulses the reset line: low for at least 3 µs, then waits 5 ms for the
    /// controller to come up.
    ///
    /// Does nothing if no reset pin was configured.
    pub fn hard_reset(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError<DI, RST>> {
        if let Some(ref mut rst) = self.rst {
            debug!("hard reset");
            rst.set_low().map_err(Error::ResetPin)?;
            delay.delay_us(RESET_DURATION_US);
            rst.set_high().map_err(Error::ResetPin)?;
            delay.delay_ms(RESET_SETTLE_MS);
            self.address_synced = false;
        }
        Ok(())
    }

    /// Blanks the whole display RAM and moves the cursor to the origin.
    pub fn clear(&mut self) -> Result<(), DisplayError<DI, RST>> {
        debug!("clear");
        self.address_synced = false;
        self.di
            .transaction(|di| {
                for page in 0..PAGES {
                    di.frame_cursor(0, page)?;
                    batch::write_repeated(di, 0x00, usize::from(WIDTH))?;
                }
                di.frame_cursor(0, 0)
            })
            .map_err(Error::Interface)?;
        self.cursor.home();
        self.address_synced = true;
        Ok(())
    }

    /// Moves the text cursor to `column` and page `row`.
    ///
    /// Positions outside the display are kept; nothing is drawn there.
    pub fn set_cursor(&mut self, column: u8, row: u8) -> Result<(), DisplayError<DI, RST>> {
        self.cursor = Cursor::new(u16::from(column), row);
        self.reposition()
    }

    /// Fills page `row` with `pattern` across the whole width.
    ///
    /// Bit 0 of the pattern is the top pixel of the page. Rows outside the
    /// display are ignored. The text cursor does not move.
    pub fn draw_line(&mut self, row: u8, pattern: u8) -> Result<(), DisplayError<DI, RST>> {
        if row >= PAGES {
            return Ok(());
        }
        self.address_synced = false;
        self.di
            .transaction(|di| {
                di.frame_cursor(0, row)?;
                batch::write_repeated(di, pattern, usize::from(WIDTH))
            })
            .map_err(Error::Interface)
    }

    /// Blanks page `row`.
    pub fn clear_line(&mut self, row: u8) -> Result<(), DisplayError<DI, RST>> {
        self.draw_line(row, 0x00)
    }

    /// Scrolls the picture up by `lines` pixels, modulo the display height.
    pub fn scroll(&mut self, lines: u8) -> Result<(), DisplayError<DI, RST>> {
        self.command(Command::ScrollLine(lines % HEIGHT))
    }

    /// Sets the display orientation.
    pub fn rotate(&mut self, orientation: Orientation) -> Result<(), DisplayError<DI, RST>> {
        self.command(Command::Mapping(orientation))?;
        self.options.orientation = orientation;
        Ok(())
    }

    /// Inverts every pixel on output, or stops doing so.
    ///
    /// Accepts a [`ColorInversion`] or a `bool`, `true` meaning inverted.
    pub fn invert(
        &mut self,
        inversion: impl Into<ColorInversion>,
    ) -> Result<(), DisplayError<DI, RST>> {
        let inversion = inversion.into();
        self.command(Command::Inversion(inversion))?;
        self.options.invert_colors = inversion;
        Ok(())
    }

    /// Sets the Vbias potentiometer (contrast).
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError<DI, RST>> {
        self.command(Command::VbiasPotentiometer(contrast))?;
        self.options.contrast = contrast;
        Ok(())
    }

    /// Turns on every pixel regardless of RAM contents, or returns to normal
    /// output.
    pub fn all_pixels_on(&mut self, on: bool) -> Result<(), DisplayError<DI, RST>> {
        self.command(Command::AllPixelsOn(on))
    }

    /// Switches the panel drivers on or off (sleep). RAM is retained.
    pub fn set_display_enabled(&mut self, enabled: bool) -> Result<(), DisplayError<DI, RST>> {
        self.command(Command::DisplayEnable(enabled))
    }

    pub fn set_font(&mut self, font: Font) {
        self.options.font = font;
    }

    /// Validates `table` and makes it the current font.
    pub fn load_font(&mut self, table: &'static [u8]) -> Result<(), DisplayError<DI, RST>> {
        self.options.font = Font::new(table)?;
        Ok(())
    }

    /// Sets the text scale factor. Anything but 1 or 2 is ignored.
    pub fn set_scale(&mut self, factor: u8) {
        match Scale::try_from(factor) {
            Ok(scale) => self.options.scale = scale,
            Err(invalid) => warn!("ignoring unsupported text scale {}", invalid),
        }
    }

    /// Enables smoothing of double size glyphs.
    pub fn set_anti_aliasing(&mut self, enabled: bool) {
        self.options.anti_aliasing = enabled;
    }

    /// See [`Builder::strict_glyphs`].
    pub fn set_strict_glyphs(&mut self, strict: bool) {
        self.options.strict_glyphs = strict;
    }

    /// Writes one character at the cursor.
    ///
    /// Carriage return, line feed, tab and backspace move the cursor; other
    /// codes are drawn with [`write_glyph_at_cursor`](Self::write_glyph_at_cursor).
    pub fn write_char(&mut self, c: u8) -> Result<(), DisplayError<DI, RST>> {
        match Control::from_code(c) {
            Some(control) => {
                let pitch = self.pitch();
                let step = self.cursor.control(control, pitch);
                self.apply(step)
            }
            None => self.write_glyph_at_cursor(c),
        }
    }

    /// Draws the glyph for `code` at the cursor and advances it, wrapping to
    /// the next line first if the cursor is past the right edge.
    ///
    /// Codes missing from the font are skipped unless strict glyph checking
    /// is enabled.
    pub fn write_glyph_at_cursor(&mut self, code: u8) -> Result<(), DisplayError<DI, RST>> {
        let Some(glyph) = self.options.font.glyph(code) else {
            if self.options.strict_glyphs {
                return Err(Error::GlyphOutOfRange(code));
            }
            return Ok(());
        };

        let pitch = self.pitch();
        if let Some(step) = self.cursor.wrap(pitch) {
            match step {
                Step::Clear => self.clear()?,
                Step::Reposition => self.address_synced = false,
            }
        }

        match self.options.scale {
            Scale::Normal => self.render_normal(glyph)?,
            Scale::Double => self.render_double(glyph, pitch)?,
        }
        self.cursor.advance(pitch);
        Ok(())
    }

    /// Moves the cursor to `column`, `row` and draws the glyph for `code`.
    pub fn write_glyph_at(
        &mut self,
        code: u8,
        column: u8,
        row: u8,
    ) -> Result<(), DisplayError<DI, RST>> {
        self.set_cursor(column, row)?;
        self.write_glyph_at_cursor(code)
    }

    /// Writes `text` byte by byte at the cursor, see [`write_char`](Self::write_char).
    pub fn write_text(&mut self, text: &str) -> Result<(), DisplayError<DI, RST>> {
        text.bytes().try_for_each(|c| self.write_char(c))
    }

    /// Moves the cursor to `column`, `row` and writes `text`.
    pub fn write_text_at(
        &mut self,
        text: &str,
        column: u8,
        row: u8,
    ) -> Result<(), DisplayError<DI, RST>> {
        self.set_cursor(column, row)?;
        self.write_text(text)
    }

    /// Draws a page ordered monochrome image with its top left corner at
    /// `top_left`.
    ///
    /// `data` holds `size.width` column bytes for each band of 8 rows, top
    /// band first. `top_left.y` is rounded down to a page boundary. Parts
    /// outside the display are clipped, and drawing stops early if `data` is
    /// too short.
    pub fn draw_image(
        &mut self,
        top_left: Point,
        size: Size,
        data: &[u8],
    ) -> Result<(), DisplayError<DI, RST>> {
        let width = size.width as usize;
        let bands = size.height.div_ceil(8) as usize;

        // visible part of every band, in image columns
        let x = i64::from(top_left.x);
        let first = (-x).clamp(0, width as i64) as usize;
        let last = (i64::from(WIDTH) - x).clamp(0, width as i64) as usize;
        if first >= last || bands == 0 {
            return Ok(());
        }
        let column = (x + first as i64) as u8;
        let first_page = i64::from(top_left.y.div_euclid(8));

        // bands above the display are skipped, drawing stops below it
        let skipped = usize::try_from(-first_page).unwrap_or(0);

        self.address_synced = false;
        self.di
            .transaction(|di| {
                for band in skipped..bands {
                    let page = first_page + band as i64;
                    if page >= i64::from(PAGES) {
                        break;
                    }
                    let row = band
                        .checked_mul(width)
                        .and_then(|start| Some(start..start.checked_add(width)?))
                        .and_then(|range| data.get(range));
                    let Some(row) = row else {
                        break;
                    };
                    di.frame_cursor(column, page as u8)?;
                    di.write_bytes(&row[first..last])?;
                }
                Ok(())
            })
            .map_err(Error::Interface)
    }

    /// Resets the controller and blanks the panel.
    pub fn power_down(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError<DI, RST>> {
        debug!("power down");
        self.hard_reset(delay)?;
        self.all_pixels_on(false)
    }

    /// Releases the display interface and reset pin.
    pub fn release(self) -> (DI, Option<RST>) {
        (self.di, self.rst)
    }

    /// Returns a mutable reference to the underlying display interface for
    /// sending raw commands.
    ///
    /// # Safety
    ///
    /// Changing the RAM address or controller settings this way is not
    /// tracked by the driver; the caller is responsible for restoring them.
    pub unsafe fn raw_interface_mut(&mut self) -> &mut DI {
        &mut self.di
    }

    fn pitch(&self) -> Pitch {
        Pitch {
            glyph_width: self.options.font.width(),
            scale: self.options.scale,
        }
    }

    fn command(&mut self, command: Command) -> Result<(), DisplayError<DI, RST>> {
        self.di.write_command(command).map_err(Error::Interface)
    }

    fn apply(&mut self, step: Step) -> Result<(), DisplayError<DI, RST>> {
        match step {
            Step::Reposition => self.reposition(),
            Step::Clear => self.clear(),
        }
    }

    /// Points the controller's RAM address at the cursor, if it is on the
    /// display.
    fn reposition(&mut self) -> Result<(), DisplayError<DI, RST>> {
        let Some((column, page)) = self.cursor.address() else {
            self.address_synced = false;
            return Ok(());
        };
        self.address_synced = false;
        self.di
            .transaction(|di| di.frame_cursor(column, page))
            .map_err(Error::Interface)?;
        self.address_synced = true;
        Ok(())
    }

    /// Padding column followed by the glyph columns, clipped at the right
    /// edge.
    fn render_normal(&mut self, glyph: &[u8]) -> Result<(), DisplayError<DI, RST>> {
        let Some((column, page)) = self.cursor.address() else {
            return Ok(());
        };
        let room = usize::from(WIDTH - column);
        let visible = glyph.len().min(room - 1);
        let reposition = !self.address_synced;
        self.address_synced = false;

        self.di
            .transaction(|di| {
                if reposition {
                    di.frame_cursor(column, page)?;
                }
                di.write_byte(0x00)?;
                di.write_bytes(&glyph[..visible])
            })
            .map_err(Error::Interface)?;
        self.address_synced = glyph.len() + 1 < room;
        Ok(())
    }

    /// Upper half on the cursor's page, lower half on the page below.
    fn render_double(&mut self, glyph: &[u8], pitch: Pitch) -> Result<(), DisplayError<DI, RST>> {
        let Some((column, page)) = self.cursor.address() else {
            return Ok(());
        };
        let mut buffer = StretchBuffer::from_glyph(glyph);
        if self.options.anti_aliasing {
            buffer.smooth();
        }
        let n = usize::from(pitch.advance())
            .min(stretch::COLUMNS)
            .min(usize::from(WIDTH - column));
        let lower = page + 1;
        self.address_synced = false;

        self.di
            .transaction(|di| {
                di.frame_cursor(column, page)?;
                di.write_bytes(&buffer.top()[..n])?;
                if lower < PAGES {
                    di.frame_cursor(column, lower)?;
                    di.write_bytes(&buffer.bottom()[..n])?;
                }
                Ok(())
            })
            .map_err(Error::Interface)
    }
}

impl<DI, RST> OriginDimensions for Display<DI, RST>
where
    DI: interface::Interface,
    RST: OutputPin,
{
    fn size(&self) -> Size {
        Size::new(u32::from(WIDTH), u32::from(HEIGHT))
    }
}

impl<DI, RST> core::fmt::Write for Display<DI, RST>
where
    DI: interface::Interface,
    RST: OutputPin,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write_text(s).map_err(|_| core::fmt::Error)
    }
}
