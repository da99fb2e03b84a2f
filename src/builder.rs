//! [super::Display] builder module

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use log::debug;

use crate::{
    command::{Command, InterfaceExt},
    cursor::Cursor,
    font::Font,
    interface::Interface,
    options::{
        BiasRatio, ColorInversion, FrameRate, ModelOptions, Orientation, Scale,
        TemperatureCompensation,
    },
    Display, Error, RESET_SETTLE_MS,
};

/// Builder for [Display] instances.
///
/// Exposes all possible display options.
///
/// # Examples
///
/// ```rust,ignore
/// use uc1609::{interface::SpiInterface, options::{Orientation, Scale}, Builder};
///
/// let di = SpiInterface::new(spi_bus, cd_pin, cs_pin);
/// let mut display = Builder::new(di)
///     .contrast(0x50)
///     .orientation(Orientation::UpsideDown)
///     .scale(Scale::Double)
///     .reset_pin(rst)
///     .init(&mut delay)
///     .unwrap();
///
/// display.write_text("Hello").unwrap();
/// ```
pub struct Builder<DI, RST>
where
    DI: Interface,
{
    di: DI,
    rst: Option<RST>,
    options: ModelOptions,
}

impl<DI> Builder<DI, NoResetPin>
where
    DI: Interface,
{
    /// Constructs a new builder for the given interface.
    #[must_use]
    pub fn new(di: DI) -> Self {
        Self {
            di,
            rst: None,
            options: ModelOptions::default(),
        }
    }
}

impl<DI, RST> Builder<DI, RST>
where
    DI: Interface,
    RST: OutputPin,
{
    /// Sets the Vbias potentiometer value (contrast).
    #[must_use]
    pub fn contrast(mut self, contrast: u8) -> Self {
        self.options.contrast = contrast;
        self
    }

    #[must_use]
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.options.orientation = orientation;
        self
    }

    #[must_use]
    pub fn invert_colors(mut self, color_inversion: ColorInversion) -> Self {
        self.options.invert_colors = color_inversion;
        self
    }

    #[must_use]
    pub fn font(mut self, font: Font) -> Self {
        self.options.font = font;
        self
    }

    #[must_use]
    pub fn scale(mut self, scale: Scale) -> Self {
        self.options.scale = scale;
        self
    }

    #[must_use]
    pub fn anti_aliasing(mut self, enabled: bool) -> Self {
        self.options.anti_aliasing = enabled;
        self
    }

    /// Report characters missing from the font as
    /// [`Error::GlyphOutOfRange`] instead of skipping them.
    #[must_use]
    pub fn strict_glyphs(mut self, strict: bool) -> Self {
        self.options.strict_glyphs = strict;
        self
    }

    #[must_use]
    pub fn frame_rate(mut self, frame_rate: FrameRate) -> Self {
        self.options.frame_rate = frame_rate;
        self
    }

    #[must_use]
    pub fn bias_ratio(mut self, bias_ratio: BiasRatio) -> Self {
        self.options.bias_ratio = bias_ratio;
        self
    }

    #[must_use]
    pub fn temperature_compensation(mut self, tc: TemperatureCompensation) -> Self {
        self.options.temperature_compensation = tc;
        self
    }

    /// Sets the reset pin.
    ///
    /// Without one the controller is only reset by the system reset command.
    #[must_use]
    pub fn reset_pin<RST2: OutputPin>(self, rst: RST2) -> Builder<DI, RST2> {
        Builder {
            di: self.di,
            rst: Some(rst),
            options: self.options,
        }
    }

    /// Consumes the builder to create a new [Display] with an optional reset
    /// [OutputPin]. Blocks using the provided delay source for the reset
    /// pulse and the system reset.
    ///
    /// The display is switched on and cleared.
    pub fn init(
        self,
        delay_source: &mut impl DelayNs,
    ) -> Result<Display<DI, RST>, Error<DI::Error, RST::Error>> {
        debug!("initializing uc1609");
        let options = self.options;

        let mut display = Display {
            di: self.di,
            rst: self.rst,
            options: options.clone(),
            cursor: Cursor::default(),
            address_synced: false,
        };

        display.hard_reset(delay_source)?;

        display
            .di
            .write_command(Command::SystemReset)
            .map_err(Error::Interface)?;
        delay_source.delay_ms(RESET_SETTLE_MS);

        let [col_low, col_high] = Command::column_address(0);
        display
            .di
            .write_commands(&[
                Command::BiasRatio(options.bias_ratio),
                Command::FrameRate(options.frame_rate),
                Command::TemperatureCompensation(options.temperature_compensation),
                Command::VbiasPotentiometer(options.contrast),
                Command::Mapping(options.orientation),
                col_low,
                col_high,
                Command::PageAddress(0),
                Command::ScrollLine(0),
                Command::Inversion(options.invert_colors),
                Command::DisplayEnable(true),
            ])
            .map_err(Error::Interface)?;

        display.clear()?;
        Ok(display)
    }
}

/// Marker type for a display without a reset pin.
pub enum NoResetPin {}

impl digital::OutputPin for NoResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl digital::ErrorType for NoResetPin {
    type Error = core::convert::Infallible;
}
