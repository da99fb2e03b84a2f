//! [super::Display] configuration options.

use crate::font::Font;

/// Default Vbias potentiometer value (contrast).
pub const DEFAULT_CONTRAST: u8 = 0x49;

/// [ModelOptions] are passed to the [`Builder`](crate::Builder) and held by the
/// [`Display`](crate::Display).
#[derive(Clone)]
pub struct ModelOptions {
    /// Vbias potentiometer value.
    pub contrast: u8,
    /// Display orientation.
    pub orientation: Orientation,
    /// Whether the controller inverts RAM contents on output.
    pub invert_colors: ColorInversion,
    /// Text scale.
    pub scale: Scale,
    /// Smooth diagonals of double size glyphs.
    pub anti_aliasing: bool,
    /// Report codes missing from the font instead of skipping them.
    pub strict_glyphs: bool,
    /// Font used for text output.
    pub font: Font,
    pub frame_rate: FrameRate,
    pub bias_ratio: BiasRatio,
    pub temperature_compensation: TemperatureCompensation,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            contrast: DEFAULT_CONTRAST,
            orientation: Orientation::default(),
            invert_colors: ColorInversion::default(),
            scale: Scale::default(),
            anti_aliasing: true,
            strict_glyphs: false,
            font: crate::font::FONT_5X7,
            frame_rate: FrameRate::default(),
            bias_ratio: BiasRatio::default(),
            temperature_compensation: TemperatureCompensation::default(),
        }
    }
}

/// Display orientation, set through the MY/MX mapping bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    #[default]
    Normal,
    UpsideDown,
}

impl Orientation {
    /// MY[2], MX[1] bits of the mapping control register.
    pub const fn mapping_bits(self) -> u8 {
        match self {
            Orientation::Normal => 0b100,
            Orientation::UpsideDown => 0b010,
        }
    }
}

/// Color inversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorInversion {
    /// Pixels are displayed as stored in RAM.
    #[default]
    Normal,
    /// Every pixel is displayed inverted.
    Inverted,
}

impl From<bool> for ColorInversion {
    fn from(inverted: bool) -> Self {
        if inverted {
            ColorInversion::Inverted
        } else {
            ColorInversion::Normal
        }
    }
}

/// Text scale factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scale {
    #[default]
    Normal = 1,
    Double = 2,
}

impl Scale {
    pub const fn factor(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Scale {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Scale::Normal),
            2 => Ok(Scale::Double),
            other => Err(other),
        }
    }
}

/// Frame rate, FR[1:0].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameRate {
    Fps76 = 0b00,
    #[default]
    Fps95 = 0b01,
    Fps132 = 0b10,
    Fps168 = 0b11,
}

/// Bias ratio between V-LCD and V-D, BR[1:0].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BiasRatio {
    Ratio6 = 0b00,
    Ratio7 = 0b01,
    Ratio8 = 0b10,
    #[default]
    Ratio9 = 0b11,
}

/// Temperature compensation coefficient, TC[1:0].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureCompensation {
    /// -0.00 %/°C
    #[default]
    Tc0 = 0b00,
    /// -0.05 %/°C
    Tc1 = 0b01,
    /// -0.10 %/°C
    Tc2 = 0b10,
    /// -0.15 %/°C
    Tc3 = 0b11,
}
