//! UC1609 command set and command/data framing.
//!
//! Every command byte is written with the CD line at the command level and
//! the line is returned to the data level right after, while CS stays
//! asserted for the whole transaction.

use crate::interface::Interface;
use crate::options::{BiasRatio, ColorInversion, FrameRate, Orientation, TemperatureCompensation};

/// Base register codes. The register's value is OR'd into the low bits.
pub struct Reg;

impl Reg {
    pub const COL_ADDR_L: u8 = 0x00;
    pub const COL_ADDR_H: u8 = 0x10;
    pub const TEMP_COMP: u8 = 0x20;
    pub const POWER_CONTROL: u8 = 0x28;
    pub const SCROLL: u8 = 0x40;
    pub const VBIAS_POT: u8 = 0x81;
    pub const ADDRESS_CONTROL: u8 = 0x88;
    pub const FRAME_RATE: u8 = 0xA0;
    pub const ALL_PIXEL_ON: u8 = 0xA4;
    pub const INVERSE_DISPLAY: u8 = 0xA6;
    pub const DISPLAY_ENABLE: u8 = 0xAE;
    pub const PAGE_ADDR: u8 = 0xB0;
    pub const MAPPING_CTRL: u8 = 0xC0;
    pub const SYSTEM_RESET: u8 = 0xE2;
    pub const BIAS_RATIO: u8 = 0xE8;
}

/// A single controller command.
///
/// Values wider than the register field are masked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// CA[3:0]
    ColumnAddressLow(u8),
    /// CA[7:4], given as the nibble itself
    ColumnAddressHigh(u8),
    PageAddress(u8),
    TemperatureCompensation(TemperatureCompensation),
    /// PC[2:0]
    PowerControl(u8),
    /// First line displayed, 0-63.
    ScrollLine(u8),
    /// Double-byte Vbias potentiometer (contrast) set.
    VbiasPotentiometer(u8),
    /// AC[2:0]
    AddressControl(u8),
    FrameRate(FrameRate),
    AllPixelsOn(bool),
    Inversion(ColorInversion),
    DisplayEnable(bool),
    Mapping(Orientation),
    SystemReset,
    BiasRatio(BiasRatio),
}

/// Wire bytes of one [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    bytes: [u8; 2],
    len: usize,
}

impl Frame {
    const fn single(byte: u8) -> Self {
        Self {
            bytes: [byte, 0],
            len: 1,
        }
    }

    const fn double(first: u8, second: u8) -> Self {
        Self {
            bytes: [first, second],
            len: 2,
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl Command {
    /// Column address as the pair of nibble commands the controller expects.
    pub fn column_address(column: u8) -> [Command; 2] {
        [
            Command::ColumnAddressLow(column & 0x0F),
            Command::ColumnAddressHigh(column >> 4),
        ]
    }

    /// Encodes the command into its wire bytes.
    pub fn encode(self) -> Frame {
        match self {
            Command::ColumnAddressLow(ca) => Frame::single(Reg::COL_ADDR_L | (ca & 0x0F)),
            Command::ColumnAddressHigh(ca) => Frame::single(Reg::COL_ADDR_H | (ca & 0x0F)),
            Command::PageAddress(pa) => Frame::single(Reg::PAGE_ADDR | (pa & 0x0F)),
            Command::TemperatureCompensation(tc) => Frame::single(Reg::TEMP_COMP | tc as u8),
            Command::PowerControl(pc) => Frame::single(Reg::POWER_CONTROL | (pc & 0x07)),
            Command::ScrollLine(sl) => Frame::single(Reg::SCROLL | (sl & 0x3F)),
            Command::VbiasPotentiometer(pm) => Frame::double(Reg::VBIAS_POT, pm),
            Command::AddressControl(ac) => Frame::single(Reg::ADDRESS_CONTROL | (ac & 0x07)),
            Command::FrameRate(fr) => Frame::single(Reg::FRAME_RATE | fr as u8),
            Command::AllPixelsOn(on) => Frame::single(Reg::ALL_PIXEL_ON | u8::from(on)),
            Command::Inversion(inv) => Frame::single(
                Reg::INVERSE_DISPLAY | u8::from(inv == ColorInversion::Inverted),
            ),
            Command::DisplayEnable(on) => Frame::single(Reg::DISPLAY_ENABLE | u8::from(on)),
            Command::Mapping(orientation) => {
                Frame::single(Reg::MAPPING_CTRL | orientation.mapping_bits())
            }
            Command::SystemReset => Frame::single(Reg::SYSTEM_RESET),
            Command::BiasRatio(br) => Frame::single(Reg::BIAS_RATIO | br as u8),
        }
    }
}

/// Framing helpers on top of any [`Interface`].
pub trait InterfaceExt: Interface {
    /// Runs `f` with the bus acquired and CS asserted.
    ///
    /// CS is deasserted and the transaction ended even when `f` fails; the
    /// first error wins.
    fn transaction<T, F>(&mut self, f: F) -> Result<T, Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Self::Error>,
    {
        self.begin_transaction()?;
        let result = match self.set_chip_select(true) {
            Ok(()) => f(self),
            Err(e) => Err(e),
        };
        let released = self.set_chip_select(false);
        let ended = self.end_transaction();
        let value = result?;
        released?;
        ended?;
        Ok(value)
    }

    /// Writes command bytes inside an already open transaction.
    fn frame_command_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.set_command_mode(true)?;
        let written = self.write_bytes(bytes);
        let restored = self.set_command_mode(false);
        written?;
        restored
    }

    /// Writes one command inside an already open transaction.
    fn frame_command(&mut self, command: Command) -> Result<(), Self::Error> {
        self.frame_command_bytes(command.encode().as_slice())
    }

    /// Sends `register | value` as one framed command in its own transaction.
    fn send_command(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.transaction(|di| di.frame_command_bytes(&[register | value]))
    }

    /// Sends one typed command in its own transaction.
    fn write_command(&mut self, command: Command) -> Result<(), Self::Error> {
        self.transaction(|di| di.frame_command(command))
    }

    /// Sends several commands sharing one transaction, each framed on its own.
    fn write_commands(&mut self, commands: &[Command]) -> Result<(), Self::Error> {
        self.transaction(|di| {
            for &command in commands {
                di.frame_command(command)?;
            }
            Ok(())
        })
    }

    /// Moves the RAM address pointer, inside an already open transaction.
    fn frame_cursor(&mut self, column: u8, page: u8) -> Result<(), Self::Error> {
        let [low, high] = Command::column_address(column);
        self.frame_command(low)?;
        self.frame_command(high)?;
        self.frame_command(Command::PageAddress(page))
    }
}

impl<T: Interface + ?Sized> InterfaceExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::_mock::{Event, MockInterface};

    #[test]
    fn send_command_frames_one_byte() {
        let mut di = MockInterface::default();
        di.send_command(0x10, 0x05).unwrap();

        assert_eq!(
            di.events,
            vec![
                Event::Begin,
                Event::ChipSelect(true),
                Event::CommandMode(true),
                Event::Byte(0x15),
                Event::CommandMode(false),
                Event::ChipSelect(false),
                Event::End,
            ]
        );
    }

    #[test]
    fn vbias_is_two_bytes_in_one_command_period() {
        let mut di = MockInterface::default();
        di.write_command(Command::VbiasPotentiometer(0x49)).unwrap();

        assert_eq!(di.command_bytes(), vec![0x81, 0x49]);
        assert_eq!(di.count(Event::CommandMode(true)), 1);
        assert!(di.data_bytes().is_empty());
    }

    #[test]
    fn batched_commands_toggle_cd_per_command() {
        let mut di = MockInterface::default();
        di.write_commands(&[
            Command::SystemReset,
            Command::ScrollLine(0),
            Command::DisplayEnable(true),
        ])
        .unwrap();

        assert_eq!(di.command_bytes(), vec![0xE2, 0x40, 0xAF]);
        assert_eq!(di.count(Event::CommandMode(true)), 3);
        assert_eq!(di.count(Event::CommandMode(false)), 3);
        assert_eq!(di.count(Event::ChipSelect(true)), 1);
        assert_eq!(di.count(Event::Begin), 1);
    }

    #[test]
    fn values_are_masked_to_field_width() {
        assert_eq!(Command::ScrollLine(64).encode().as_slice(), &[0x40]);
        assert_eq!(Command::ScrollLine(63).encode().as_slice(), &[0x7F]);
        assert_eq!(Command::PageAddress(0x17).encode().as_slice(), &[0xB7]);
        assert_eq!(Command::ColumnAddressLow(0xAB).encode().as_slice(), &[0x0B]);
    }

    #[test]
    fn column_address_splits_nibbles() {
        let [low, high] = Command::column_address(0xBF);
        assert_eq!(low.encode().as_slice(), &[0x0F]);
        assert_eq!(high.encode().as_slice(), &[0x1B]);
    }

    #[test]
    fn mapping_and_toggles() {
        assert_eq!(
            Command::Mapping(Orientation::Normal).encode().as_slice(),
            &[0xC4]
        );
        assert_eq!(
            Command::Mapping(Orientation::UpsideDown).encode().as_slice(),
            &[0xC2]
        );
        assert_eq!(
            Command::Inversion(ColorInversion::Inverted).encode().as_slice(),
            &[0xA7]
        );
        assert_eq!(Command::AllPixelsOn(false).encode().as_slice(), &[0xA4]);
        assert_eq!(
            Command::BiasRatio(BiasRatio::Ratio9).encode().as_slice(),
            &[0xEB]
        );
    }

    #[test]
    fn transaction_releases_bus_on_error() {
        let mut di = MockInterface {
            fail_writes: true,
            ..Default::default()
        };

        assert!(di.write_command(Command::SystemReset).is_err());
        assert_eq!(
            &di.events[di.events.len() - 3..],
            &[
                Event::CommandMode(false),
                Event::ChipSelect(false),
                Event::End
            ]
        );
    }
}
