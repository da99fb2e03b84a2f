//! Bus transport between the driver and the controller.

mod spi;
pub use spi::*;

/// Synchronous serial bus with a chip-select and a command/data line.
///
/// The driver brackets every logical transfer with [`begin_transaction`] and
/// [`end_transaction`] and drives both control lines itself, so an
/// implementation only has to move bytes and toggle pins. All methods block
/// until the operation has completed.
///
/// [`begin_transaction`]: Interface::begin_transaction
/// [`end_transaction`]: Interface::end_transaction
pub trait Interface {
    /// Error type
    type Error: core::fmt::Debug;

    /// Acquires the bus for a sequence of transfers.
    fn begin_transaction(&mut self) -> Result<(), Self::Error>;

    /// Releases the bus after all transfers of a transaction are complete.
    fn end_transaction(&mut self) -> Result<(), Self::Error>;

    /// Asserts (`true`) or deasserts (`false`) the chip-select line.
    fn set_chip_select(&mut self, selected: bool) -> Result<(), Self::Error>;

    /// Drives the command/data line to the command level (`true`) or the data
    /// level (`false`).
    fn set_command_mode(&mut self, command: bool) -> Result<(), Self::Error>;

    /// Transfers a single byte.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Transfers a slice of bytes in order.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }
}

impl<T: Interface + ?Sized> Interface for &mut T {
    type Error = T::Error;

    fn begin_transaction(&mut self) -> Result<(), Self::Error> {
        T::begin_transaction(self)
    }

    fn end_transaction(&mut self) -> Result<(), Self::Error> {
        T::end_transaction(self)
    }

    fn set_chip_select(&mut self, selected: bool) -> Result<(), Self::Error> {
        T::set_chip_select(self, selected)
    }

    fn set_command_mode(&mut self, command: bool) -> Result<(), Self::Error> {
        T::set_command_mode(self, command)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        T::write_byte(self, byte)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        T::write_bytes(self, bytes)
    }
}
