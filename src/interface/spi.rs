use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::Interface;

/// Spi interface error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiError<SPI, DC, CS> {
    Spi(SPI),
    Dc(DC),
    Cs(CS),
}

/// 4-wire serial interface: SPI bus plus CD and CS pins.
///
/// The chip-select is a plain [`OutputPin`] rather than being owned by an
/// `SpiDevice`, because the UC1609 protocol needs CS held across several
/// CD transitions.
pub struct SpiInterface<SPI, DC, CS> {
    spi: SPI,
    dc: DC,
    cs: CS,
}

impl<SPI, DC, CS> SpiInterface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Create new interface
    pub fn new(spi: SPI, dc: DC, cs: CS) -> Self {
        Self { spi, dc, cs }
    }

    /// Release the SPI bus and both pins, deconstructing the interface
    pub fn release(self) -> (SPI, DC, CS) {
        (self.spi, self.dc, self.cs)
    }

    // Pins must not change while bytes are still shifting out.
    fn flush(&mut self) -> Result<(), SpiError<SPI::Error, DC::Error, CS::Error>> {
        self.spi.flush().map_err(SpiError::Spi)
    }
}

impl<SPI, DC, CS> Interface for SpiInterface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    type Error = SpiError<SPI::Error, DC::Error, CS::Error>;

    fn begin_transaction(&mut self) -> Result<(), Self::Error> {
        // The bus is configured by whoever built `SPI`.
        Ok(())
    }

    fn end_transaction(&mut self) -> Result<(), Self::Error> {
        self.flush()
    }

    fn set_chip_select(&mut self, selected: bool) -> Result<(), Self::Error> {
        self.flush()?;
        if selected {
            self.cs.set_low().map_err(SpiError::Cs)
        } else {
            self.cs.set_high().map_err(SpiError::Cs)
        }
    }

    fn set_command_mode(&mut self, command: bool) -> Result<(), Self::Error> {
        self.flush()?;
        if command {
            self.dc.set_low().map_err(SpiError::Dc)
        } else {
            self.dc.set_high().map_err(SpiError::Dc)
        }
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.spi.write(&[byte]).map_err(SpiError::Spi)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(bytes).map_err(SpiError::Spi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::_mock::{MockPin, MockSpiBus, PinState};

    #[test]
    fn pins_follow_protocol_levels() {
        let mut di = SpiInterface::new(MockSpiBus::default(), MockPin::default(), MockPin::default());

        di.set_chip_select(true).unwrap();
        di.set_command_mode(true).unwrap();
        di.write_byte(0xE2).unwrap();
        di.set_command_mode(false).unwrap();
        di.write_bytes(&[1, 2, 3]).unwrap();
        di.set_chip_select(false).unwrap();
        di.end_transaction().unwrap();

        let (spi, dc, cs) = di.release();
        assert_eq!(spi.written, vec![0xE2, 1, 2, 3]);
        assert_eq!(dc.history, vec![PinState::Low, PinState::High]);
        assert_eq!(cs.history, vec![PinState::Low, PinState::High]);
        // every pin change and the transaction end flush the bus
        assert_eq!(spi.flushes, 5);
    }

    #[test]
    fn spi_errors_are_reported() {
        let spi = MockSpiBus {
            fail: true,
            ..Default::default()
        };
        let mut di = SpiInterface::new(spi, MockPin::default(), MockPin::default());

        assert!(matches!(di.write_byte(0), Err(SpiError::Spi(_))));
        let (spi, _, _) = di.release();
        assert_eq!(spi.written, Vec::<u8>::new());
    }
}
