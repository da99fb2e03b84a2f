//! Test doubles for the bus, pins and delays.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, ErrorKind, SpiBus};

use crate::interface::Interface;

/// One observable bus action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Begin,
    End,
    ChipSelect(bool),
    CommandMode(bool),
    Byte(u8),
}

/// Interface that records everything the driver does.
#[derive(Debug, Default)]
pub struct MockInterface {
    pub events: Vec<Event>,
    /// Number of `write_bytes` calls.
    pub bulk_writes: usize,
    /// Make every byte transfer fail.
    pub fail_writes: bool,
}

impl MockInterface {
    pub fn count(&self, event: Event) -> usize {
        self.events.iter().filter(|&&e| e == event).count()
    }

    fn bytes_in_mode(&self, command: bool) -> Vec<u8> {
        let mut mode = false;
        let mut bytes = Vec::new();
        for event in &self.events {
            match *event {
                Event::CommandMode(m) => mode = m,
                Event::Byte(b) if mode == command => bytes.push(b),
                _ => {}
            }
        }
        bytes
    }

    /// Bytes sent with the CD line at the command level.
    pub fn command_bytes(&self) -> Vec<u8> {
        self.bytes_in_mode(true)
    }

    /// Bytes sent with the CD line at the data level.
    pub fn data_bytes(&self) -> Vec<u8> {
        self.bytes_in_mode(false)
    }

    pub fn reset(&mut self) {
        self.events.clear();
        self.bulk_writes = 0;
    }
}

impl Interface for MockInterface {
    type Error = ErrorKind;

    fn begin_transaction(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::Begin);
        Ok(())
    }

    fn end_transaction(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::End);
        Ok(())
    }

    fn set_chip_select(&mut self, selected: bool) -> Result<(), Self::Error> {
        self.events.push(Event::ChipSelect(selected));
        Ok(())
    }

    fn set_command_mode(&mut self, command: bool) -> Result<(), Self::Error> {
        self.events.push(Event::CommandMode(command));
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(ErrorKind::Other);
        }
        self.events.push(Event::Byte(byte));
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.bulk_writes += 1;
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinState {
    Low,
    High,
}

#[derive(Debug, Default)]
pub struct MockPin {
    pub history: Vec<PinState>,
}

impl digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.history.push(PinState::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.history.push(PinState::High);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockSpiBus {
    pub written: Vec<u8>,
    pub flushes: usize,
    pub fail: bool,
}

impl spi::ErrorType for MockSpiBus {
    type Error = ErrorKind;
}

impl SpiBus for MockSpiBus {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        self.written.extend_from_slice(words);
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        read.fill(0);
        self.write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let copy = words.to_vec();
        words.fill(0);
        self.write(&copy)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

/// Delay that only remembers how long it was asked to wait.
#[derive(Debug, Default)]
pub struct MockDelay {
    pub waited_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waited_ns += u64::from(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.waited_ns += u64::from(us) * 1_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waited_ns += u64::from(ms) * 1_000_000;
    }
}
