//! Transport adapter trait
//!
//! The protocol engine sees the display link only through this trait:
//! discrete control lines, byte writes that complete on the wire before
//! returning, and blocking delays.

use crate::signal::{Level, SignalLine};

/// Which bounded wait ran out of budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// Waiting for room in the transmit buffer before writing a byte
    TxReady,
    /// Waiting for a written byte to leave the shift register
    TxComplete,
    /// Waiting for the link to go quiet at the end of a burst
    Idle,
}

/// Errors reported by transport adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// A status poll exhausted its iteration budget; the operation was abandoned
    Timeout(Stage),
    /// The underlying bus or pin driver reported an error
    Bus,
}

/// Byte transport plus signal control for one display
///
/// Implementations hide every microcontroller-specific register access.
/// There is exactly one logical thread of control: nothing here yields,
/// and every busy-wait is bounded so a stuck line can never hang the caller.
pub trait TransportAdapter {
    /// Error type for transport operations
    type Error: core::fmt::Debug;

    /// Drive a control line to a logical level
    ///
    /// The adapter applies its inversion policy before touching the pin.
    fn set_signal(&mut self, line: SignalLine, level: Level) -> Result<(), Self::Error>;

    /// Transmit one byte, MSB first
    ///
    /// Must not return until the byte has fully left the transmit shift
    /// register; callers toggle chip select right after the last byte.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Transmit a run of bytes with the same completion guarantee
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Block until the link is idle (nothing queued, nothing shifting)
    fn wait_idle(&mut self) -> Result<(), Self::Error>;

    /// Blocking delay in milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Blocking delay in microseconds
    fn delay_us(&mut self, us: u32);

    /// Drive every control line to its idle level
    fn park(&mut self) -> Result<(), Self::Error> {
        for line in SignalLine::ALL {
            self.set_signal(line, line.idle_level())?;
        }
        Ok(())
    }
}

impl<T: TransportAdapter + ?Sized> TransportAdapter for &mut T {
    type Error = T::Error;

    fn set_signal(&mut self, line: SignalLine, level: Level) -> Result<(), Self::Error> {
        (**self).set_signal(line, level)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).write_byte(byte)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write_bytes(bytes)
    }

    fn wait_idle(&mut self) -> Result<(), Self::Error> {
        (**self).wait_idle()
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }

    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}
