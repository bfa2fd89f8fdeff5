//! Transport adapter over `embedded-hal` 1.0 traits
//!
//! Lets the protocol engine run on any platform that already provides a
//! blocking [`SpiBus`], four [`OutputPin`]s and a [`DelayNs`]. Chip select
//! is a plain GPIO because the controller expects it to stay low across a
//! command and its parameters, which `SpiDevice` cannot express.
//!
//! Completion is delegated to [`SpiBus::flush`], which per the
//! `embedded-hal` contract returns only once every written word has been
//! clocked out.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal::spi::SpiBus;

use crate::signal::{Level, Polarity, SignalLine};
use crate::transport::{TransportAdapter, TransportError};

/// Placeholder for boards with the backlight tied to VCC
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBacklight;

impl ErrorType for NoBacklight {
    type Error = Infallible;
}

impl OutputPin for NoBacklight {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Control pins of one display
pub struct ControlPins<RST, DC, CS, BL> {
    /// Reset (RESX)
    pub reset: RST,
    /// Data/command select
    pub dc: DC,
    /// Chip select
    pub cs: CS,
    /// Backlight enable (use [`NoBacklight`] when hard-wired)
    pub backlight: BL,
}

/// `embedded-hal` backed transport adapter
pub struct EmbeddedHalTransport<SPI, RST, DC, CS, BL, D> {
    spi: SPI,
    pins: ControlPins<RST, DC, CS, BL>,
    delay: D,
    polarity: Polarity,
}

impl<SPI, RST, DC, CS, BL, D> EmbeddedHalTransport<SPI, RST, DC, CS, BL, D>
where
    SPI: SpiBus<u8>,
    RST: OutputPin,
    DC: OutputPin,
    CS: OutputPin,
    BL: OutputPin,
    D: DelayNs,
{
    /// Create the adapter and park every control line at its idle level
    pub fn new(
        spi: SPI,
        pins: ControlPins<RST, DC, CS, BL>,
        delay: D,
        polarity: Polarity,
    ) -> Result<Self, TransportError> {
        let mut transport = Self {
            spi,
            pins,
            delay,
            polarity,
        };
        transport.park()?;
        Ok(transport)
    }

    /// Inversion policy in effect
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Give back the bus, pins and delay provider
    pub fn release(self) -> (SPI, ControlPins<RST, DC, CS, BL>, D) {
        (self.spi, self.pins, self.delay)
    }
}

fn drive<P: OutputPin>(pin: &mut P, level: Level) -> Result<(), TransportError> {
    let result = match level {
        Level::High => pin.set_high(),
        Level::Low => pin.set_low(),
    };
    result.map_err(|_| TransportError::Bus)
}

impl<SPI, RST, DC, CS, BL, D> TransportAdapter for EmbeddedHalTransport<SPI, RST, DC, CS, BL, D>
where
    SPI: SpiBus<u8>,
    RST: OutputPin,
    DC: OutputPin,
    CS: OutputPin,
    BL: OutputPin,
    D: DelayNs,
{
    type Error = TransportError;

    fn set_signal(&mut self, line: SignalLine, level: Level) -> Result<(), Self::Error> {
        let physical = self.polarity.apply(level);
        match line {
            SignalLine::Reset => drive(&mut self.pins.reset, physical),
            SignalLine::DataCommand => drive(&mut self.pins.dc, physical),
            SignalLine::ChipSelect => drive(&mut self.pins.cs, physical),
            SignalLine::Backlight => drive(&mut self.pins.backlight, physical),
        }
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.write_bytes(&[byte])
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(bytes).map_err(|_| TransportError::Bus)?;
        self.spi.flush().map_err(|_| TransportError::Bus)
    }

    fn wait_idle(&mut self) -> Result<(), Self::Error> {
        self.spi.flush().map_err(|_| TransportError::Bus)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}
