//! SPI0 transport with bounded status polling
//!
//! The embassy SPI driver brings the peripheral up (clock, mode, pin
//! muxing); bytes are then pushed through the data register directly so
//! every wait on a status flag has an iteration budget. The display never
//! answers, but the receive FIFO still fills and is drained after each
//! burst.

use embassy_rp::gpio::{self, Output};
use embassy_rp::pac;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{self, Blocking, Spi};
use embassy_time::{block_for, Duration};

use roundel_hal::spi::{Phase, Polarity as ClockPolarity};
use roundel_hal::{
    poll_until, Level, Polarity, SignalLine, SpiConfig, Stage, TransportAdapter, TransportError,
    DEFAULT_POLL_BUDGET,
};

use crate::pins::ControlOutputs;

/// Depth of the PL022 receive FIFO
const RX_FIFO_DEPTH: usize = 8;

pub(crate) fn gpio_level(level: Level) -> gpio::Level {
    if level.is_high() {
        gpio::Level::High
    } else {
        gpio::Level::Low
    }
}

/// Translate link settings into an embassy SPI configuration
pub fn spi_config(settings: &SpiConfig) -> spi::Config {
    let (polarity, phase) = settings.mode.into();
    let mut config = spi::Config::default();
    config.frequency = settings.frequency;
    config.polarity = match polarity {
        ClockPolarity::IdleLow => spi::Polarity::IdleLow,
        ClockPolarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    config.phase = match phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    config
}

/// Transport adapter on RP2040 SPI0
pub struct Rp2040Transport<'d> {
    spi: Spi<'d, SPI0, Blocking>,
    pins: ControlOutputs<'d>,
    polarity: Polarity,
    budget: u32,
}

impl<'d> Rp2040Transport<'d> {
    /// Wrap a configured SPI0 and the control outputs, parking every line
    pub fn new(
        spi: Spi<'d, SPI0, Blocking>,
        pins: ControlOutputs<'d>,
        polarity: Polarity,
    ) -> Result<Self, TransportError> {
        let mut transport = Self {
            spi,
            pins,
            polarity,
            budget: DEFAULT_POLL_BUDGET,
        };
        transport.park()?;
        Ok(transport)
    }

    /// Override the per-wait polling budget
    pub fn with_poll_budget(mut self, budget: u32) -> Self {
        self.budget = budget;
        self
    }

    /// Board polarity applied to every control line
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Give back the SPI driver and the control outputs
    pub fn release(self) -> (Spi<'d, SPI0, Blocking>, ControlOutputs<'d>) {
        (self.spi, self.pins)
    }

    fn wait<F>(&self, stage: Stage, mut ready: F) -> Result<(), TransportError>
    where
        F: FnMut(pac::spi::regs::Sspsr) -> bool,
    {
        let regs = pac::SPI0;
        match poll_until(self.budget, || ready(regs.sspsr().read())) {
            Ok(_) => Ok(()),
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("SPI0 wait timed out at {}", stage);
                Err(TransportError::Timeout(stage))
            }
        }
    }

    fn push(&mut self, byte: u8) -> Result<(), TransportError> {
        self.wait(Stage::TxReady, |sr| sr.tnf())?;
        pac::SPI0.sspdr().write(|w| w.set_data(byte as u16));
        Ok(())
    }

    fn drain_rx(&self) {
        let regs = pac::SPI0;
        for _ in 0..RX_FIFO_DEPTH {
            if !regs.sspsr().read().rne() {
                break;
            }
            let _ = regs.sspdr().read();
        }
    }
}

impl TransportAdapter for Rp2040Transport<'_> {
    type Error = TransportError;

    fn set_signal(&mut self, line: SignalLine, level: Level) -> Result<(), Self::Error> {
        let level = gpio_level(self.polarity.apply(level));
        match line {
            SignalLine::Reset => self.pins.reset.set_level(level),
            SignalLine::DataCommand => self.pins.dc.set_level(level),
            SignalLine::ChipSelect => self.pins.cs.set_level(level),
            SignalLine::Backlight => {
                if let Some(backlight) = self.pins.backlight.as_mut() {
                    backlight.set_level(level);
                }
            }
        }
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.push(byte)?;
        self.wait(Stage::TxComplete, |sr| sr.tfe() && !sr.bsy())?;
        self.drain_rx();
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.push(byte)?;
            self.drain_rx();
        }
        self.wait_idle()
    }

    fn wait_idle(&mut self) -> Result<(), Self::Error> {
        self.wait(Stage::Idle, |sr| sr.tfe() && !sr.bsy())?;
        self.drain_rx();
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(ms as u64));
    }

    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(us as u64));
    }
}
