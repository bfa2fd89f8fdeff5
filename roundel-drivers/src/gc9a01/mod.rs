//! GC9A01 round display controller
//!
//! Drives a 240x240 RGB565 panel over a 4-wire serial link through any
//! [`TransportAdapter`].
//!
//! # Framing
//!
//! - Command: chip select low, DC low, one byte. Chip select stays low.
//! - Data: DC high, the bytes, wait for the link to drain, chip select high.
//! - A command without data stays open until the next command starts,
//!   which first raises chip select to close it.
//!
//! Every line transition and every command byte is followed by a settle
//! delay.
//!
//! # Usage
//!
//! ```ignore
//! let mut display = Gc9a01::new(transport);
//! display.initialize()?;
//! display.fill_screen(Rgb565::BLACK)?;
//! display.fill_rect(Rect::new(10, 10, 20, 20), Rgb565::GREEN)?;
//! ```

pub mod cmd;
pub mod init;

use roundel_core::config::{PanelConfig, Timing, MAX_PANEL_DIM};
use roundel_core::traits::PanelDriver;
use roundel_core::{Rect, Rgb565};
use roundel_hal::{Level, SignalLine, TransportAdapter};

use init::{Pause, INIT_SEQUENCE};

/// Pixels per burst handed to the transport during a fill
const FILL_CHUNK_PIXELS: usize = 32;

/// Engine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The transport gave up (timeout or bus fault)
    Transport(E),
    /// Drawing was requested before [`Gc9a01::initialize`] completed
    NotInitialized,
    /// Data was written with no command open to receive it
    NoOpenCommand,
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Transport(e)
    }
}

/// Where the engine left chip select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bus {
    /// Chip select high
    Idle,
    /// Chip select low with no command pending (held through reset)
    Selected,
    /// Chip select low after a command byte
    CommandOpen,
}

/// GC9A01 protocol engine
pub struct Gc9a01<T> {
    transport: T,
    timing: Timing,
    width: u16,
    height: u16,
    bus: Bus,
    initialized: bool,
}

impl<T: TransportAdapter> Gc9a01<T> {
    /// Engine for a 240x240 panel with default timing
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, PanelConfig::default(), Timing::default())
    }

    /// Engine with explicit panel size and timing
    ///
    /// Dimensions are capped at 240 and timing is raised to the controller
    /// minimums.
    pub fn with_config(transport: T, panel: PanelConfig, timing: Timing) -> Self {
        Self {
            transport,
            timing: timing.sanitized(),
            width: panel.width.min(MAX_PANEL_DIM),
            height: panel.height.min(MAX_PANEL_DIM),
            bus: Bus::Idle,
            initialized: false,
        }
    }

    /// Whether the init script has completed since the last reset
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Timing in effect, after sanitizing
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Give back the transport
    pub fn release(self) -> T {
        self.transport
    }

    /// Hardware reset
    ///
    /// Chip select is held low through the pulse. Leaves the controller at
    /// its power-on defaults, so the engine counts as uninitialized again.
    pub fn reset(&mut self) -> Result<(), Error<T::Error>> {
        self.initialized = false;

        #[cfg(feature = "defmt")]
        defmt::debug!("GC9A01: reset");

        self.transport.set_signal(SignalLine::ChipSelect, Level::Low)?;
        self.bus = Bus::Selected;
        self.transport.delay_ms(self.timing.select_ms);

        self.transport.set_signal(SignalLine::Reset, Level::Low)?;
        self.transport.delay_ms(self.timing.reset_hold_ms);

        self.transport.set_signal(SignalLine::Reset, Level::High)?;
        self.transport.delay_ms(self.timing.reset_recovery_ms);
        Ok(())
    }

    /// Reset, then replay the register script
    pub fn initialize(&mut self) -> Result<(), Error<T::Error>> {
        self.reset()?;

        #[cfg(feature = "defmt")]
        defmt::debug!("GC9A01: sending {} init commands", INIT_SEQUENCE.len());

        for step in INIT_SEQUENCE {
            self.send(step.command, step.params)?;
            match step.pause {
                Pause::None => {}
                Pause::SleepOut => self.transport.delay_ms(self.timing.sleep_out_ms),
                Pause::DisplayOn => self.transport.delay_ms(self.timing.display_on_ms),
            }
        }

        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::debug!("GC9A01: ready ({}x{})", self.width, self.height);
        Ok(())
    }

    /// Start a command, closing any command still open
    pub fn write_command(&mut self, command: u8) -> Result<(), Error<T::Error>> {
        if self.bus == Bus::CommandOpen {
            self.deselect()?;
        }
        self.transport.set_signal(SignalLine::ChipSelect, Level::Low)?;
        self.settle();
        self.transport.set_signal(SignalLine::DataCommand, Level::Low)?;
        self.settle();
        self.transport.write_byte(command)?;
        self.bus = Bus::CommandOpen;
        self.settle();
        Ok(())
    }

    /// Send data for the open command and close the transaction
    pub fn write_data(&mut self, data: &[u8]) -> Result<(), Error<T::Error>> {
        self.begin_data()?;
        self.transport.write_bytes(data)?;
        self.end_transaction()
    }

    /// Command followed by its parameters; bare commands stay open
    pub fn send(&mut self, command: u8, params: &[u8]) -> Result<(), Error<T::Error>> {
        self.write_command(command)?;
        if !params.is_empty() {
            self.write_data(params)?;
        }
        Ok(())
    }

    /// Switch the backlight line
    pub fn set_backlight(&mut self, on: bool) -> Result<(), Error<T::Error>> {
        self.transport
            .set_signal(SignalLine::Backlight, Level::from(on))?;
        Ok(())
    }

    /// Select the window that pixel data lands in
    ///
    /// Leaves a memory write open, ready for pixel data. An empty window
    /// after clamping sends nothing.
    pub fn set_window(&mut self, rect: Rect) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        match rect.clamped(self.width, self.height) {
            Some(window) => self.address(window),
            None => Ok(()),
        }
    }

    /// Fill a rectangle with one color
    pub fn fill_rect(&mut self, rect: Rect, color: Rgb565) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        let Some(window) = rect.clamped(self.width, self.height) else {
            return Ok(());
        };

        self.address(window)?;
        self.begin_data()?;

        let mut chunk = [0u8; FILL_CHUNK_PIXELS * 2];
        for pixel in chunk.chunks_exact_mut(2) {
            pixel.copy_from_slice(&color.to_be_bytes());
        }

        let mut remaining = window.area() as usize * 2;
        while remaining > 0 {
            let n = remaining.min(chunk.len());
            self.transport.write_bytes(&chunk[..n])?;
            remaining -= n;
        }

        self.end_transaction()
    }

    /// Fill the whole panel
    pub fn fill_screen(&mut self, color: Rgb565) -> Result<(), Error<T::Error>> {
        self.fill_rect(Rect::full(self.width, self.height), color)
    }

    /// CASET, RASET, then RAMWR left open
    fn address(&mut self, window: Rect) -> Result<(), Error<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!(
            "GC9A01: window {}..{} x {}..{}",
            window.x0,
            window.x1,
            window.y0,
            window.y1
        );

        let [x0, x1] = [window.x0 as u8, window.last_column() as u8];
        let [y0, y1] = [window.y0 as u8, window.last_row() as u8];
        self.send(cmd::COLUMN_ADDRESS_SET, &[0x00, x0, 0x00, x1])?;
        self.send(cmd::ROW_ADDRESS_SET, &[0x00, y0, 0x00, y1])?;
        self.write_command(cmd::MEMORY_WRITE)
    }

    fn ensure_initialized(&self) -> Result<(), Error<T::Error>> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    fn begin_data(&mut self) -> Result<(), Error<T::Error>> {
        if self.bus != Bus::CommandOpen {
            return Err(Error::NoOpenCommand);
        }
        self.transport.set_signal(SignalLine::DataCommand, Level::High)?;
        self.settle();
        Ok(())
    }

    fn end_transaction(&mut self) -> Result<(), Error<T::Error>> {
        self.transport.wait_idle()?;
        self.deselect()
    }

    fn deselect(&mut self) -> Result<(), Error<T::Error>> {
        self.transport.delay_us(self.timing.release_us);
        self.transport.set_signal(SignalLine::ChipSelect, Level::High)?;
        self.bus = Bus::Idle;
        self.transport.delay_us(self.timing.gap_us);
        Ok(())
    }

    fn settle(&mut self) {
        self.transport.delay_us(self.timing.settle_us);
    }
}

impl<T: TransportAdapter> PanelDriver for Gc9a01<T> {
    type Error = Error<T::Error>;

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn initialize(&mut self) -> Result<(), Self::Error> {
        Gc9a01::initialize(self)
    }

    fn set_window(&mut self, rect: Rect) -> Result<(), Self::Error> {
        Gc9a01::set_window(self, rect)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb565) -> Result<(), Self::Error> {
        Gc9a01::fill_rect(self, rect, color)
    }

    fn fill_screen(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        Gc9a01::fill_screen(self, color)
    }
}

#[cfg(test)]
mod tests;
