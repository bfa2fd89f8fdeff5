//! Config-driven pin hand-out
//!
//! The firmware moves every free GPIO into a [`PinBank`]; display control
//! lines are then taken by the numbers found in the config. Pins wired to
//! the SPI peripheral are marked reserved so a config cannot reuse them
//! as plain outputs.

use embassy_rp::gpio::{AnyPin, Output};
use embassy_rp::Peri;
use roundel_core::config::{PinAssignment, GPIO_COUNT};
use roundel_hal::{Polarity, SignalLine};

use crate::transport::gpio_level;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for a peripheral function
    Reserved,
}

/// Pin bank that holds GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT as usize],
    reserved: u32,
}

impl Default for PinBank {
    fn default() -> Self {
        Self::new()
    }
}

impl PinBank {
    /// Empty bank; fill it with [`insert`](Self::insert)
    pub fn new() -> Self {
        Self {
            pins: [const { None }; GPIO_COUNT as usize],
            reserved: 0,
        }
    }

    /// Hand a pin to the bank; out-of-range numbers are ignored
    pub fn insert(&mut self, pin_num: u8, pin: Peri<'static, AnyPin>) {
        if pin_num < GPIO_COUNT {
            self.pins[pin_num as usize] = Some(pin);
        }
    }

    /// Mark a pin as owned by a peripheral
    pub fn reserve(&mut self, pin_num: u8) {
        if pin_num < GPIO_COUNT {
            self.reserved |= 1 << pin_num;
        }
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin_num >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if self.reserved & (1 << pin_num) != 0 {
            return Err(PinError::Reserved);
        }
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }

    pub fn is_available(&self, pin_num: u8) -> bool {
        pin_num < GPIO_COUNT
            && self.reserved & (1 << pin_num) == 0
            && self.pins[pin_num as usize].is_some()
    }
}

/// Control line outputs for one display
pub struct ControlOutputs<'d> {
    pub reset: Output<'d>,
    pub dc: Output<'d>,
    pub cs: Output<'d>,
    pub backlight: Option<Output<'d>>,
}

impl ControlOutputs<'static> {
    /// Take the control pins named in `pins` from the bank
    ///
    /// Each output comes up already at its idle level under `polarity`, so
    /// the panel never sees a stray select or reset while the adapter is
    /// being built.
    pub fn from_bank(
        bank: &mut PinBank,
        pins: &PinAssignment,
        polarity: Polarity,
    ) -> Result<Self, PinError> {
        let mut output = |pin_num: u8, line: SignalLine| -> Result<Output<'static>, PinError> {
            let level = polarity.apply(line.idle_level());
            Ok(Output::new(bank.take(pin_num)?, gpio_level(level)))
        };

        Ok(Self {
            cs: output(pins.cs, SignalLine::ChipSelect)?,
            dc: output(pins.dc, SignalLine::DataCommand)?,
            reset: output(pins.reset, SignalLine::Reset)?,
            backlight: pins
                .backlight
                .map(|pin_num| output(pin_num, SignalLine::Backlight))
                .transpose()?,
        })
    }
}
