//! GPIO allocation and wiring validation
//!
//! Tracks which GPIO pins are in use so a config cannot wire two display
//! lines to the same pin, and checks the bus pins against the RP2040
//! SPI0 pinout.

use heapless::FnvIndexSet;

use super::types::PinAssignment;

/// Number of GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// Pins that can carry SPI0 SCK
pub const SPI0_SCK_PINS: [u8; 4] = [2, 6, 18, 22];

/// Pins that can carry SPI0 TX (MOSI)
pub const SPI0_MOSI_PINS: [u8; 4] = [3, 7, 19, 23];

/// Why a wiring was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WiringError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Two lines share a pin
    AlreadyTaken,
    /// Pin cannot carry the SPI0 signal it is assigned to
    NotSpiCapable,
}

/// GPIO allocator to track pin usage
pub struct GpioAllocator {
    allocated: FnvIndexSet<u8, 32>,
}

impl Default for GpioAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioAllocator {
    pub fn new() -> Self {
        Self {
            allocated: FnvIndexSet::new(),
        }
    }

    /// Claim a pin; fails if it is out of range or already claimed
    pub fn allocate(&mut self, pin: u8) -> Result<(), WiringError> {
        if pin >= GPIO_COUNT {
            return Err(WiringError::InvalidPin);
        }
        if self.allocated.contains(&pin) {
            return Err(WiringError::AlreadyTaken);
        }
        self.allocated
            .insert(pin)
            .map(|_| ())
            .map_err(|_| WiringError::InvalidPin)
    }

    pub fn release(&mut self, pin: u8) {
        self.allocated.remove(&pin);
    }

    pub fn is_allocated(&self, pin: u8) -> bool {
        self.allocated.contains(&pin)
    }

    pub fn allocated_count(&self) -> usize {
        self.allocated.len()
    }
}

/// Check a display wiring against the RP2040 pinout
///
/// Every pin must exist and be used once, and the bus pins must be ones
/// SPI0 can drive.
pub fn validate_assignment(pins: &PinAssignment) -> Result<(), WiringError> {
    let mut alloc = GpioAllocator::new();
    for pin in pins.iter() {
        alloc.allocate(pin)?;
    }

    if !SPI0_SCK_PINS.contains(&pins.sck) || !SPI0_MOSI_PINS.contains(&pins.mosi) {
        return Err(WiringError::NotSpiCapable);
    }
    Ok(())
}
