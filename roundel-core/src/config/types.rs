//! Configuration types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{HEIGHT, WIDTH};

/// Largest panel dimension the single-byte window commands can address
pub const MAX_PANEL_DIM: u16 = 240;

/// Panel geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    pub width: u16,
    pub height: u16,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
        }
    }
}

/// Serial link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpiSettings {
    /// Clock frequency in Hz
    pub frequency_hz: u32,
    /// SPI mode number (0-3)
    pub mode: u8,
}

impl Default for SpiSettings {
    fn default() -> Self {
        Self {
            frequency_hz: 1_500_000,
            mode: 3,
        }
    }
}

/// GPIO numbers for every line the display uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinAssignment {
    /// Reset (RESX)
    pub reset: u8,
    /// Data/command select
    pub dc: u8,
    /// Chip select
    pub cs: u8,
    /// Backlight enable; `None` when hard-wired on
    pub backlight: Option<u8>,
    /// SPI clock
    pub sck: u8,
    /// SPI data out
    pub mosi: u8,
}

impl Default for PinAssignment {
    fn default() -> Self {
        Self {
            reset: 21,
            dc: 20,
            cs: 17,
            backlight: Some(22),
            sck: 18,
            mosi: 19,
        }
    }
}

impl PinAssignment {
    /// Every pin in use, backlight last when present
    pub fn iter(&self) -> impl Iterator<Item = u8> {
        [self.reset, self.dc, self.cs, self.sck, self.mosi]
            .into_iter()
            .chain(self.backlight)
    }
}

/// Bus and reset timing
///
/// Microsecond values pace individual transactions, millisecond values
/// pace the reset pulse and the init script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timing {
    /// Settle time after a chip-select or data/command transition
    pub settle_us: u32,
    /// Hold time between the last byte and releasing chip select
    pub release_us: u32,
    /// Minimum gap after chip select goes high
    pub gap_us: u32,
    /// Chip select held low before the reset pulse
    pub select_ms: u32,
    /// Reset held low
    pub reset_hold_ms: u32,
    /// Wait after reset is released
    pub reset_recovery_ms: u32,
    /// Wait after sleep-out
    pub sleep_out_ms: u32,
    /// Wait after display-on
    pub display_on_ms: u32,
}

impl Timing {
    pub const MIN_SETTLE_US: u32 = 1;
    pub const MIN_RESET_HOLD_MS: u32 = 10;
    pub const MIN_RESET_RECOVERY_MS: u32 = 120;
    pub const MIN_SLEEP_OUT_MS: u32 = 120;
    pub const MIN_DISPLAY_ON_MS: u32 = 20;

    /// Raise every value to the controller minimum
    pub fn sanitized(self) -> Self {
        Self {
            settle_us: self.settle_us.max(Self::MIN_SETTLE_US),
            release_us: self.release_us.max(Self::MIN_SETTLE_US),
            gap_us: self.gap_us.max(Self::MIN_SETTLE_US),
            select_ms: self.select_ms,
            reset_hold_ms: self.reset_hold_ms.max(Self::MIN_RESET_HOLD_MS),
            reset_recovery_ms: self.reset_recovery_ms.max(Self::MIN_RESET_RECOVERY_MS),
            sleep_out_ms: self.sleep_out_ms.max(Self::MIN_SLEEP_OUT_MS),
            display_on_ms: self.display_on_ms.max(Self::MIN_DISPLAY_ON_MS),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle_us: 1,
            release_us: 2,
            gap_us: 10,
            select_ms: 100,
            reset_hold_ms: 100,
            reset_recovery_ms: 120,
            sleep_out_ms: 120,
            display_on_ms: 20,
        }
    }
}

/// Complete configuration for one display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    pub panel: PanelConfig,
    pub spi: SpiSettings,
    pub pins: PinAssignment,
    /// Every control line is active-low on this board
    pub inverted: bool,
    pub timing: Timing,
}
