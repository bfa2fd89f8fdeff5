//! Control signal abstractions
//!
//! A display controller on a 4-wire serial bus is steered by four discrete
//! outputs besides the clock and data lines. The protocol engine only ever
//! speaks in *logical* levels; the adapter maps them onto the physical pin
//! through a single [`Polarity`] policy so boards with hardware inverters
//! need no change above the adapter.

/// One of the discrete control outputs wired to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalLine {
    /// Hardware reset (RESX), active low
    Reset,
    /// Data/command select: low = command, high = data
    DataCommand,
    /// Chip select, active low
    ChipSelect,
    /// Backlight enable, high = on
    Backlight,
}

impl SignalLine {
    /// All lines, in the order adapters park them at start-up
    pub const ALL: [SignalLine; 4] = [
        SignalLine::ChipSelect,
        SignalLine::DataCommand,
        SignalLine::Reset,
        SignalLine::Backlight,
    ];

    /// Logical level the line rests at when nothing is happening
    ///
    /// - Reset: high (not resetting)
    /// - Chip select: high (deselected)
    /// - Data/command: low (command mode)
    /// - Backlight: high (on)
    pub const fn idle_level(self) -> Level {
        match self {
            SignalLine::Reset => Level::High,
            SignalLine::DataCommand => Level::Low,
            SignalLine::ChipSelect => Level::High,
            SignalLine::Backlight => Level::High,
        }
    }
}

/// Logical signal level as seen by the display controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Whether this is logic 1
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// The opposite level
    pub const fn inverted(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Inversion policy applied to every control line
///
/// Set to [`Polarity::Inverted`] only if the control lines themselves pass
/// through hardware inverters between the MCU and the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Physical level equals logical level
    #[default]
    Normal,
    /// Physical level is the complement of the logical level
    Inverted,
}

impl Polarity {
    /// Build the policy from the single global inversion flag
    pub const fn from_inverted(inverted: bool) -> Self {
        if inverted {
            Polarity::Inverted
        } else {
            Polarity::Normal
        }
    }

    /// Map a logical level onto the level that must be driven on the pin
    pub const fn apply(self, level: Level) -> Level {
        match self {
            Polarity::Normal => level,
            Polarity::Inverted => level.inverted(),
        }
    }
}
