//! Display configuration
//!
//! Board wiring and timing for one panel, parsed from the TOML subset the
//! firmware embeds at build time, plus the checks that keep the wiring
//! within what the RP2040 can provide.

pub mod parse;
pub mod types;
pub mod wiring;

pub use parse::{parse_config, ParseError};
pub use types::*;
pub use wiring::{validate_assignment, GpioAllocator, WiringError, GPIO_COUNT};
