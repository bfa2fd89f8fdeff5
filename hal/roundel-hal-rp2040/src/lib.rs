//! RP2040 transport adapter for Roundel displays
//!
//! Implements [`roundel_hal::TransportAdapter`] on the RP2040's SPI0 with
//! bounded status polling, plus the board plumbing around it:
//!
//! - Config-driven control pin hand-out from a pin bank for a
//!   [`PinAssignment`]
//! - SPI peripheral configuration from [`roundel_hal::SpiConfig`]
//!
//! [`PinAssignment`]: roundel_core::config::PinAssignment

#![no_std]
#![deny(unsafe_code)]

pub mod pins;
pub mod transport;

pub use pins::{ControlOutputs, PinBank, PinError};
pub use transport::{spi_config, Rp2040Transport};
