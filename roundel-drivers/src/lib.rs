//! Display controller engines
//!
//! Implements the drawing trait from roundel-core on top of any
//! [`roundel_hal::TransportAdapter`]:
//!
//! - GC9A01 protocol engine (framing, reset, init script, window fill)
//! - Test patterns for panel bring-up
//! - Lock-protected display shared between tasks

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gc9a01;
pub mod pattern;
pub mod shared;

#[cfg(test)]
pub(crate) mod mock;

pub use gc9a01::{Error, Gc9a01};
pub use shared::SharedDisplay;
