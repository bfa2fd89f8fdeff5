//! Roundel Hardware Abstraction Layer
//!
//! This crate defines the transport adapter that display controller
//! engines talk to. Chip-specific HALs implement [`TransportAdapter`]
//! so the same protocol engine can run on different microcontrollers,
//! or against a recording fake on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Protocol engine (roundel-drivers)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  roundel-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ EmbeddedHal-  │       │ roundel-hal-  │
//! │ Transport     │       │    rp2040     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`signal`] - The four control lines, logical levels and the inversion policy
//! - [`transport`] - The [`TransportAdapter`] trait and its error type
//! - [`retry`] - Bounded polling used by every busy-wait
//! - [`spi`] - Serial link configuration (clock rate, mode)
//! - [`embedded`] - Adapter over `embedded-hal` 1.0 bus, pin and delay traits

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod embedded;
pub mod retry;
pub mod signal;
pub mod spi;
pub mod transport;

// Re-export key types at crate root for convenience
pub use embedded::{ControlPins, EmbeddedHalTransport, NoBacklight};
pub use retry::{poll_until, Exhausted, DEFAULT_POLL_BUDGET};
pub use signal::{Level, Polarity, SignalLine};
pub use spi::{Mode, SpiConfig};
pub use transport::{Stage, TransportAdapter, TransportError};
