//! Board-agnostic core types for Roundel displays
//!
//! Nothing in this crate touches hardware:
//!
//! - RGB565 colors and named constants
//! - Rectangles and clamping to the visible panel
//! - Display configuration types, the embedded config parser and wiring
//!   validation
//! - The drawing trait that controller engines implement

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod geometry;
pub mod traits;

pub use color::Rgb565;
pub use geometry::{Rect, HEIGHT, WIDTH};
