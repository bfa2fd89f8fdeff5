//! 16-bit RGB565 colors
//!
//! Layout is 5 bits red, 6 bits green, 5 bits blue, red in the most
//! significant bits. On the wire a pixel is the high byte then the low byte.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One RGB565 pixel value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb565(u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);
    pub const RED: Self = Self(0xF800);
    pub const GREEN: Self = Self(0x07E0);
    pub const BLUE: Self = Self(0x001F);
    pub const YELLOW: Self = Self(0xFFE0);
    pub const CYAN: Self = Self(0x07FF);
    pub const MAGENTA: Self = Self(0xF81F);

    /// Wrap a raw 16-bit value
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Build from channel values already in 5/6/5-bit range
    ///
    /// Out-of-range bits are masked off.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = (r as u16 & 0x1F) << 11;
        let g = (g as u16 & 0x3F) << 5;
        let b = b as u16 & 0x1F;
        Self(r | g | b)
    }

    /// Build from 8-bit channels, dropping the low bits of each
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgb(r >> 3, g >> 2, b >> 3)
    }

    /// Raw 16-bit value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Transmission order: high byte first
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Red channel (0-31)
    pub const fn red(self) -> u8 {
        (self.0 >> 11) as u8
    }

    /// Green channel (0-63)
    pub const fn green(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    /// Blue channel (0-31)
    pub const fn blue(self) -> u8 {
        (self.0 & 0x1F) as u8
    }
}

impl From<u16> for Rgb565 {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Rgb565> for u16 {
    fn from(color: Rgb565) -> Self {
        color.0
    }
}

#[cfg(feature = "embedded-graphics")]
impl From<embedded_graphics_core::pixelcolor::Rgb565> for Rgb565 {
    fn from(color: embedded_graphics_core::pixelcolor::Rgb565) -> Self {
        use embedded_graphics_core::pixelcolor::IntoStorage;
        Self(color.into_storage())
    }
}
