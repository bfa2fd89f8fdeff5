//! Panel rectangles
//!
//! Rectangles are half-open: columns `x0..x1`, rows `y0..y1`. Every
//! drawing request is clamped to the visible panel before anything is
//! sent, so out-of-range input shrinks or vanishes instead of failing.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Visible width of a GC9A01 panel in pixels
pub const WIDTH: u16 = 240;

/// Visible height of a GC9A01 panel in pixels
pub const HEIGHT: u16 = 240;

/// Half-open pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// First column
    pub x0: u16,
    /// First row
    pub y0: u16,
    /// One past the last column
    pub x1: u16,
    /// One past the last row
    pub y1: u16,
}

impl Rect {
    pub const fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// The whole `width` x `height` area
    pub const fn full(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Top-left corner plus size
    pub const fn with_size(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    pub const fn width(&self) -> u16 {
        self.x1.saturating_sub(self.x0)
    }

    pub const fn height(&self) -> u16 {
        self.y1.saturating_sub(self.y0)
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u32 {
        self.width() as u32 * self.height() as u32
    }

    /// True when no pixel is covered
    pub const fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    /// Restrict to a `width` x `height` panel
    ///
    /// Ends beyond the panel are pulled in to its edge. Returns `None` when
    /// nothing visible remains.
    pub fn clamped(&self, width: u16, height: u16) -> Option<Rect> {
        let clamped = Rect::new(
            self.x0,
            self.y0,
            self.x1.min(width),
            self.y1.min(height),
        );
        if clamped.is_empty() {
            None
        } else {
            Some(clamped)
        }
    }

    /// Inclusive last column, as the controller expects it
    ///
    /// Only meaningful for non-empty rectangles.
    pub const fn last_column(&self) -> u16 {
        self.x1 - 1
    }

    /// Inclusive last row
    pub const fn last_row(&self) -> u16 {
        self.y1 - 1
    }
}
