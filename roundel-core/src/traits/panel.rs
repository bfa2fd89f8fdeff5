//! Panel driver trait for RGB565 displays

use crate::color::Rgb565;
use crate::geometry::Rect;

/// Trait for a display that accepts windowed solid fills
///
/// Rectangles are clamped to the panel; a rectangle with nothing visible
/// is a successful no-op, never an error.
pub trait PanelDriver {
    /// Error type for panel operations
    type Error;

    /// Visible size in pixels (width, height)
    fn size(&self) -> (u16, u16);

    /// Reset the controller and bring it to a drawable state
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Select the rectangle subsequent pixel data lands in
    fn set_window(&mut self, rect: Rect) -> Result<(), Self::Error>;

    /// Fill a rectangle with one color
    fn fill_rect(&mut self, rect: Rect, color: Rgb565) -> Result<(), Self::Error>;

    /// Fill the whole panel with one color
    fn fill_screen(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        let (width, height) = self.size();
        self.fill_rect(Rect::full(width, height), color)
    }
}
