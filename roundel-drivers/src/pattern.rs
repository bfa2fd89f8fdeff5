//! Bring-up test patterns
//!
//! Simple fills that make framing and addressing faults obvious on the
//! glass: a wrong window shows as misplaced squares, a dropped byte as
//! torn stripes.

use roundel_core::traits::PanelDriver;
use roundel_core::{Rect, Rgb565};

/// Bands in the stripe pattern
pub const STRIPE_BANDS: u16 = 8;

/// Horizontal white/black stripes
///
/// Each band fill spans two band heights and the next band overdraws the
/// lower half, so the last band runs off the panel and gets clamped.
pub fn stripes<P: PanelDriver>(panel: &mut P) -> Result<(), P::Error> {
    let (width, height) = panel.size();
    let band = height / STRIPE_BANDS;

    for i in 0..STRIPE_BANDS {
        let color = if i % 2 == 0 {
            Rgb565::WHITE
        } else {
            Rgb565::BLACK
        };
        let y0 = i.saturating_mul(band);
        let y1 = y0.saturating_add(band.saturating_mul(2));
        panel.fill_rect(Rect::new(0, y0, width, y1), color)?;
    }
    Ok(())
}

/// Small squares at fixed positions, including an overlapping pair
pub fn squares<P: PanelDriver>(panel: &mut P, color: Rgb565) -> Result<(), P::Error> {
    panel.fill_rect(Rect::with_size(10, 10, 10, 10), color)?;
    panel.fill_rect(Rect::with_size(100, 100, 10, 10), color)?;
    panel.fill_rect(Rect::new(50, 50, 100, 100), color)
}
