//! Display shared between tasks
//!
//! The engine is not reentrant, and a window set by one producer must not
//! be followed by another producer's pixels. [`SharedDisplay`] holds the
//! lock for a whole addressing-plus-fill sequence so transactions never
//! interleave.
//!
//! ```ignore
//! static DISPLAY: StaticCell<SharedDisplay<CriticalSectionRawMutex, Gc9a01<Rp2040Transport>>> =
//!     StaticCell::new();
//!
//! display.fill_rect(Rect::new(0, 0, 20, 20), Rgb565::RED)?;
//! display.with(|d| {
//!     d.set_window(area)?;
//!     d.fill_rect(area, Rgb565::BLUE)
//! })?;
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use roundel_core::traits::PanelDriver;
use roundel_core::{Rect, Rgb565};

/// Panel driver behind a blocking mutex
pub struct SharedDisplay<M: RawMutex, D> {
    inner: Mutex<M, RefCell<D>>,
}

impl<M: RawMutex, D: PanelDriver> SharedDisplay<M, D> {
    pub const fn new(display: D) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(display)),
        }
    }

    /// Run several operations as one critical section
    ///
    /// Panics if called again from inside `f`.
    pub fn with<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    pub fn size(&self) -> (u16, u16) {
        self.inner.lock(|cell| cell.borrow().size())
    }

    pub fn initialize(&self) -> Result<(), D::Error> {
        self.with(|d| d.initialize())
    }

    pub fn fill_rect(&self, rect: Rect, color: Rgb565) -> Result<(), D::Error> {
        self.with(|d| d.fill_rect(rect, color))
    }

    pub fn fill_screen(&self, color: Rgb565) -> Result<(), D::Error> {
        self.with(|d| d.fill_screen(color))
    }

    /// Take the display back out
    pub fn into_inner(self) -> D {
        self.inner.into_inner().into_inner()
    }
}
