//! Drawing traits
//!
//! The interface between application code and a display controller
//! engine.

pub mod panel;

pub use panel::PanelDriver;
