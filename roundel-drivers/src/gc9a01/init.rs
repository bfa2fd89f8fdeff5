//! Power-on register script
//!
//! Replayed verbatim after every hardware reset. Most entries program
//! undocumented vendor registers (gamma, power and timing trims); the
//! values are the panel vendor's and must not be reordered.

use super::cmd;

/// Wait required after a step before the next command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    None,
    /// Sleep-out recovery
    SleepOut,
    /// Display-on settling
    DisplayOn,
}

/// One command of the script and its parameter bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitStep {
    pub command: u8,
    pub params: &'static [u8],
    pub pause: Pause,
}

const fn step(command: u8, params: &'static [u8]) -> InitStep {
    InitStep {
        command,
        params,
        pause: Pause::None,
    }
}

const fn step_then(command: u8, pause: Pause) -> InitStep {
    InitStep {
        command,
        params: &[],
        pause,
    }
}

pub static INIT_SEQUENCE: &[InitStep] = &[
    step(cmd::INTER_REGISTER_ENABLE_2, &[]),
    step(0xEB, &[0x14]),
    step(cmd::INTER_REGISTER_ENABLE_1, &[]),
    step(cmd::INTER_REGISTER_ENABLE_2, &[]),
    step(0xEB, &[0x14]),
    step(0x84, &[0x40]),
    step(0x85, &[0xFF]),
    step(0x86, &[0xFF]),
    step(0x87, &[0xFF]),
    step(0x88, &[0x0A]),
    step(0x89, &[0x21]),
    step(0x8A, &[0x00]),
    step(0x8B, &[0x80]),
    step(0x8C, &[0x01]),
    step(0x8D, &[0x01]),
    step(0x8E, &[0xFF]),
    step(0x8F, &[0xFF]),
    // Display function control
    step(0xB6, &[0x00, 0x20]),
    step(cmd::MEMORY_ACCESS_CONTROL, &[0x08]),
    // 16 bits per pixel
    step(cmd::PIXEL_FORMAT, &[0x05]),
    step(0x90, &[0x08, 0x08, 0x08, 0x08]),
    step(0xBD, &[0x06]),
    step(0xBC, &[0x00]),
    step(0xFF, &[0x60, 0x01, 0x04]),
    // Power control 2-4
    step(0xC3, &[0x13]),
    step(0xC4, &[0x13]),
    step(0xC9, &[0x22]),
    step(0xBE, &[0x11]),
    step(0xE1, &[0x10, 0x0E]),
    step(0xDF, &[0x21, 0x0C, 0x02]),
    // Gamma
    step(0xF0, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    step(0xF1, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    step(0xF2, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    step(0xF3, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    step(0xED, &[0x1B, 0x0B]),
    step(0xAE, &[0x77]),
    step(0xCD, &[0x63]),
    step(0x70, &[0x07, 0x07, 0x04, 0x0E, 0x0F, 0x09, 0x07, 0x08, 0x03]),
    // Frame rate
    step(0xE8, &[0x34]),
    step(
        0x62,
        &[0x18, 0x0D, 0x71, 0xED, 0x70, 0x70, 0x18, 0x0F, 0x71, 0xEF, 0x70, 0x70],
    ),
    step(
        0x63,
        &[0x18, 0x11, 0x71, 0xF1, 0x70, 0x70, 0x18, 0x13, 0x71, 0xF3, 0x70, 0x70],
    ),
    step(0x64, &[0x28, 0x29, 0xF1, 0x01, 0xF1, 0x00, 0x07]),
    step(0x66, &[0x3C, 0x00, 0xCD, 0x67, 0x45, 0x45, 0x10, 0x00, 0x00, 0x00]),
    step(0x67, &[0x00, 0x3C, 0x00, 0x00, 0x00, 0x01, 0x54, 0x10, 0x32, 0x98]),
    step(0x74, &[0x10, 0x85, 0x80, 0x00, 0x00, 0x4E, 0x00]),
    step(0x98, &[0x3E, 0x07]),
    step(cmd::TEARING_EFFECT_ON, &[]),
    step(cmd::INVERSION_ON, &[]),
    step_then(cmd::SLEEP_OUT, Pause::SleepOut),
    step_then(cmd::DISPLAY_ON, Pause::DisplayOn),
];
