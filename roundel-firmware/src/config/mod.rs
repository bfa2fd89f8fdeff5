//! Configuration loading
//!
//! Parses the display config embedded at build time. A config that fails
//! to parse or wires pins the board cannot provide falls back to the
//! reference board defaults, so the panel still comes up.

use defmt::*;

use roundel_core::config::{parse_config, validate_assignment, DisplayConfig, PinAssignment};

/// SPI0 clock pin the firmware wires up
pub const SCK_PIN: u8 = 18;

/// SPI0 data pin the firmware wires up
pub const MOSI_PIN: u8 = 19;

/// Parse and check the embedded configuration
pub fn load(source: &str) -> DisplayConfig {
    let mut config = match parse_config(source) {
        Ok(config) => {
            info!("Display config loaded");
            config
        }
        Err(e) => {
            warn!("Display config invalid ({}), using defaults", e);
            DisplayConfig::default()
        }
    };

    if config.pins.sck != SCK_PIN || config.pins.mosi != MOSI_PIN {
        warn!(
            "SPI pins gpio{}/gpio{} not supported, using gpio{}/gpio{}",
            config.pins.sck, config.pins.mosi, SCK_PIN, MOSI_PIN
        );
        config.pins.sck = SCK_PIN;
        config.pins.mosi = MOSI_PIN;
    }

    if let Err(e) = validate_assignment(&config.pins) {
        warn!("Pin assignment rejected ({}), using default wiring", e);
        config.pins = PinAssignment::default();
    }

    info!(
        "Panel {}x{}, SPI {} Hz mode {}, inverted={}",
        config.panel.width,
        config.panel.height,
        config.spi.frequency_hz,
        config.spi.mode,
        config.inverted
    );
    config
}
