//! Parser for the embedded display configuration
//!
//! Handles only the TOML subset the firmware ships with:
//! - `[panel]`, `[spi]`, `[pins]` and `[timing]` section headers
//! - `key = value` pairs with integer, boolean or quoted string values
//! - Pin strings like `"gpio17"`, and `"none"` for an absent backlight
//! - Comments (`# ...`), whole-line or trailing
//!
//! Missing sections and keys keep their defaults. Unknown sections and
//! keys are errors so typos do not silently fall back to a default.

use super::types::{DisplayConfig, MAX_PANEL_DIM};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Line is not `key = value`, or the value has the wrong type
    InvalidValue,
    /// Pin string is not `gpioN`
    InvalidPin,
    /// Value parsed but is outside the accepted range
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Panel,
    Spi,
    Pins,
    Timing,
}

/// Parse configuration text into a [`DisplayConfig`]
pub fn parse_config(input: &str) -> Result<DisplayConfig, ParseError> {
    let mut config = DisplayConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(&mut config, section, key, value)?;
    }

    validate(&config)?;
    Ok(config)
}

fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let header = strip_comment(line)
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?;

    match header.trim() {
        "panel" => Ok(Section::Panel),
        "spi" => Ok(Section::Spi),
        "pins" => Ok(Section::Pins),
        "timing" => Ok(Section::Timing),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing comment unless the `#` sits inside a string
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) if line[..pos].matches('"').count() % 2 == 0 => line[..pos].trim(),
        _ => line.trim(),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(&line[eq_pos + 1..]);

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Remove surrounding quotes, if any
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse an unsigned integer, allowing `_` digit separators
fn parse_int<T: TryFrom<u64>>(value: &str) -> Result<T, ParseError> {
    if value.is_empty() || value.starts_with('_') {
        return Err(ParseError::InvalidValue);
    }
    let mut acc: u64 = 0;
    for c in value.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(10).ok_or(ParseError::InvalidValue)?;
        acc = acc
            .checked_mul(10)
            .and_then(|a| a.checked_add(u64::from(digit)))
            .ok_or(ParseError::OutOfRange)?;
    }
    T::try_from(acc).map_err(|_| ParseError::OutOfRange)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a pin string like "gpio17"
fn parse_pin(value: &str) -> Result<u8, ParseError> {
    parse_string(value)
        .strip_prefix("gpio")
        .ok_or(ParseError::InvalidPin)?
        .parse()
        .map_err(|_| ParseError::InvalidPin)
}

/// Parse an optional pin: "gpioN" or "none"
fn parse_optional_pin(value: &str) -> Result<Option<u8>, ParseError> {
    if parse_string(value) == "none" {
        Ok(None)
    } else {
        parse_pin(value).map(Some)
    }
}

fn apply_value(
    config: &mut DisplayConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::UnknownKey),
        Section::Panel => match key {
            "width" => config.panel.width = parse_int(value)?,
            "height" => config.panel.height = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Spi => match key {
            "frequency_hz" => config.spi.frequency_hz = parse_int(value)?,
            "mode" => config.spi.mode = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Pins => match key {
            "reset" => config.pins.reset = parse_pin(value)?,
            "dc" => config.pins.dc = parse_pin(value)?,
            "cs" => config.pins.cs = parse_pin(value)?,
            "backlight" => config.pins.backlight = parse_optional_pin(value)?,
            "sck" => config.pins.sck = parse_pin(value)?,
            "mosi" => config.pins.mosi = parse_pin(value)?,
            "inverted" => config.inverted = parse_bool(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Timing => {
            let timing = &mut config.timing;
            let slot = match key {
                "settle_us" => &mut timing.settle_us,
                "release_us" => &mut timing.release_us,
                "gap_us" => &mut timing.gap_us,
                "select_ms" => &mut timing.select_ms,
                "reset_hold_ms" => &mut timing.reset_hold_ms,
                "reset_recovery_ms" => &mut timing.reset_recovery_ms,
                "sleep_out_ms" => &mut timing.sleep_out_ms,
                "display_on_ms" => &mut timing.display_on_ms,
                _ => return Err(ParseError::UnknownKey),
            };
            *slot = parse_int(value)?;
        }
    }
    Ok(())
}

fn validate(config: &DisplayConfig) -> Result<(), ParseError> {
    let dims_ok = |d: u16| (1..=MAX_PANEL_DIM).contains(&d);
    if !dims_ok(config.panel.width) || !dims_ok(config.panel.height) {
        return Err(ParseError::OutOfRange);
    }
    if config.spi.mode > 3 || config.spi.frequency_hz == 0 {
        return Err(ParseError::OutOfRange);
    }
    Ok(())
}
