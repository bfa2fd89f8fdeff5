//! Build script for roundel-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Pins the firmware wires to SPI0
const SCK_PIN: i64 = 18;
const MOSI_PIN: i64 = 19;

/// Control pin keys in [pins]
const CONTROL_PINS: [&str; 3] = ["reset", "dc", "cs"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate display.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds display.toml for its panel wiring.          ║\n\
            ║  Please create one in the roundel-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read display.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in display.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_panel(&config, &mut errors);
    validate_spi(&config, &mut errors);
    validate_pins(&config, &mut errors);
    validate_timing(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid display configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=display.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Section as a table, or None when absent
fn section<'a>(
    config: &'a toml::Value,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a toml::value::Table> {
    match config.get(name) {
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
        None => None,
    }
}

fn check_keys(table: &toml::value::Table, name: &str, known: &[&str], errors: &mut Vec<String>) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", name, key));
        }
    }
}

fn check_range(
    table: &toml::value::Table,
    name: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", name, key, min, max));
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", name, key)),
        None => {}
    }
}

fn validate_panel(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(panel) = section(config, "panel", errors) else {
        return;
    };
    check_keys(panel, "panel", &["width", "height"], errors);
    check_range(panel, "panel", "width", 1, 240, errors);
    check_range(panel, "panel", "height", 1, 240, errors);
}

fn validate_spi(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(spi) = section(config, "spi", errors) else {
        return;
    };
    check_keys(spi, "spi", &["frequency_hz", "mode"], errors);
    check_range(spi, "spi", "frequency_hz", 1, 62_500_000, errors);
    check_range(spi, "spi", "mode", 0, 3, errors);
}

/// Parse "gpioN"
fn pin_number(value: &toml::Value) -> Option<i64> {
    value
        .as_str()?
        .strip_prefix("gpio")?
        .parse()
        .ok()
        .filter(|n| (0..30).contains(n))
}

fn validate_pins(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(pins) = section(config, "pins", errors) else {
        errors.push("Missing [pins] section - the panel wiring is required".into());
        return;
    };
    check_keys(
        pins,
        "pins",
        &["reset", "dc", "cs", "backlight", "sck", "mosi", "inverted"],
        errors,
    );

    let mut used: Vec<(String, i64)> = Vec::new();
    let mut claim = |key: &str, value: &toml::Value, errors: &mut Vec<String>| {
        match pin_number(value) {
            Some(n) => {
                if let Some((other, _)) = used.iter().find(|(_, m)| *m == n) {
                    errors.push(format!("[pins] {} and {} both use gpio{}", other, key, n));
                }
                used.push((key.to_string(), n));
                Some(n)
            }
            None => {
                errors.push(format!("[pins] {} must be \"gpio0\"-\"gpio29\"", key));
                None
            }
        }
    };

    for key in CONTROL_PINS {
        match pins.get(key) {
            Some(value) => {
                claim(key, value, errors);
            }
            None => errors.push(format!("[pins] missing '{}'", key)),
        }
    }

    match pins.get("backlight") {
        Some(toml::Value::String(s)) if s == "none" => {}
        Some(value) => {
            claim("backlight", value, errors);
        }
        None => {}
    }

    for (key, required) in [("sck", SCK_PIN), ("mosi", MOSI_PIN)] {
        if let Some(value) = pins.get(key) {
            if let Some(n) = claim(key, value, errors) {
                if n != required {
                    errors.push(format!("[pins] {} must be gpio{} (SPI0)", key, required));
                }
            }
        }
    }

    if let Some(inverted) = pins.get("inverted") {
        if !inverted.is_bool() {
            errors.push("[pins] inverted must be true or false".into());
        }
    }
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timing) = section(config, "timing", errors) else {
        return;
    };
    let keys = [
        "settle_us",
        "release_us",
        "gap_us",
        "select_ms",
        "reset_hold_ms",
        "reset_recovery_ms",
        "sleep_out_ms",
        "display_on_ms",
    ];
    check_keys(timing, "timing", &keys, errors);
    for key in keys {
        check_range(timing, "timing", key, 0, 10_000, errors);
    }
}
