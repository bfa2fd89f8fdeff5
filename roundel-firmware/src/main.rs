//! Roundel - GC9A01 round display bring-up firmware
//!
//! Brings up a 240x240 GC9A01 panel on an RP2040 board from the wiring in
//! `display.toml`, then loops through a set of solid fills and stripes
//! that make framing or addressing faults visible on the glass.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::spi::Spi;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use roundel_core::Rgb565;
use roundel_drivers::gc9a01::Gc9a01;
use roundel_drivers::{pattern, SharedDisplay};
use roundel_hal::{Mode, Polarity, SpiConfig};
use roundel_hal_rp2040::{spi_config, ControlOutputs, PinBank, Rp2040Transport};

mod config;

/// Embedded display configuration (compiled into firmware)
/// Edit display.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../display.toml");

/// Pause between demo frames
const FRAME_MS: u64 = 1000;

type Display = SharedDisplay<CriticalSectionRawMutex, Gc9a01<Rp2040Transport<'static>>>;

static DISPLAY: StaticCell<Display> = StaticCell::new();

/// Move GPIOs into the pin bank by number
macro_rules! fill_bank {
    ($bank:expr, $p:expr, $($num:literal => $pin:ident),* $(,)?) => {
        $( $bank.insert($num, $p.$pin.into()); )*
    };
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Roundel firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load(EMBEDDED_CONFIG);

    let link = SpiConfig {
        frequency: config.spi.frequency_hz,
        mode: Mode::from_number(config.spi.mode).unwrap_or(Mode::Mode3),
    };
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config(&link));

    let mut bank = PinBank::new();
    fill_bank!(bank, p,
        0 => PIN_0, 1 => PIN_1, 2 => PIN_2, 3 => PIN_3, 4 => PIN_4,
        5 => PIN_5, 6 => PIN_6, 7 => PIN_7, 8 => PIN_8, 9 => PIN_9,
        10 => PIN_10, 11 => PIN_11, 12 => PIN_12, 13 => PIN_13, 14 => PIN_14,
        15 => PIN_15, 16 => PIN_16, 17 => PIN_17, 20 => PIN_20, 21 => PIN_21,
        22 => PIN_22, 23 => PIN_23, 24 => PIN_24, 25 => PIN_25, 26 => PIN_26,
        27 => PIN_27, 28 => PIN_28, 29 => PIN_29,
    );
    bank.reserve(config::SCK_PIN);
    bank.reserve(config::MOSI_PIN);

    let polarity = Polarity::from_inverted(config.inverted);
    let outputs = unwrap!(ControlOutputs::from_bank(&mut bank, &config.pins, polarity));
    let transport = unwrap!(Rp2040Transport::new(spi, outputs, polarity));
    info!("Transport ready");

    let engine = Gc9a01::with_config(transport, config.panel, config.timing);
    let display = DISPLAY.init(SharedDisplay::new(engine));

    spawner.spawn(demo_task(display)).unwrap();

    loop {
        Timer::after_secs(60).await;
    }
}

/// Initialize the panel, then cycle the bring-up fills forever
#[embassy_executor::task]
async fn demo_task(display: &'static Display) {
    while let Err(e) = display.initialize() {
        error!("Display init failed: {}", e);
        Timer::after_millis(FRAME_MS).await;
    }
    info!("Display initialized");

    loop {
        if let Err(e) = demo_cycle(display).await {
            warn!("Demo frame failed: {}, reinitializing", e);
            while let Err(e) = display.initialize() {
                error!("Display init failed: {}", e);
                Timer::after_millis(FRAME_MS).await;
            }
        }
    }
}

async fn demo_cycle(
    display: &'static Display,
) -> Result<(), roundel_drivers::Error<roundel_hal::TransportError>> {
    display.fill_screen(Rgb565::BLACK)?;
    Timer::after_millis(FRAME_MS).await;

    display.fill_screen(Rgb565::RED)?;
    display.with(|d| pattern::squares(d, Rgb565::GREEN))?;
    Timer::after_millis(FRAME_MS).await;

    for color in [Rgb565::BLUE, Rgb565::GREEN, Rgb565::WHITE, Rgb565::BLACK] {
        display.fill_screen(color)?;
        Timer::after_millis(FRAME_MS).await;
    }

    display.with(pattern::stripes)?;
    Timer::after_millis(FRAME_MS * 3).await;
    Ok(())
}
