use super::*;
use crate::mock::{Event, RecordingTransport, Transaction};
use proptest::prelude::*;
use roundel_hal::{Stage, TransportError};

fn ready() -> Gc9a01<RecordingTransport> {
    let mut display = Gc9a01::new(RecordingTransport::new());
    display.initialize().unwrap();
    display.transport.clear();
    display
}

/// Ready engine with the trailing display-on command already closed
fn ready_idle() -> Gc9a01<RecordingTransport> {
    let mut display = ready();
    display.fill_rect(Rect::new(0, 0, 1, 1), Rgb565::BLACK).unwrap();
    display.transport.clear();
    display
}

fn tx(command: u8, data: &[u8]) -> Transaction {
    Transaction {
        command,
        data: data.to_vec(),
    }
}

fn pixels(color: Rgb565, count: usize) -> Vec<u8> {
    color.to_be_bytes().repeat(count)
}

#[test]
fn test_initialize_replays_script() {
    let mut display = Gc9a01::new(RecordingTransport::new());
    assert!(!display.is_initialized());
    display.initialize().unwrap();
    assert!(display.is_initialized());

    let expected: Vec<Transaction> = INIT_SEQUENCE
        .iter()
        .map(|step| tx(step.command, step.params))
        .collect();
    assert_eq!(display.transport.transactions(), expected);
}

#[test]
fn test_reset_pulse_timing() {
    let mut display = Gc9a01::new(RecordingTransport::new());
    display.initialize().unwrap();
    let t = &display.transport;

    let low = t.edges(SignalLine::Reset, Level::Low);
    let high = t.edges(SignalLine::Reset, Level::High);
    assert_eq!(low.len(), 1);
    assert_eq!(high.len(), 1);
    assert!(high[0] - low[0] >= 10_000);

    let first_command = t.first_command_after(high[0]).unwrap();
    assert!(first_command - high[0] >= 120_000);

    // Chip select goes low before the pulse and stays low through it
    let cs_low = t.edges(SignalLine::ChipSelect, Level::Low);
    assert!(cs_low[0] <= low[0]);
    assert!(t
        .edges(SignalLine::ChipSelect, Level::High)
        .iter()
        .all(|&at| at > high[0]));
}

#[test]
fn test_sleep_out_and_display_on_waits() {
    let mut display = Gc9a01::new(RecordingTransport::new());
    display.initialize().unwrap();
    let events = display.transport.events();

    let byte_at = |value: u8| {
        events
            .iter()
            .position(|e| matches!(e, Event::Byte { value: v, dc: Level::Low, .. } if *v == value))
            .unwrap()
    };
    let wait_after = |value: u8| {
        events[byte_at(value)..]
            .iter()
            .find(|e| matches!(e, Event::DelayMs(_)))
            .copied()
    };
    assert_eq!(events[byte_at(0x11) + 1], Event::DelayUs(1));
    assert_eq!(wait_after(0x11), Some(Event::DelayMs(120)));
    assert_eq!(wait_after(0x29), Some(Event::DelayMs(20)));
}

#[test]
fn test_command_with_data_framing() {
    let mut display = ready_idle();
    display.send(0x36, &[0x08]).unwrap();

    let cs = SignalLine::ChipSelect;
    let dc = SignalLine::DataCommand;
    assert_eq!(
        display.transport.events(),
        vec![
            Event::Signal(cs, Level::Low),
            Event::DelayUs(1),
            Event::Signal(dc, Level::Low),
            Event::DelayUs(1),
            Event::Byte {
                value: 0x36,
                dc: Level::Low,
                cs: Level::Low
            },
            Event::DelayUs(1),
            Event::Signal(dc, Level::High),
            Event::DelayUs(1),
            Event::Byte {
                value: 0x08,
                dc: Level::High,
                cs: Level::Low
            },
            Event::Idle,
            Event::DelayUs(2),
            Event::Signal(cs, Level::High),
            Event::DelayUs(10),
        ]
    );
}

#[test]
fn test_settle_after_every_command_byte() {
    let mut display = ready();
    display.fill_rect(Rect::new(0, 0, 4, 4), Rgb565::RED).unwrap();
    let events = display.transport.events();

    let mut commands = 0;
    for (i, event) in events.iter().enumerate() {
        if let Event::Byte { dc: Level::Low, .. } = event {
            commands += 1;
            assert_eq!(events[i + 1], Event::DelayUs(1), "no settle after {event:?}");
        }
    }
    assert_eq!(commands, 3);
}

#[test]
fn test_bare_command_closed_by_next_command() {
    let mut display = ready();
    // Display-on ends the script with chip select still low
    assert_eq!(display.transport.level(SignalLine::ChipSelect), Level::Low);

    display.write_command(0x21).unwrap();
    let events = display.transport.events();
    assert_eq!(
        events[..4],
        [
            Event::DelayUs(2),
            Event::Signal(SignalLine::ChipSelect, Level::High),
            Event::DelayUs(10),
            Event::Signal(SignalLine::ChipSelect, Level::Low),
        ]
    );
}

#[test]
fn test_set_window_full_panel() {
    let mut display = ready_idle();
    display.set_window(Rect::new(0, 0, 240, 240)).unwrap();

    assert_eq!(
        display.transport.transactions(),
        vec![
            tx(0x2A, &[0x00, 0x00, 0x00, 0xEF]),
            tx(0x2B, &[0x00, 0x00, 0x00, 0xEF]),
            tx(0x2C, &[]),
        ]
    );
    // Memory write stays open for pixel data
    assert_eq!(display.transport.level(SignalLine::ChipSelect), Level::Low);
    assert_eq!(display.transport.level(SignalLine::DataCommand), Level::Low);
}

#[test]
fn test_set_window_clamps() {
    let mut display = ready_idle();
    display.set_window(Rect::new(200, 230, 400, 400)).unwrap();

    let txs = display.transport.transactions();
    assert_eq!(txs[0], tx(0x2A, &[0x00, 200, 0x00, 239]));
    assert_eq!(txs[1], tx(0x2B, &[0x00, 230, 0x00, 239]));

    display.transport.clear();
    display.set_window(Rect::new(240, 0, 250, 10)).unwrap();
    assert!(display.transport.records.is_empty());
}

#[test]
fn test_fill_rect_streams_pixel_pairs() {
    let mut display = ready_idle();
    display
        .fill_rect(Rect::new(10, 10, 20, 20), Rgb565::GREEN)
        .unwrap();

    assert_eq!(
        display.transport.transactions(),
        vec![
            tx(0x2A, &[0x00, 10, 0x00, 19]),
            tx(0x2B, &[0x00, 10, 0x00, 19]),
            tx(0x2C, &pixels(Rgb565::GREEN, 100)),
        ]
    );
}

#[test]
fn test_fill_burst_holds_chip_select() {
    let mut display = ready_idle();
    display.fill_rect(Rect::new(0, 0, 40, 3), Rgb565::RED).unwrap();
    let events = display.transport.events();

    let ramwr = events
        .iter()
        .position(|e| matches!(e, Event::Byte { value: 0x2C, dc: Level::Low, .. }))
        .unwrap();
    let burst = &events[ramwr..];
    let last_byte = burst
        .iter()
        .rposition(|e| matches!(e, Event::Byte { .. }))
        .unwrap();
    let rises: Vec<usize> = burst
        .iter()
        .enumerate()
        .filter(|(_, e)| **e == Event::Signal(SignalLine::ChipSelect, Level::High))
        .map(|(i, _)| i)
        .collect();

    assert_eq!(rises.len(), 1);
    assert!(rises[0] > last_byte);
    // Drained before release
    assert!(burst[last_byte..rises[0]].contains(&Event::Idle));
    // Data mode selected once for the whole burst
    let dc_high = burst
        .iter()
        .filter(|e| **e == Event::Signal(SignalLine::DataCommand, Level::High))
        .count();
    assert_eq!(dc_high, 1);
}

#[test]
fn test_oversized_fill_is_clamped() {
    let mut display = ready_idle();
    display
        .fill_rect(Rect::new(230, 235, 300, 300), Rgb565::BLUE)
        .unwrap();

    let txs = display.transport.transactions();
    assert_eq!(txs[0], tx(0x2A, &[0x00, 230, 0x00, 239]));
    assert_eq!(txs[1], tx(0x2B, &[0x00, 235, 0x00, 239]));
    assert_eq!(txs[2].data.len(), 2 * 10 * 5);
}

#[test]
fn test_empty_fills_send_nothing() {
    let mut display = ready_idle();
    display
        .fill_rect(Rect::new(50, 50, 50, 80), Rgb565::WHITE)
        .unwrap();
    display
        .fill_rect(Rect::new(10, 300, 20, 310), Rgb565::WHITE)
        .unwrap();
    assert!(display.transport.bytes().is_empty());
    assert!(display.transport.records.is_empty());
}

#[test]
fn test_drawing_before_initialize() {
    let mut display = Gc9a01::new(RecordingTransport::new());
    let r = Rect::new(0, 0, 10, 10);

    assert_eq!(display.fill_rect(r, Rgb565::RED), Err(Error::NotInitialized));
    assert_eq!(display.fill_screen(Rgb565::RED), Err(Error::NotInitialized));
    assert_eq!(display.set_window(r), Err(Error::NotInitialized));
    assert!(display.transport.records.is_empty());
}

#[test]
fn test_data_without_command() {
    let mut display = Gc9a01::new(RecordingTransport::new());
    assert_eq!(display.write_data(&[0x00]), Err(Error::NoOpenCommand));

    let mut display = ready_idle();
    assert_eq!(display.write_data(&[0x00]), Err(Error::NoOpenCommand));
    assert!(display.transport.records.is_empty());
}

#[test]
fn test_reset_requires_reinitialize() {
    let mut display = ready();
    display.reset().unwrap();
    assert!(!display.is_initialized());
    assert_eq!(
        display.fill_screen(Rgb565::BLACK),
        Err(Error::NotInitialized)
    );
}

#[test]
fn test_transport_timeout_aborts_initialize() {
    let mut display = Gc9a01::new(RecordingTransport::new().fail_at_byte(5));
    assert_eq!(
        display.initialize(),
        Err(Error::Transport(TransportError::Timeout(Stage::TxComplete)))
    );
    assert!(!display.is_initialized());
    assert_eq!(
        display.fill_screen(Rgb565::BLACK),
        Err(Error::NotInitialized)
    );

    // The failure was transient; a fresh initialize recovers
    display.transport.clear();
    display.initialize().unwrap();
    assert!(display.is_initialized());
    assert_eq!(display.transport.transactions().len(), INIT_SEQUENCE.len());
}

#[test]
fn test_fill_recovers_after_timeout_mid_burst() {
    let mut display = ready_idle();
    let square = Rect::with_size(0, 0, 2, 2);

    // CASET and RASET are five bytes each, RAMWR one; fail on the
    // second pixel
    display.transport.fail_after(11 + 2);
    assert_eq!(
        display.fill_rect(square, Rgb565::BLUE),
        Err(Error::Transport(TransportError::Timeout(Stage::TxComplete)))
    );
    assert_eq!(display.transport.level(SignalLine::ChipSelect), Level::Low);
    assert!(display.is_initialized());

    display.transport.clear();
    display.fill_rect(square, Rgb565::BLUE).unwrap();
    let events = display.transport.events();
    // The broken memory write is closed before the new window is set
    assert_eq!(
        events[..4],
        [
            Event::DelayUs(2),
            Event::Signal(SignalLine::ChipSelect, Level::High),
            Event::DelayUs(10),
            Event::Signal(SignalLine::ChipSelect, Level::Low),
        ]
    );
    assert_eq!(
        display.transport.transactions(),
        vec![
            tx(0x2A, &[0x00, 0x00, 0x00, 0x01]),
            tx(0x2B, &[0x00, 0x00, 0x00, 0x01]),
            tx(0x2C, &pixels(Rgb565::BLUE, 4)),
        ]
    );
    assert_eq!(display.transport.level(SignalLine::ChipSelect), Level::High);
}

#[test]
fn test_backlight() {
    let mut display = Gc9a01::new(RecordingTransport::new());
    display.set_backlight(false).unwrap();
    assert_eq!(display.transport.level(SignalLine::Backlight), Level::Low);
    display.set_backlight(true).unwrap();
    assert_eq!(display.transport.level(SignalLine::Backlight), Level::High);
}

#[test]
fn test_config_caps_and_sanitizes() {
    let timing = Timing {
        reset_recovery_ms: 5,
        ..Timing::default()
    };
    let panel = PanelConfig {
        width: 300,
        height: 64,
    };
    let display = Gc9a01::with_config(RecordingTransport::new(), panel, timing);
    assert_eq!(display.timing().reset_recovery_ms, 120);
    assert_eq!(PanelDriver::size(&display), (240, 64));
}

#[test]
fn test_small_panel_fill_screen() {
    let panel = PanelConfig {
        width: 128,
        height: 64,
    };
    let mut display = Gc9a01::with_config(RecordingTransport::new(), panel, Timing::default());
    display.initialize().unwrap();
    display.transport.clear();

    display.fill_screen(Rgb565::CYAN).unwrap();
    let txs = display.transport.transactions();
    assert_eq!(txs[0], tx(0x2A, &[0x00, 0x00, 0x00, 127]));
    assert_eq!(txs[1], tx(0x2B, &[0x00, 0x00, 0x00, 63]));
    assert_eq!(txs[2].data, pixels(Rgb565::CYAN, 128 * 64));
}

#[test]
fn test_initialize_fill_scenario() {
    let mut display = Gc9a01::new(RecordingTransport::new());
    display.initialize().unwrap();
    display.fill_screen(Rgb565::new(0xF800)).unwrap();
    display
        .fill_rect(Rect::new(10, 10, 20, 20), Rgb565::new(0x07E0))
        .unwrap();

    let txs = display.transport.transactions();
    let n = INIT_SEQUENCE.len();
    assert_eq!(txs.len(), n + 6);
    for (step, got) in INIT_SEQUENCE.iter().zip(&txs) {
        assert_eq!(*got, tx(step.command, step.params));
    }
    assert_eq!(
        txs[n..],
        [
            tx(0x2A, &[0x00, 0x00, 0x00, 0xEF]),
            tx(0x2B, &[0x00, 0x00, 0x00, 0xEF]),
            tx(0x2C, &pixels(Rgb565::RED, 240 * 240)),
            tx(0x2A, &[0x00, 10, 0x00, 19]),
            tx(0x2B, &[0x00, 10, 0x00, 19]),
            tx(0x2C, &pixels(Rgb565::GREEN, 100)),
        ]
    );
}

#[test]
fn test_usable_through_panel_trait() {
    fn paint<P: PanelDriver>(panel: &mut P) -> Result<(), P::Error> {
        panel.initialize()?;
        panel.fill_rect(Rect::new(0, 0, 2, 2), Rgb565::WHITE)
    }

    let mut display = Gc9a01::new(RecordingTransport::new());
    paint(&mut display).unwrap();
    let last = display.transport.transactions().pop().unwrap();
    assert_eq!(last, tx(0x2C, &[0xFF; 8]));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn fill_sends_two_bytes_per_pixel(
        x0 in 0u16..120, y0 in 0u16..120, w in 0u16..40, h in 0u16..40, raw: u16,
    ) {
        let mut display = ready_idle();
        let color = Rgb565::new(raw);
        display.fill_rect(Rect::with_size(x0, y0, w, h), color).unwrap();

        let txs = display.transport.transactions();
        if w == 0 || h == 0 {
            prop_assert!(txs.is_empty());
        } else {
            prop_assert_eq!(txs.len(), 3);
            let data = &txs[2].data;
            prop_assert_eq!(data.len(), 2 * w as usize * h as usize);
            for pair in data.chunks_exact(2) {
                prop_assert_eq!(pair, &[(raw >> 8) as u8, (raw & 0xFF) as u8][..]);
            }
        }
    }

    #[test]
    fn oversized_fill_matches_edge_fill(x0 in 200u16..245, y0 in 200u16..245) {
        let mut over = ready_idle();
        let mut edge = ready_idle();
        over.fill_rect(Rect::new(x0, y0, 300, 300), Rgb565::MAGENTA).unwrap();
        edge.fill_rect(Rect::new(x0, y0, 240, 240), Rgb565::MAGENTA).unwrap();
        prop_assert_eq!(over.transport.events(), edge.transport.events());
    }
}
