//! Recording transport for host tests
//!
//! Captures every signal transition, byte, idle wait and delay together
//! with the simulated time it happened at. Delays advance the clock; bytes
//! and signal changes take no time.

use roundel_hal::{Level, SignalLine, Stage, TransportAdapter, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Signal(SignalLine, Level),
    /// A byte on the wire with the DC and CS levels in effect
    Byte { value: u8, dc: Level, cs: Level },
    Idle,
    DelayMs(u32),
    DelayUs(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub at_us: u64,
    pub event: Event,
}

/// One command byte and the data bytes sent after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub command: u8,
    pub data: Vec<u8>,
}

pub struct RecordingTransport {
    pub records: Vec<Record>,
    levels: [Level; 4],
    now_us: u64,
    bytes_sent: usize,
    fail_at_byte: Option<usize>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            levels: [Level::High, Level::Low, Level::High, Level::High],
            now_us: 0,
            bytes_sent: 0,
            fail_at_byte: None,
        }
    }

    /// Time out once, on the `n`th byte (0-based)
    pub fn fail_at_byte(mut self, n: usize) -> Self {
        self.fail_at_byte = Some(n);
        self
    }

    /// Time out once, `n` bytes from now
    pub fn fail_after(&mut self, n: usize) {
        self.fail_at_byte = Some(self.bytes_sent + n);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn level(&self, line: SignalLine) -> Level {
        self.levels[line as usize]
    }

    pub fn events(&self) -> Vec<Event> {
        self.records.iter().map(|r| r.event).collect()
    }

    /// Every byte written, in order
    pub fn bytes(&self) -> Vec<u8> {
        self.records
            .iter()
            .filter_map(|r| match r.event {
                Event::Byte { value, .. } => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Bytes grouped by the command they follow
    ///
    /// Panics on a byte sent with chip select high or on data with no
    /// preceding command.
    pub fn transactions(&self) -> Vec<Transaction> {
        let mut out: Vec<Transaction> = Vec::new();
        for record in &self.records {
            if let Event::Byte { value, dc, cs } = record.event {
                assert_eq!(cs, Level::Low, "byte {value:#04X} sent while deselected");
                match dc {
                    Level::Low => out.push(Transaction {
                        command: value,
                        data: Vec::new(),
                    }),
                    Level::High => out
                        .last_mut()
                        .expect("data before any command")
                        .data
                        .push(value),
                }
            }
        }
        out
    }

    /// Times at which `line` was driven to `level`
    pub fn edges(&self, line: SignalLine, level: Level) -> Vec<u64> {
        self.records
            .iter()
            .filter(|r| r.event == Event::Signal(line, level))
            .map(|r| r.at_us)
            .collect()
    }

    /// Time of the first command byte at or after `from_us`
    pub fn first_command_after(&self, from_us: u64) -> Option<u64> {
        self.records.iter().find_map(|r| match r.event {
            Event::Byte { dc: Level::Low, .. } if r.at_us >= from_us => Some(r.at_us),
            _ => None,
        })
    }

    fn push(&mut self, event: Event) {
        self.records.push(Record {
            at_us: self.now_us,
            event,
        });
    }
}

impl TransportAdapter for RecordingTransport {
    type Error = TransportError;

    fn set_signal(&mut self, line: SignalLine, level: Level) -> Result<(), Self::Error> {
        self.levels[line as usize] = level;
        self.push(Event::Signal(line, level));
        Ok(())
    }

    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        if self.fail_at_byte == Some(self.bytes_sent) {
            self.fail_at_byte = None;
            return Err(TransportError::Timeout(Stage::TxComplete));
        }
        self.bytes_sent += 1;
        let dc = self.level(SignalLine::DataCommand);
        let cs = self.level(SignalLine::ChipSelect);
        self.push(Event::Byte { value, dc, cs });
        Ok(())
    }

    fn wait_idle(&mut self) -> Result<(), Self::Error> {
        self.push(Event::Idle);
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        self.push(Event::DelayMs(ms));
        self.now_us += u64::from(ms) * 1000;
    }

    fn delay_us(&mut self, us: u32) {
        self.push(Event::DelayUs(us));
        self.now_us += u64::from(us);
    }
}
