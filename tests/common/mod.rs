#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use sda5708::{Config, SDA5708};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    Data,
    Clock,
    Load,
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Level(Line, bool),
    /// Requested delay in nanoseconds.
    Delay(u32),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

/// Output pin that appends every level change to a log shared by all lines.
pub struct RecordingPin {
    line: Line,
    log: Log,
}

impl RecordingPin {
    pub fn new(line: Line, log: Log) -> Self {
        Self { line, log }
    }
}

impl embedded_hal::digital::ErrorType for RecordingPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Level(self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Level(self.line, true));
        Ok(())
    }
}

/// Delay that returns at once and logs the requested duration in line with
/// the pin levels.
pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    pub fn new(log: Log) -> Self {
        Self { log }
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::Delay(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_ns(us.saturating_mul(1_000));
    }
}

pub type Display = SDA5708<RecordingPin, RecordingPin, RecordingPin, RecordingPin, MockDelay>;

pub fn display() -> (Display, Log) {
    display_with_config(Config::default())
}

pub fn display_with_config(config: Config) -> (Display, Log) {
    let log: Log = Rc::default();
    let pin = |line| RecordingPin::new(line, log.clone());
    let display = SDA5708::with_config(
        pin(Line::Data),
        pin(Line::Clock),
        pin(Line::Load),
        pin(Line::Reset),
        MockDelay::new(log.clone()),
        config,
    );
    (display, log)
}

/// Pin levels from the log, without the delays.
pub fn levels(log: &Log) -> Vec<(Line, bool)> {
    log.borrow()
        .iter()
        .filter_map(|event| match *event {
            Event::Level(line, level) => Some((line, level)),
            Event::Delay(_) => None,
        })
        .collect()
}

/// Rebuild the bytes latched by the chip from the recorded waveform.
///
/// Data is sampled on every rising CLOCK edge while LOAD is low and shifted
/// in LSB first; rising LOAD latches the byte.
pub fn decode(log: &Log) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut data = false;
    let mut clock = false;
    let mut load = true;
    let mut bits = Vec::new();

    for (line, level) in levels(log) {
        match line {
            Line::Data => data = level,
            Line::Clock => {
                if level && !clock && !load {
                    bits.push(data);
                }
                clock = level;
            }
            Line::Load => {
                if !level && load {
                    bits.clear();
                } else if level && !load {
                    assert_eq!(bits.len(), 8, "LOAD released after {} bits", bits.len());
                    let byte = bits
                        .iter()
                        .enumerate()
                        .fold(0u8, |acc, (i, bit)| acc | ((*bit as u8) << i));
                    bytes.push(byte);
                }
                load = level;
            }
            Line::Reset => {}
        }
    }
    bytes
}

pub fn take_bytes(log: &Log) -> Vec<u8> {
    let bytes = decode(log);
    log.borrow_mut().clear();
    bytes
}

/// Expected transfer sequence for writing `rows` to `digit`.
pub fn glyph_bytes(digit: u8, rows: &[u8; 7]) -> Vec<u8> {
    let mut bytes = vec![0b1010_0000 | digit];
    bytes.extend(rows.iter().map(|row| row & 0b1_1111));
    bytes
}
