//! Command byte encoding for the SDA5708 registers.
//!
//! The chip decodes the top bits of every byte to pick a register:
//!
//! | Register | Byte (MSB to LSB) |
//! |---|---|
//! | control | `1 1 C P 0 B B B` |
//! | address | `1 0 1 0 0 D D D` |
//! | column data | `0 0 0 V V V V V` |

use crate::constants::{command, MAX_BRIGHTNESS, NUM_DIGITS, ROW_MASK};

/// Local copy of the write-only control register.
///
/// `brightness` holds the wire encoding (0 is brightest). The driver
/// converts to and from the logical 0 (dimmest) to 7 (brightest) scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlRegister {
    pub clear: bool,
    pub low_peak_current: bool,
    pub brightness: u8,
}

impl ControlRegister {
    /// Register state right after a hardware reset: normal operation,
    /// maximum peak current, 100% brightness.
    pub const fn reset_state() -> Self {
        Self {
            clear: false,
            low_peak_current: false,
            brightness: 0,
        }
    }

    pub const fn encode(&self) -> u8 {
        let mut byte = command::CONTROL_REGISTER;
        if !self.clear {
            byte |= command::control::NOT_CLEAR;
        }
        if self.low_peak_current {
            byte |= command::control::LOW_PEAK_CURRENT;
        }
        byte | (self.brightness & command::control::BRIGHTNESS_MASK)
    }

    /// Logical brightness, 0 (dimmest) to 7 (brightest).
    pub const fn logical_brightness(&self) -> u8 {
        MAX_BRIGHTNESS - (self.brightness & command::control::BRIGHTNESS_MASK)
    }

    /// Store a logical brightness. Values above 7 are truncated to the
    /// 3-bit register field.
    pub fn set_logical_brightness(&mut self, brightness: u8) {
        self.brightness = MAX_BRIGHTNESS - (brightness & command::control::BRIGHTNESS_MASK);
    }
}

/// Address register command selecting `digit`, or `None` when the digit
/// does not exist.
pub const fn select_digit(digit: u8) -> Option<u8> {
    if digit >= NUM_DIGITS {
        return None;
    }
    Some(command::ADDRESS_REGISTER | (digit & command::DIGIT_MASK))
}

pub const fn row_data(row: u8) -> u8 {
    command::COLUMN_DATA | (row & ROW_MASK)
}
