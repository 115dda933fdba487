//! Eight-character text buffer.
//!
//! Print operations only touch this buffer; nothing reaches the display
//! until the driver renders it. All print variants return the position
//! after the last written cell so calls can be chained.

use core::fmt::{self, Write};

use heapless::String;

use crate::constants::{BLANK_CHAR, FALLBACK_CHAR, FORMAT_CAPACITY, NUM_DIGITS};
use crate::time::Time;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextBuffer {
    cells: [u8; NUM_DIGITS as usize],
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    pub const fn new() -> Self {
        Self {
            cells: [BLANK_CHAR; NUM_DIGITS as usize],
        }
    }

    pub fn clear(&mut self) {
        self.cells = [BLANK_CHAR; NUM_DIGITS as usize];
    }

    pub fn cells(&self) -> &[u8; NUM_DIGITS as usize] {
        &self.cells
    }

    pub fn get(&self, pos: u8) -> Option<u8> {
        self.cells.get(pos as usize).copied()
    }

    /// Copy raw character codes into the buffer starting at `pos`.
    ///
    /// Stops at the end of the buffer; the rest of `bytes` is dropped.
    pub fn print_bytes_at(&mut self, pos: u8, bytes: &[u8]) -> u8 {
        self.fill_from(pos, bytes.iter().copied())
    }

    /// Print `text` starting at `pos`.
    ///
    /// Characters up to U+00FF are stored as their Latin-1 code so custom
    /// glyphs can be bound to them; anything wider is stored as the
    /// fallback code.
    pub fn print_at(&mut self, pos: u8, text: &str) -> u8 {
        self.fill_from(pos, text.chars().map(char_code))
    }

    pub fn print(&mut self, text: &str) -> u8 {
        self.print_at(0, text)
    }

    /// Format `args` and print the result at `pos`.
    ///
    /// Output is staged in a fixed-capacity buffer. If formatting fails or
    /// the output does not fit, the buffer is left untouched and `pos` is
    /// returned.
    pub fn print_fmt_at(&mut self, pos: u8, args: fmt::Arguments<'_>) -> u8 {
        let mut staged: String<FORMAT_CAPACITY> = String::new();
        match staged.write_fmt(args) {
            Ok(()) => self.print_at(pos, &staged),
            Err(_) => pos,
        }
    }

    pub fn print_fmt(&mut self, args: fmt::Arguments<'_>) -> u8 {
        self.print_fmt_at(0, args)
    }

    /// Format `time` with a strftime-style `format` and print it at `pos`.
    ///
    /// See [`Time::format`] for the supported specifiers. Failures leave the
    /// buffer untouched and return `pos`.
    pub fn print_time_at(&mut self, pos: u8, format: &str, time: &Time) -> u8 {
        let mut staged: String<FORMAT_CAPACITY> = String::new();
        match time.format(&mut staged, format) {
            Ok(()) => self.print_at(pos, &staged),
            Err(_) => pos,
        }
    }

    pub fn print_time(&mut self, format: &str, time: &Time) -> u8 {
        self.print_time_at(0, format, time)
    }

    fn fill_from<I>(&mut self, pos: u8, codes: I) -> u8
    where
        I: Iterator<Item = u8>,
    {
        if pos >= NUM_DIGITS {
            return pos;
        }
        let mut written = 0;
        for (cell, code) in self.cells[pos as usize..].iter_mut().zip(codes) {
            *cell = code;
            written += 1;
        }
        pos + written
    }
}

fn char_code(c: char) -> u8 {
    u8::try_from(c).unwrap_or(FALLBACK_CHAR)
}
