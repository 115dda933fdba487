//! Driver for the Siemens SDA5708-24 8-character 5x7 dot-matrix LED display.
//!
//! The display is driven over a 3-wire bit-serial bus (DATA, CLOCK and
//! the active-low LOAD strobe) plus an active-low RESET line. The driver
//! bit-bangs the bus with any `embedded-hal` [`OutputPin`]s and a
//! [`DelayNs`] provider.
//!
//! ```ignore
//! let mut display = SDA5708::new(data, clock, load, reset, delay);
//! display.init()?;
//! display.print("HELLO");
//! display.render()?;
//! ```
//!
//! The driver owns its lines for its whole lifetime and every operation
//! blocks until the transfer is complete. It must not be shared between
//! an interrupt handler and the main loop; callers serialize access.

#![cfg_attr(not(test), no_std)]

mod constants;
pub mod font;
pub mod register;
pub mod text;
pub mod time;

use core::fmt;

pub use constants::*;
pub use font::{Font, FontFull, Glyph, BLANK_GLYPH};
pub use register::ControlRegister;
pub use text::TextBuffer;
pub use time::Time;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use num_traits::ToPrimitive;

/// Settings applied to the display after every [`SDA5708::init`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Logical brightness, 0 (dimmest) to 7 (brightest).
    pub brightness: u8,
    /// Limit the LED peak current to 12.5%.
    pub low_peak_current: bool,
    /// Delay between signal transitions, in microseconds.
    pub delay_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            brightness: MAX_BRIGHTNESS,
            low_peak_current: false,
            delay_us: SCREEN_DELAY_US,
        }
    }
}

impl Config {
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    pub fn with_low_peak_current(mut self, low_peak_current: bool) -> Self {
        self.low_peak_current = low_peak_current;
        self
    }

    pub fn with_delay_us(mut self, delay_us: u32) -> Self {
        self.delay_us = delay_us;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RadixFormat {
    Decimal,
    Hex,
}

pub struct SDA5708<DATA, CLK, LOAD, RST, DELAY> {
    data: DATA,
    clock: CLK,
    load: LOAD,
    reset: RST,
    delay: DELAY,
    config: Config,
    // the control register is write-only so we keep the last written value
    control: ControlRegister,
    font: Font,
    buffer: TextBuffer,
    redraw_skip_frames: u32,
}

impl<DATA, CLK, LOAD, RST, DELAY, E> SDA5708<DATA, CLK, LOAD, RST, DELAY>
where
    DATA: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
    LOAD: OutputPin<Error = E>,
    RST: OutputPin<Error = E>,
    DELAY: DelayNs,
{
    pub fn new(data: DATA, clock: CLK, load: LOAD, reset: RST, delay: DELAY) -> Self {
        Self::with_config(data, clock, load, reset, delay, Config::default())
    }

    pub fn with_config(
        data: DATA,
        clock: CLK,
        load: LOAD,
        reset: RST,
        delay: DELAY,
        config: Config,
    ) -> Self {
        Self {
            data,
            clock,
            load,
            reset,
            delay,
            config,
            control: ControlRegister::reset_state(),
            font: Font::new(),
            buffer: TextBuffer::new(),
            redraw_skip_frames: 0,
        }
    }

    /// Replace the font, e.g. with a clone shared by several displays.
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn destroy(self) -> (DATA, CLK, LOAD, RST, DELAY) {
        (self.data, self.clock, self.load, self.reset, self.delay)
    }

    /// Drive all lines to their idle levels, reset the chip and apply the
    /// configured peak current and brightness.
    ///
    /// Must run before any other operation that talks to the display.
    pub fn init(&mut self) -> Result<(), SDA5708Error<E>> {
        self.data.set_low()?;
        self.clock.set_low()?;
        self.load.set_high()?; // active low
        self.reset.set_high()?; // active low

        self.reset()?;
        self.apply_config()?;

        #[cfg(feature = "defmt")]
        defmt::info!("SDA5708 initialized: {}", self.config);

        Ok(())
    }

    /// Pulse the RESET line.
    ///
    /// The chip forgets brightness and peak current across a reset, and the
    /// local control register copy returns to its power-on value.
    /// [`init`](Self::init) reapplies the configured settings; callers of
    /// `reset` alone have to do that themselves.
    pub fn reset(&mut self) -> Result<(), SDA5708Error<E>> {
        self.reset.set_low()?;
        self.pause();
        self.reset.set_high()?;
        self.pause();

        self.control = ControlRegister::reset_state();

        #[cfg(feature = "defmt")]
        defmt::debug!("SDA5708 reset");

        Ok(())
    }

    /// Write the configured peak current and brightness to the display.
    pub fn apply_config(&mut self) -> Result<(), SDA5708Error<E>> {
        self.set_peak_current(self.config.low_peak_current)?;
        self.set_brightness(self.config.brightness)
    }

    /// Blank the display memory in hardware, leaving brightness and peak
    /// current as they are.
    pub fn clear_screen(&mut self) -> Result<(), SDA5708Error<E>> {
        let normal = ControlRegister {
            clear: false,
            ..self.control
        };
        self.write_control_register(ControlRegister {
            clear: true,
            ..normal
        })?;

        // back to normal operation
        self.write_control_register(normal)
    }

    /// Set the brightness, 0 (dimmest) to 7 (brightest).
    ///
    /// The register field is 3 bits wide; higher values are truncated,
    /// not rejected.
    pub fn set_brightness(&mut self, brightness: u8) -> Result<(), SDA5708Error<E>> {
        let mut next = self.control;
        next.set_logical_brightness(brightness);
        self.write_control_register(next)
    }

    pub fn brightness(&self) -> u8 {
        self.control.logical_brightness()
    }

    /// Limit the LED peak current to 12.5% (`true`) or allow the maximum.
    pub fn set_peak_current(&mut self, low_peak_current: bool) -> Result<(), SDA5708Error<E>> {
        self.write_control_register(ControlRegister {
            low_peak_current,
            ..self.control
        })
    }

    pub fn peak_current(&self) -> bool {
        self.control.low_peak_current
    }

    pub fn control_register(&self) -> ControlRegister {
        self.control
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Write `glyph` to `digit` (0 is the leftmost). Digits past 7 are
    /// ignored.
    pub fn write_glyph(&mut self, digit: u8, glyph: &Glyph) -> Result<(), SDA5708Error<E>> {
        let Some(select) = register::select_digit(digit) else {
            return Ok(());
        };
        self.write_byte(select)?;
        for row in glyph {
            self.write_byte(register::row_data(*row))?;
        }
        Ok(())
    }

    /// Write the glyph for character code `c` to `digit`, bypassing the
    /// text buffer.
    pub fn write_char(&mut self, digit: u8, c: u8) -> Result<(), SDA5708Error<E>> {
        let glyph = self.lookup(c, digit);
        self.write_glyph(digit, &glyph)
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn font_mut(&mut self) -> &mut Font {
        &mut self.font
    }

    pub fn set_custom_character(&mut self, c: u8, glyph: Glyph) -> Result<(), SDA5708Error<E>> {
        self.font.set_custom_character(c, glyph).map_err(|FontFull { character }| {
            #[cfg(feature = "defmt")]
            defmt::warn!("custom glyph table full, dropping {=u8:#x}", character);
            SDA5708Error::FontFull(character)
        })
    }

    pub fn remove_custom_character(&mut self, c: u8) -> Option<Glyph> {
        self.font.remove_custom_character(c)
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    /// Blank the text buffer. The display itself changes on the next
    /// [`render`](Self::render).
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn print_at(&mut self, pos: u8, text: &str) -> u8 {
        self.buffer.print_at(pos, text)
    }

    pub fn print(&mut self, text: &str) -> u8 {
        self.buffer.print(text)
    }

    pub fn print_fmt_at(&mut self, pos: u8, args: fmt::Arguments<'_>) -> u8 {
        self.buffer.print_fmt_at(pos, args)
    }

    pub fn print_fmt(&mut self, args: fmt::Arguments<'_>) -> u8 {
        self.buffer.print_fmt(args)
    }

    pub fn print_time_at(&mut self, pos: u8, format: &str, time: &Time) -> u8 {
        self.buffer.print_time_at(pos, format, time)
    }

    pub fn print_time(&mut self, format: &str, time: &Time) -> u8 {
        self.buffer.print_time(format, time)
    }

    /// Show `number` right-aligned in decimal, replacing the buffer.
    pub fn print_number<T>(&mut self, number: T) -> Result<(), SDA5708Error<E>>
    where
        T: ToPrimitive,
    {
        self.print_radix(number, RadixFormat::Decimal)
    }

    /// Show `number` right-aligned in uppercase hex, replacing the buffer.
    pub fn print_hex_number<T>(&mut self, number: T) -> Result<(), SDA5708Error<E>>
    where
        T: ToPrimitive,
    {
        self.print_radix(number, RadixFormat::Hex)
    }

    /// Send every buffer cell to the display.
    ///
    /// Codes without a glyph are shown with the glyph of [`FALLBACK_CHAR`].
    pub fn render(&mut self) -> Result<(), SDA5708Error<E>> {
        let cells = *self.buffer.cells();
        for (digit, c) in (0..NUM_DIGITS).zip(cells) {
            let glyph = self.lookup(c, digit);
            self.write_glyph(digit, &glyph)?;
        }
        Ok(())
    }

    /// One tick of the caller's refresh loop.
    ///
    /// Unless redraw is paused, the buffer is cleared and `writer` fills it
    /// again. The buffer is rendered on every call either way.
    ///
    /// A tick that only flushes the current buffer should call
    /// [`render`](Self::render) instead; `update(|_| {})` blanks it.
    pub fn update<F>(&mut self, writer: F) -> Result<(), SDA5708Error<E>>
    where
        F: FnOnce(&mut Self),
    {
        if self.redraw_skip_frames == 0 {
            self.clear();
            writer(self);
        }
        self.redraw_skip_frames = self.redraw_skip_frames.saturating_sub(1);

        self.render()
    }

    /// Keep the current buffer for the next `frames` updates.
    pub fn pause_automatic_redraw(&mut self, frames: u32) {
        self.redraw_skip_frames = frames;
    }

    pub fn resume_automatic_redraw(&mut self) {
        self.redraw_skip_frames = 0;
    }

    pub fn redraw_paused(&self) -> bool {
        self.redraw_skip_frames > 0
    }

    #[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
    fn lookup(&self, c: u8, digit: u8) -> Glyph {
        if let Some(glyph) = self.font.glyph(c) {
            return glyph;
        }

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "no glyph for character {=u8:#x} on digit {}, using fallback",
            c,
            digit
        );

        self.font.glyph_or_fallback(FALLBACK_CHAR)
    }

    fn print_radix<T>(&mut self, number: T, radix: RadixFormat) -> Result<(), SDA5708Error<E>>
    where
        T: ToPrimitive,
    {
        let number = number.to_i64().ok_or(SDA5708Error::InvalidValue)?;
        let sign = if number < 0 { "-" } else { "" };
        let magnitude = number.unsigned_abs();

        let mut digits: heapless::String<{ NUM_DIGITS as usize }> = heapless::String::new();
        let written = match radix {
            RadixFormat::Decimal => fmt::write(&mut digits, format_args!("{}{}", sign, magnitude)),
            RadixFormat::Hex => fmt::write(&mut digits, format_args!("{}{:X}", sign, magnitude)),
        };
        written.map_err(|_| SDA5708Error::InvalidValue)?;

        self.buffer.clear();
        self.buffer.print_at(NUM_DIGITS - digits.len() as u8, &digits);
        Ok(())
    }

    /// The mirror only takes `next` once the byte has gone out.
    fn write_control_register(&mut self, next: ControlRegister) -> Result<(), SDA5708Error<E>> {
        self.write_byte(next.encode())?;
        self.control = next;
        Ok(())
    }

    /// Shift one byte out, LSB first, framed by LOAD.
    fn write_byte(&mut self, byte: u8) -> Result<(), SDA5708Error<E>> {
        self.load.set_low()?;

        if let Err(error) = self.shift_out(byte) {
            // release LOAD so the next transfer starts framed
            let _ = self.load.set_high();
            return Err(error);
        }

        // rising LOAD latches the byte
        self.load.set_high()?;
        self.pause();
        Ok(())
    }

    fn shift_out(&mut self, byte: u8) -> Result<(), SDA5708Error<E>> {
        for bit in 0..8 {
            self.data.set_state(PinState::from((byte >> bit) & 1 != 0))?;

            self.clock.set_high()?;
            self.pause();
            self.clock.set_low()?;
            self.pause();
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.delay.delay_us(self.config.delay_us);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SDA5708Error<E> {
    Pin(E),
    InvalidValue,
    FontFull(u8),
}

impl<E> From<E> for SDA5708Error<E> {
    fn from(error: E) -> Self {
        SDA5708Error::Pin(error)
    }
}

impl<E: fmt::Debug> fmt::Display for SDA5708Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SDA5708Error::Pin(e) => write!(f, "GPIO error: {:?}", e),
            SDA5708Error::InvalidValue => write!(f, "Value does not fit the display"),
            SDA5708Error::FontFull(c) => write!(f, "No room for custom glyph {:#04x}", c),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for SDA5708Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            SDA5708Error::Pin(e) => defmt::write!(f, "GPIO error: {}", e),
            SDA5708Error::InvalidValue => defmt::write!(f, "Value does not fit the display"),
            SDA5708Error::FontFull(c) => defmt::write!(f, "No room for custom glyph {=u8:#x}", c),
        }
    }
}
