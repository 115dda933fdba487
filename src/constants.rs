pub const NUM_DIGITS: u8 = 8;
pub const GLYPH_ROWS: usize = 7;
pub const GLYPH_COLUMNS: usize = 5;
pub const MAX_BRIGHTNESS: u8 = 7; // 3 bits
pub const ROW_MASK: u8 = 0b0001_1111;

/// Blank cell character written by `clear()`.
pub const BLANK_CHAR: u8 = b' ';
/// Character whose glyph is shown for codes missing from the font.
pub const FALLBACK_CHAR: u8 = 0x00;

/// Capacity of the intermediate buffer used by the formatting print helpers.
pub const FORMAT_CAPACITY: usize = 64;
/// Number of custom glyphs a font can hold (power of two for the index map).
pub const CUSTOM_GLYPH_CAPACITY: usize = 16;

// minimum setup/hold time is ~200ns, 1us leaves a 5x margin
pub const SCREEN_DELAY_US: u32 = 1;

pub mod command {
    pub const CONTROL_REGISTER: u8 = 0b1100_0000; // D7=1, D6=1
    pub const ADDRESS_REGISTER: u8 = 0b1010_0000; // D7=1, D6=0, D5=1
    pub const COLUMN_DATA: u8 = 0b0000_0000; // D7=0, D6=0, D5=0

    pub mod control {
        pub const NOT_CLEAR: u8 = 0b0010_0000; // D5: 0 clears the display (active low)
        pub const LOW_PEAK_CURRENT: u8 = 0b0001_0000; // D4: 1 limits peak current to 12.5%
        pub const BRIGHTNESS_MASK: u8 = 0b0000_0111; // D2-D0: 0 is 100%, 7 is 0%
    }

    pub const DIGIT_MASK: u8 = 0b0000_0111; // D2-D0
}
