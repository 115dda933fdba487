//! Glyph table.
//!
//! A [`Font`] resolves a character code to a 7-row [`Glyph`]. The built-in
//! set covers `0x00` (the fallback glyph, blank) and printable ASCII.
//! Custom glyphs shadow the built-in ones and are kept per font instance;
//! clone a `Font` to hand the same custom set to several displays.

use heapless::FnvIndexMap;

use crate::constants::{CUSTOM_GLYPH_CAPACITY, FALLBACK_CHAR, GLYPH_COLUMNS, GLYPH_ROWS, ROW_MASK};

/// Pixel rows of one character cell, top row first. Bit 4 of each row is
/// the leftmost column; bits 5-7 are ignored.
pub type Glyph = [u8; GLYPH_ROWS];

pub const BLANK_GLYPH: Glyph = [0; GLYPH_ROWS];

const FIRST_PRINTABLE: u8 = 0x20;
const LAST_PRINTABLE: u8 = 0x7E;

// classic 5x7 font, one byte per column, bit 0 is the top row
const ASCII_COLUMNS: [[u8; GLYPH_COLUMNS]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x7F, 0x20, 0x18, 0x20, 0x7F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x03, 0x04, 0x78, 0x04, 0x03], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // \
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x08, 0x14, 0x54, 0x54, 0x3C], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x00, 0x7F, 0x10, 0x28, 0x44], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x02, 0x01, 0x02, 0x04, 0x02], // ~
];

/// Built-in glyphs for `0x20..=0x7E`, converted to rows at compile time.
static ASCII_GLYPHS: [Glyph; 95] = columns_to_glyphs(ASCII_COLUMNS);

const fn columns_to_glyph(columns: [u8; GLYPH_COLUMNS]) -> Glyph {
    let mut glyph = BLANK_GLYPH;
    let mut row = 0;
    while row < GLYPH_ROWS {
        let mut column = 0;
        while column < GLYPH_COLUMNS {
            if columns[column] & (1 << row) != 0 {
                glyph[row] |= 1 << (GLYPH_COLUMNS - 1 - column);
            }
            column += 1;
        }
        row += 1;
    }
    glyph
}

const fn columns_to_glyphs<const N: usize>(font: [[u8; GLYPH_COLUMNS]; N]) -> [Glyph; N] {
    let mut glyphs = [BLANK_GLYPH; N];
    let mut i = 0;
    while i < N {
        glyphs[i] = columns_to_glyph(font[i]);
        i += 1;
    }
    glyphs
}

/// Glyph from the built-in set, ignoring custom entries.
pub fn builtin_glyph(c: u8) -> Option<Glyph> {
    match c {
        FALLBACK_CHAR => Some(BLANK_GLYPH),
        FIRST_PRINTABLE..=LAST_PRINTABLE => Some(ASCII_GLYPHS[(c - FIRST_PRINTABLE) as usize]),
        _ => None,
    }
}

/// Returned when a font has no room left for another custom glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FontFull {
    pub character: u8,
}

#[derive(Clone, Debug, Default)]
pub struct Font {
    custom: FnvIndexMap<u8, Glyph, CUSTOM_GLYPH_CAPACITY>,
}

impl Font {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn glyph(&self, c: u8) -> Option<Glyph> {
        self.custom.get(&c).copied().or_else(|| builtin_glyph(c))
    }

    /// Glyph for `c`, or the fallback glyph when `c` has none.
    pub fn glyph_or_fallback(&self, c: u8) -> Glyph {
        self.glyph(c)
            .or_else(|| self.glyph(FALLBACK_CHAR))
            .unwrap_or(BLANK_GLYPH)
    }

    /// Insert or replace the glyph for `c`. Unused row bits are cleared.
    ///
    /// Overwriting an existing custom glyph always succeeds; a new entry
    /// fails with [`FontFull`] once the custom table is at capacity.
    pub fn set_custom_character(&mut self, c: u8, glyph: Glyph) -> Result<(), FontFull> {
        let glyph = glyph.map(|row| row & ROW_MASK);
        self.custom
            .insert(c, glyph)
            .map(|_| ())
            .map_err(|_| FontFull { character: c })
    }

    /// Drop the custom glyph for `c`, restoring the built-in one if any.
    pub fn remove_custom_character(&mut self, c: u8) -> Option<Glyph> {
        self.custom.remove(&c)
    }

    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_and_fallback_are_blank() {
        let font = Font::new();
        assert_eq!(font.glyph(b' '), Some(BLANK_GLYPH));
        assert_eq!(font.glyph(FALLBACK_CHAR), Some(BLANK_GLYPH));
    }

    #[test]
    fn builtin_glyphs_are_row_major() {
        let font = Font::new();
        assert_eq!(
            font.glyph(b'H'),
            Some([0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001])
        );
        assert_eq!(
            font.glyph(b'L'),
            Some([0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111])
        );
        assert_eq!(
            font.glyph(b'T'),
            Some([0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100])
        );
    }

    #[test]
    fn builtin_rows_fit_five_columns() {
        for c in FIRST_PRINTABLE..=LAST_PRINTABLE {
            let glyph = builtin_glyph(c).unwrap();
            assert!(glyph.iter().all(|row| row & !ROW_MASK == 0), "{}", c as char);
        }
    }

    #[test]
    fn missing_codes() {
        let font = Font::new();
        assert_eq!(font.glyph(0x01), None);
        assert_eq!(font.glyph(0x7F), None);
        assert_eq!(font.glyph(0xB0), None);
        assert_eq!(font.glyph_or_fallback(0xB0), BLANK_GLYPH);
    }

    #[test]
    fn custom_glyph_shadows_builtin() {
        let mut font = Font::new();
        let smile: Glyph = [0b00000, 0b01010, 0b00000, 0b00000, 0b10001, 0b01110, 0b00000];
        font.set_custom_character(b'A', smile).unwrap();
        assert_eq!(font.glyph(b'A'), Some(smile));

        assert_eq!(font.remove_custom_character(b'A'), Some(smile));
        assert_eq!(font.glyph(b'A'), builtin_glyph(b'A'));
    }

    #[test]
    fn custom_glyph_is_masked() {
        let mut font = Font::new();
        font.set_custom_character(0xB0, [0xFF; GLYPH_ROWS]).unwrap();
        assert_eq!(font.glyph(0xB0), Some([0b11111; GLYPH_ROWS]));
    }

    #[test]
    fn custom_fallback_replaces_missing() {
        let mut font = Font::new();
        let boxed: Glyph = [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111];
        font.set_custom_character(FALLBACK_CHAR, boxed).unwrap();
        assert_eq!(font.glyph_or_fallback(0x80), boxed);
    }

    #[test]
    fn custom_table_capacity() {
        let mut font = Font::new();
        for c in 0..CUSTOM_GLYPH_CAPACITY as u8 {
            font.set_custom_character(0x80 + c, BLANK_GLYPH).unwrap();
        }
        assert_eq!(
            font.set_custom_character(0xF0, BLANK_GLYPH),
            Err(FontFull { character: 0xF0 })
        );
        // replacing an existing entry still works when full
        assert!(font.set_custom_character(0x80, [1; GLYPH_ROWS]).is_ok());
        assert_eq!(font.custom_len(), CUSTOM_GLYPH_CAPACITY);
    }

    #[test]
    fn clones_are_independent() {
        let mut shared = Font::new();
        shared.set_custom_character(0x01, [1; GLYPH_ROWS]).unwrap();
        let mut copy = shared.clone();
        copy.set_custom_character(0x02, [2; GLYPH_ROWS]).unwrap();
        assert_eq!(copy.glyph(0x01), Some([1; GLYPH_ROWS]));
        assert_eq!(shared.glyph(0x02), None);
    }
}
