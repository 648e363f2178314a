/// The size of each character of the CHIP-8 font in bytes.
pub(crate) const CHAR_SIZE: usize = 5;
/// The sprites of the CHIP-8 hexadecimal font, where each character is one byte wide
/// and `CHAR_SIZE` bytes tall.  Each bit represents one pixel in the sprite.
const FONT_DATA: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// An abstraction of the built-in hexadecimal font (prior to loading to memory).
pub(crate) struct Font {
    font_data: &'static [u8],
}

impl Font {
    /// Constructor that returns the standard CHIP-8 font
    pub(crate) fn hexadecimal() -> Self {
        Font {
            font_data: &FONT_DATA,
        }
    }

    pub(crate) fn font_data(&self) -> &[u8] {
        self.font_data
    }

    /// Returns the memory offset of the glyph for the given hex digit, relative to the
    /// start of the font.  Values above 0xF are not masked and point past the glyph table.
    pub(crate) fn glyph_offset(&self, character: u8) -> usize {
        (character as usize) * CHAR_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_data_size() {
        let font: Font = Font::hexadecimal();
        assert_eq!(font.font_data().len(), 16 * CHAR_SIZE);
    }

    #[test]
    fn test_glyph_offset() {
        let font: Font = Font::hexadecimal();
        assert_eq!(font.glyph_offset(0x0), 0);
        assert_eq!(font.glyph_offset(0xA), 50);
        assert_eq!(&font.font_data()[50..55], &[0xF0, 0x90, 0xF0, 0x90, 0x90]);
    }

    #[test]
    fn test_glyph_offset_unmasked() {
        let font: Font = Font::hexadecimal();
        assert_eq!(font.glyph_offset(0x20), 0xA0);
    }
}
