use std::ops::{Index, IndexMut};

/// The CHIP-8 display width in pixels.
pub const DISPLAY_WIDTH_PIXELS: usize = 64;
/// The CHIP-8 display height in pixels.
pub const DISPLAY_HEIGHT_PIXELS: usize = 32;
/// The width of every CHIP-8 sprite in pixels.
const SPRITE_WIDTH_PIXELS: usize = 8;

/// An abstraction of the CHIP-8 frame buffer.
///
/// This is only written to from within the Octet crate, but is exposed publicly for read access
/// by hosting applications so the display can be rendered, either by borrowing it from
/// [Processor::frame_buffer()](crate::Processor::frame_buffer) or by taking a stable copy with
/// [Processor::take_frame()](crate::Processor::take_frame).
#[derive(Clone, Debug, PartialEq)]
pub struct Display {
    /// Row-major pixel state, one byte per pixel (1 means on, 0 means off), with (0, 0) at the
    /// top-left of the display.  The [Index] trait is implemented so that a pixel can be read
    /// as `display[row][column]`.
    pixels: [u8; DISPLAY_WIDTH_PIXELS * DISPLAY_HEIGHT_PIXELS],
}

// Allow the flat pixel array to be indexed as a 2D array of rows
impl Index<usize> for Display {
    type Output = [u8];

    fn index(&self, row: usize) -> &Self::Output {
        &self.pixels[row * DISPLAY_WIDTH_PIXELS..(row + 1) * DISPLAY_WIDTH_PIXELS]
    }
}

impl IndexMut<usize> for Display {
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        &mut self.pixels[row * DISPLAY_WIDTH_PIXELS..(row + 1) * DISPLAY_WIDTH_PIXELS]
    }
}

impl Default for Display {
    fn default() -> Self {
        Display::new()
    }
}

impl Display {
    /// Constructor that returns a [Display] instance with all pixels set to off.
    pub(crate) fn new() -> Self {
        Self {
            pixels: [0x0; DISPLAY_WIDTH_PIXELS * DISPLAY_HEIGHT_PIXELS],
        }
    }

    /// Returns the whole frame buffer as a flat, row-major slice of 0/1 values.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns true if the pixel at the given coordinate is on.  Coordinates outside the
    /// display are reported as off.
    pub fn is_pixel_set(&self, column: usize, row: usize) -> bool {
        column < DISPLAY_WIDTH_PIXELS
            && row < DISPLAY_HEIGHT_PIXELS
            && self.pixels[row * DISPLAY_WIDTH_PIXELS + column] == 0x1
    }

    /// Clears the display by turning every pixel off.
    pub(crate) fn clear(&mut self) {
        self.pixels.fill(0x0);
    }

    /// Draws a sprite to the display by XOR-ing each sprite bit onto the corresponding pixel.
    /// Both the starting coordinate and any pixels that run past the right or bottom edge
    /// wrap around to the opposite edge.  Returns true if any pixel that was on was turned off.
    ///
    /// # Arguments
    ///
    /// * `x_start_pixel` - a zero-based integer giving the starting x coordinate of the sprite
    /// * `y_start_pixel` - a zero-based integer giving the starting y coordinate of the sprite
    /// * `sprite` - an array slice holding the bytes that make up the sprite, one byte per row
    pub(crate) fn draw_sprite(
        &mut self,
        x_start_pixel: usize,
        y_start_pixel: usize,
        sprite: &[u8],
    ) -> bool {
        let mut collision: bool = false;
        for (row_offset, sprite_row) in sprite.iter().enumerate() {
            let row: usize = (y_start_pixel + row_offset) % DISPLAY_HEIGHT_PIXELS;
            for bit in 0..SPRITE_WIDTH_PIXELS {
                // Sprite bits are read most significant first (left-most pixel)
                if sprite_row & (0x80 >> bit) == 0 {
                    continue;
                }
                let column: usize = (x_start_pixel + bit) % DISPLAY_WIDTH_PIXELS;
                let pixel: &mut u8 = &mut self.pixels[row * DISPLAY_WIDTH_PIXELS + column];
                if *pixel == 0x1 {
                    collision = true;
                }
                *pixel ^= 0x1;
            }
        }
        collision
    }

    /// Renders the frame buffer as text, one line per row, using `on` and `off` for pixels.
    pub fn to_text(&self, on: char, off: char) -> String {
        let mut text: String =
            String::with_capacity((DISPLAY_WIDTH_PIXELS + 1) * DISPLAY_HEIGHT_PIXELS);
        for row in 0..DISPLAY_HEIGHT_PIXELS {
            for pixel in &self[row] {
                text.push(if *pixel == 0x1 { on } else { off });
            }
            text.push('\n');
        }
        text
    }
}
