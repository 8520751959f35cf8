use crate::chip::chip8::constants::{CHIP8_DISPLAY_HEIGHT, CHIP8_DISPLAY_WIDTH};

/// The state of a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
}

impl Default for Color {
    fn default() -> Self {
        Color::Black
    }
}

/// The 64x32 pixel buffer. Pixels are stored row by row, i.e., pixel `(x, y)` lives at index
/// `x + 64 * y`.
///
/// Coordinates outside of the buffer are a caller error and cause a panic.
#[derive(Clone)]
pub struct Graphics {
    pixels: [Color; CHIP8_DISPLAY_WIDTH * CHIP8_DISPLAY_HEIGHT],
}

impl Graphics {
    pub const WIDTH: usize = CHIP8_DISPLAY_WIDTH;
    pub const HEIGHT: usize = CHIP8_DISPLAY_HEIGHT;

    pub fn new() -> Self {
        Graphics {
            pixels: [Color::Black; CHIP8_DISPLAY_WIDTH * CHIP8_DISPLAY_HEIGHT],
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[Self::position(x, y)]
    }

    /// Turns the pixel on.
    pub fn set_pixel(&mut self, x: usize, y: usize) {
        self.pixels[Self::position(x, y)] = Color::White;
    }

    /// Turns the pixel off.
    pub fn clear_pixel(&mut self, x: usize, y: usize) {
        self.pixels[Self::position(x, y)] = Color::Black;
    }

    /// Inverts the pixel and returns whether it was turned off, i.e., whether drawing onto it
    /// collided with an already lit pixel.
    pub fn flip_pixel(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.pixels[Self::position(x, y)];
        match *pixel {
            Color::White => {
                *pixel = Color::Black;
                true
            }
            Color::Black => {
                *pixel = Color::White;
                false
            }
        }
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.pixels = [Color::Black; CHIP8_DISPLAY_WIDTH * CHIP8_DISPLAY_HEIGHT];
    }

    /// All pixels, row by row.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    fn position(x: usize, y: usize) -> usize {
        assert!(
            x < CHIP8_DISPLAY_WIDTH && y < CHIP8_DISPLAY_HEIGHT,
            "Pixel ({}, {}) is outside of the display",
            x,
            y
        );
        x + CHIP8_DISPLAY_WIDTH * y
    }
}

impl Default for Graphics {
    fn default() -> Self {
        Graphics::new()
    }
}
