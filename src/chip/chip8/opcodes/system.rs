use log::debug;

use crate::chip::chip8::{
    config::SpriteEdge,
    constants::{CHIP8_CHARSET_GLYPH_LEN, CHIP8_CHARSET_OFFSET, CHIP8_FLAG_REGISTER},
    Chip8, Chip8Error, Graphics,
};

pub(super) fn clear_screen(state: &mut Chip8) {
    state.graphics.clear();
    state.draw = true;
}

/// Draws the `n` bytes of sprite data stored at I at position (Vx, Vy). Each byte is a row of
/// eight pixels which are XORed onto the display, most significant bit leftmost. VF is set iff a
/// lit pixel was turned off.
///
/// The origin wraps around the display. Pixels crossing the edge wrap or are clipped depending
/// on `Config::sprite_edge`.
pub(super) fn draw(state: &mut Chip8, x: u8, y: u8, n: u8) -> Result<(), Chip8Error> {
    let origin_x = state.registers[x as usize] as usize % Graphics::WIDTH;
    let origin_y = state.registers[y as usize] as usize % Graphics::HEIGHT;
    let sprite = state.memory.read_slice(state.index, n as usize)?;

    let mut collision = false;
    for (row, pixel_byte) in sprite.iter().enumerate() {
        for column in 0..8 {
            if pixel_byte & (0x80 >> column) == 0 {
                continue;
            }

            let (pixel_x, pixel_y) = (origin_x + column, origin_y + row);
            let (pixel_x, pixel_y) = match state.config.sprite_edge {
                SpriteEdge::Wrap => (pixel_x % Graphics::WIDTH, pixel_y % Graphics::HEIGHT),
                SpriteEdge::Clip if pixel_x >= Graphics::WIDTH || pixel_y >= Graphics::HEIGHT => {
                    continue
                }
                SpriteEdge::Clip => (pixel_x, pixel_y),
            };

            collision |= state.graphics.flip_pixel(pixel_x, pixel_y);
        }
    }

    state.registers[CHIP8_FLAG_REGISTER] = collision as u8;
    state.draw = true;
    Ok(())
}

/// Stores a key that was pressed during this step in Vx. Otherwise the interpreter suspends:
/// the program counter is moved back onto this instruction and subsequent steps wait for a key.
pub(super) fn wait_key(state: &mut Chip8, x: u8) {
    match state.keypad.take_fresh_press() {
        Some(key) => state.registers[x as usize] = key,
        None => {
            state.program_counter = state.program_counter.wrapping_sub(2);
            state.awaiting_key = Some(x);
            debug!(
                "Waiting for a key press to store in V{:X} at {:#05x}",
                x, state.program_counter
            );
        }
    }
}

/// Points I at the glyph for the low nibble of Vx.
pub(super) fn load_glyph(state: &mut Chip8, x: u8) {
    let character = u16::from(state.registers[x as usize] & 0xF);
    state.index = CHIP8_CHARSET_OFFSET + character * CHIP8_CHARSET_GLYPH_LEN;
}

/// Stores the hundreds, tens and units of Vx at I, I + 1 and I + 2.
pub(super) fn store_bcd(state: &mut Chip8, x: u8) -> Result<(), Chip8Error> {
    let value = state.registers[x as usize];
    let digits = [value / 100, (value / 10) % 10, value % 10];
    state.memory.store(state.index, &digits)
}

/// Stores V0 to Vx (inclusive) in memory starting at I. I is left unchanged. The charset cannot
/// be overwritten.
pub(super) fn store_registers(state: &mut Chip8, x: u8) -> Result<(), Chip8Error> {
    let last = x as usize;
    state
        .memory
        .store(state.index, &state.registers[..=last])
}

/// Loads V0 to Vx (inclusive) from memory starting at I. I is left unchanged.
pub(super) fn load_registers(state: &mut Chip8, x: u8) -> Result<(), Chip8Error> {
    let last = x as usize;
    let bytes = state.memory.read_slice(state.index, last + 1)?;
    state.registers[..=last].copy_from_slice(bytes);
    Ok(())
}
