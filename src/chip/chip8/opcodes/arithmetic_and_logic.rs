use rand::Rng;

use crate::chip::chip8::{
    config::ShlCarry,
    constants::CHIP8_FLAG_REGISTER,
    Chip8,
};

/// Replaces Vx with the result of `f(Vx, Vy)`. If `f` reports a flag, VF is set to 1 or 0
/// accordingly, after Vx was written.
pub(super) fn modify_registers(
    state: &mut Chip8,
    r1: u8,
    r2: u8,
    f: fn(u8, u8) -> (u8, Option<bool>),
) {
    let (val, carry) = f(state.registers[r1 as usize], state.registers[r2 as usize]);
    state.registers[r1 as usize] = val;
    match carry {
        Some(true) => state.registers[CHIP8_FLAG_REGISTER] = 1,
        Some(false) => state.registers[CHIP8_FLAG_REGISTER] = 0,
        _ => {}
    }
}

/// 7xkk does not touch the carry flag.
pub(super) fn add_value(state: &mut Chip8, x: u8, value: u8) {
    state.registers[x as usize] = state.registers[x as usize].wrapping_add(value);
}

pub(super) fn add_registers(state: &mut Chip8, x: u8, y: u8) {
    modify_registers(state, x, y, |v1, v2| {
        let (result, overflow) = v1.overflowing_add(v2);
        (result, Some(overflow))
    })
}

/// VF is set when no borrow occurs, i.e., iff Vx > Vy.
pub(super) fn sub(state: &mut Chip8, x: u8, y: u8) {
    modify_registers(state, x, y, |v1, v2| (v1.wrapping_sub(v2), Some(v1 > v2)))
}

/// Vx = Vy - Vx, VF is set iff Vy > Vx.
pub(super) fn sub_negated(state: &mut Chip8, x: u8, y: u8) {
    modify_registers(state, x, y, |v1, v2| (v2.wrapping_sub(v1), Some(v2 > v1)))
}

pub(super) fn shift_right(state: &mut Chip8, x: u8) {
    modify_registers(state, x, x, |v1, _| (v1 >> 1, Some(v1 & 0x01 != 0)))
}

pub(super) fn shift_left(state: &mut Chip8, x: u8) {
    let f: fn(u8, u8) -> (u8, Option<bool>) = match state.config.shl_carry {
        ShlCarry::MostSignificantBit => |v1, _| (v1 << 1, Some(v1 & 0x80 != 0)),
        ShlCarry::LeastSignificantBit => |v1, _| (v1 << 1, Some(v1 & 0x01 != 0)),
    };
    modify_registers(state, x, x, f)
}

/// I = I + Vx. VF is not affected.
pub(super) fn add_index(state: &mut Chip8, x: u8) {
    state.index = state
        .index
        .wrapping_add(u16::from(state.registers[x as usize]));
}

pub(super) fn random(state: &mut Chip8, x: u8, value: u8) {
    let sample: u8 = state.rng.gen();
    state.registers[x as usize] = sample & value;
}
