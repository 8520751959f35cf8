use ux::u12;

use crate::chip::chip8::{Chip8, Chip8Error};

/// Returns from a subroutine. On an empty stack the program counter keeps pointing behind the
/// RET instruction.
pub(super) fn ret(state: &mut Chip8) -> Result<(), Chip8Error> {
    state.program_counter = state.stack.pop()?;
    Ok(())
}

pub(super) fn jump(state: &mut Chip8, address: u12) {
    state.program_counter = u16::from(address);
}

/// Pushes the address of the instruction following the CALL and jumps to `address`. The program
/// counter is only changed if the return address could be pushed.
pub(super) fn call(state: &mut Chip8, address: u12) -> Result<(), Chip8Error> {
    state.stack.push(state.program_counter)?;
    state.program_counter = u16::from(address);
    Ok(())
}

/// Jumps to `address + V0`. The target is not masked to 12 bits.
pub(super) fn jump_offset(state: &mut Chip8, address: u12) {
    state.program_counter = u16::from(address) + u16::from(state.registers[0x0]);
}
