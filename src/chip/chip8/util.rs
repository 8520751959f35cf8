use crate::chip::chip8::Chip8;

/// Skips the next instruction if `condition` holds.
pub fn conditional_skip(state: &mut Chip8, condition: bool) {
    if condition {
        increment_program_counter(state);
    }
}

pub fn increment_program_counter(state: &mut Chip8) {
    state.program_counter = state.program_counter.wrapping_add(2);
}
