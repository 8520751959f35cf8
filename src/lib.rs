//! An implementation of a CHIP-8 interpreter. The implementation follows the instruction set
//! described [here](https://en.wikipedia.org/wiki/CHIP-8#Opcode_table).
//!
//! The interpreter only executes instructions and mutates in-memory state. Rendering, audio
//! output and keyboard mapping are left to the driver, which talks to the interpreter through
//! the [`Sound`](chip::chip8::Sound) capability, the [`KeypadHandle`](chip::chip8::KeypadHandle)
//! and read-only access to the [`Graphics`](chip::chip8::Graphics) buffer.
pub mod chip;
