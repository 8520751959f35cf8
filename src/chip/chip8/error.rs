use thiserror::Error;

/// Conditions that abort the execution of an instruction. None of them are recoverable at the
/// instruction that triggered them, so they are handed to the driver as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Chip8Error {
    #[error("unknown opcode {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },

    #[error("memory access out of bounds at address {address:#06X}")]
    OutOfBoundsAddress { address: usize },

    #[error("write to read-only charset at address {address:#06X}")]
    ReadOnlyAddress { address: usize },

    #[error("stack overflow: more than {capacity} nested subroutine calls")]
    StackOverflow { capacity: usize },

    #[error("stack underflow: return without a matching call")]
    StackUnderflow,
}
