pub mod chip8;

use std::io;

use thiserror::Error;

/// A machine that can be loaded with a program and stepped by a driver.
pub trait Chip {
    /// The error reported by a failed step.
    type Error: std::error::Error;

    /// The buffer a display collaborator reads to render the machine's output.
    type Frame;

    /// The capability handed to input collaborators.
    type Input: Clone;

    /// Loads the program stored in the file at `path` and returns its size in bytes.
    fn load_program(&mut self, path: &str) -> Result<usize, LoadProgramError>;

    /// Loads the program image given in `program` and returns its size in bytes.
    fn load_program_bytes(&mut self, program: &[u8]) -> Result<usize, LoadProgramError>;

    /// Executes exactly one instruction.
    fn step(&mut self) -> Result<(), Self::Error>;

    fn frame(&self) -> &Self::Frame;

    fn input(&self) -> Self::Input;
}

/// Errors that occur while loading a program into a chip.
#[derive(Debug, Error)]
pub enum LoadProgramError {
    #[error("could not open program file {path}")]
    CouldNotOpenFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("could not read program file {path}")]
    CouldNotReadFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("program is too large ({size} bytes), at most {max_size} bytes fit")]
    ProgramTooLarge { size: usize, max_size: usize },
}
