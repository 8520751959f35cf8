/// Tunable interpreter behavior.
mod config;
/// CHIP-8 constants.
pub mod constants;
/// Errors raised while executing instructions.
mod error;
/// The display buffer.
mod graphics;
/// Key state and the channel feeding it.
mod keypad;
/// Main memory.
mod memory;
/// Decoding of opcodes and their execution.
mod opcodes;
/// The sound capability.
mod sound;
/// The call stack.
mod stack;
/// Convenience functions for modification of the CHIP-8 state.
mod util;


use std::fs::File;
use std::io::Read;
use std::sync::Arc;

use log::{debug, info, trace};
use rand::SeedableRng;
use rand_pcg::Pcg32;

pub use config::{Config, ShlCarry, SpriteEdge};
pub use error::Chip8Error;
pub use graphics::{Color, Graphics};
pub use keypad::{KeyEvent, KeypadHandle, KEY_COUNT};
pub use memory::Memory;
pub use sound::{ChannelSound, Mute, Sound};
pub use stack::Stack;

use crate::chip::{
    chip8::{
        constants::{CHIP8_MAX_PROGRAM_SIZE, CHIP8_PROGRAM_OFFSET},
        keypad::Keypad,
        opcodes::Opcode,
    },
    Chip, LoadProgramError,
};

/// Represents the state of the CHIP-8.
pub struct Chip8 {
    /// 4096 bytes of main memory
    memory: Memory,

    /// 16 registers where each can store one byte. VF doubles as carry, borrow
    /// and collision flag.
    registers: [u8; 16],

    /// An index register
    index: u16,

    /// A program counter
    program_counter: u16,

    /// The 64x32 display buffer.
    graphics: Graphics,

    /// The delay timer. Note that this timer is decremented every
    /// `Config::cycles_per_timer_tick` steps.
    delay_timer: u8,

    /// The sound timer. Note that this timer is decremented every
    /// `Config::cycles_per_timer_tick` steps. The sound device beeps
    /// whenever it runs out.
    sound_timer: u8,

    /// The key state. Input collaborators feed it through a `KeypadHandle`.
    keypad: Keypad,

    /// A stack. Note that there are no instructions allowing to modify the
    /// stack and it is only used to store return addresses for the return
    /// opcode.
    stack: Stack,

    /// A helper variable to properly implement the timer resolution.
    cycles_since_timer_dec: u8,

    /// A flag that indicates whether the display changed since it
    /// was last taken.
    draw: bool,

    /// Set while Fx0A waits for a key press; holds x.
    awaiting_key: Option<u8>,

    sound: Arc<dyn Sound>,

    rng: Pcg32,

    config: Config,
}

impl Chip for Chip8 {
    type Error = Chip8Error;

    type Frame = Graphics;

    type Input = KeypadHandle;

    fn load_program(&mut self, path: &str) -> Result<usize, LoadProgramError> {
        let mut file = File::open(path).map_err(|source| LoadProgramError::CouldNotOpenFile {
            path: path.to_string(),
            source,
        })?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)
            .map_err(|source| LoadProgramError::CouldNotReadFile {
                path: path.to_string(),
                source,
            })?;

        self.load_program_bytes(&buffer)
    }

    fn load_program_bytes(&mut self, program: &[u8]) -> Result<usize, LoadProgramError> {
        self.memory
            .write_slice(CHIP8_PROGRAM_OFFSET, program)
            .map_err(|_| LoadProgramError::ProgramTooLarge {
                size: program.len(),
                max_size: CHIP8_MAX_PROGRAM_SIZE,
            })?;
        info!(
            "Loaded {} bytes of program at {:#05x}",
            program.len(),
            CHIP8_PROGRAM_OFFSET
        );
        Ok(program.len())
    }

    /// Executes one instruction and advances the timers.
    ///
    /// Pending key events are applied first. While the machine waits for a key
    /// (Fx0A), a step without a fresh key press does nothing at all.
    ///
    /// A failed step leaves the state as it was, except for the program counter
    /// which may already point behind the failing instruction.
    fn step(&mut self) -> Result<(), Chip8Error> {
        self.keypad.poll();

        if let Some(register) = self.awaiting_key {
            let key = match self.keypad.take_fresh_press() {
                Some(key) => key,
                None => return Ok(()),
            };
            debug!("Key {:X} pressed, stored in V{:X}", key, register);
            self.registers[register as usize] = key;
            self.awaiting_key = None;
            util::increment_program_counter(self);
        } else {
            let opcode = self.next_instruction()?;
            util::increment_program_counter(self);
            let instruction = opcode.decode()?;
            trace!(
                "{:#05x}: {} {:?}",
                self.program_counter.wrapping_sub(2),
                opcode,
                instruction
            );
            instruction.execute(self)?;

            if self.awaiting_key.is_some() {
                return Ok(());
            }
        }

        self.tick_timers();
        Ok(())
    }

    fn frame(&self) -> &Graphics {
        &self.graphics
    }

    fn input(&self) -> KeypadHandle {
        self.keypad.handle()
    }
}

impl Chip8 {
    /// Constructs a new CHIP-8 with the default `Config` and appropriately
    /// initializes all fields so that it is ready for the first step.
    /// Essentially this means that the program counter is set to 0x200 and the
    /// charset is loaded at memory address `CHIP8_CHARSET_OFFSET`. Note that no
    /// program is loaded upon initialization.
    pub fn new(sound: Arc<dyn Sound>) -> Self {
        Chip8::with_config(sound, Config::default())
    }

    /// Like `new`, but with the interpreter behavior given by `config`.
    pub fn with_config(sound: Arc<dyn Sound>, config: Config) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_entropy(),
        };

        Chip8 {
            memory: Memory::new(),
            registers: [0; 16],
            index: 0,
            program_counter: CHIP8_PROGRAM_OFFSET,
            graphics: Graphics::new(),
            delay_timer: 0,
            sound_timer: 0,
            keypad: Keypad::new(),
            stack: Stack::new(),
            cycles_since_timer_dec: 0,
            draw: false,
            awaiting_key: None,
            sound,
            rng,
            config,
        }
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.registers
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    /// The register Fx0A is waiting to store a key in, if the machine is
    /// suspended.
    pub fn awaiting_key(&self) -> Option<u8> {
        self.awaiting_key
    }

    /// Returns whether the display changed since the last call.
    pub fn take_draw_flag(&mut self) -> bool {
        std::mem::replace(&mut self.draw, false)
    }

    /// Fetches the instruction the program counter points to.
    fn next_instruction(&self) -> Result<Opcode, Chip8Error> {
        self.memory
            .read_word(self.program_counter)
            .map(Opcode::from)
    }

    /// Decrements the timers every `Config::cycles_per_timer_tick` calls. The
    /// sound device beeps when the sound timer goes from 1 to 0.
    fn tick_timers(&mut self) {
        self.cycles_since_timer_dec = self.cycles_since_timer_dec.saturating_add(1);
        if self.cycles_since_timer_dec < self.config.cycles_per_timer_tick {
            return;
        }
        self.cycles_since_timer_dec = 0;

        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }

        if self.sound_timer > 0 {
            if self.sound_timer == 1 {
                debug!("Sound timer expired");
                self.sound.beep();
            }
            self.sound_timer -= 1;
        }
    }
}
