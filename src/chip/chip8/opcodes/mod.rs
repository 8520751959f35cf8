mod arithmetic_and_logic;
mod program_flow;
mod system;

use ux::u12;

use crate::chip::chip8::{util, Chip8, Chip8Error};

/// Represents a Chip 8 opcode. A Chip 8 opcode is two bytes long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Opcode {
    /// The instruction class is the most significant nibble of the opcode.
    /// Note that we use a u8 to represent the instruction class here for
    /// convenience, but ensure that a valid opcode can only be constructed
    /// if the four most significant bits of the u8 are 0.
    instruction_class: u8,
    /// The payload constitutes the remaining nibbles of the opcode.
    payload: OpcodePayload,
}

/// Represents the payload of a Chip 8 opcode. That is the opcode without
/// the most significant nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct OpcodePayload {
    /// The nibbles representing the payload. Note that we use the u8 type
    /// here for convenience, but ensure that valid payloads can only be
    /// constructed if the four most significant bits of the u8 are 0.
    bytes: [u8; 3],
}

impl OpcodePayload {
    /// Interprets the opcode payload as an address in the range 0x000 to
    /// 0xFFF (inclusive).
    fn address(&self) -> u12 {
        u12::new((self.bytes[0] as u16) << 8 | (self.bytes[1] as u16) << 4 | self.bytes[2] as u16)
    }

    /// Interprets the least significant byte of the payload as a value in
    /// range 0x00 - 0xFF (inclusive).
    fn value(&self) -> u8 {
        (self.bytes[1] << 4) | self.bytes[2]
    }

    /// Interprets the opcode payload as three operands, each of size
    /// one nibble, i.e., in range 0x0 - 0xF (inclusive) and returns
    /// a triple representing these values.
    fn operands(&self) -> (u8, u8, u8) {
        (self.bytes[0], self.bytes[1], self.bytes[2])
    }
}

impl Opcode {
    /// Constructs a new `Opcode` given its byte representation.
    pub(super) fn new(opcode: &[u8; 2]) -> Opcode {
        Opcode {
            instruction_class: opcode[0] >> 4,
            payload: OpcodePayload {
                bytes: [opcode[0] & 0xF, opcode[1] >> 4, opcode[1] & 0xF],
            },
        }
    }

    /// The opcode as the 16 bit word it was read from.
    pub(super) fn raw(&self) -> u16 {
        u16::from(self.instruction_class) << 12 | u16::from(self.payload.address())
    }

    /// Maps the opcode to the instruction it encodes.
    ///
    /// Fails with `Chip8Error::UnknownOpcode` for every word that is not part of the
    /// CHIP-8 instruction set. This includes 0nnn (SYS), which would call machine code.
    pub(super) fn decode(&self) -> Result<Instruction, Chip8Error> {
        let (x, y, n) = self.payload.operands();
        let address = self.payload.address();
        let value = self.payload.value();

        let instruction = match (self.instruction_class, x, y, n) {
            (0x0, 0x0, 0xE, 0x0) => Instruction::ClearScreen,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0x1, ..) => Instruction::Jump(address),
            (0x2, ..) => Instruction::Call(address),
            (0x3, ..) => Instruction::SkipEqualValue { x, value },
            (0x4, ..) => Instruction::SkipNotEqualValue { x, value },
            (0x5, _, _, 0x0) => Instruction::SkipEqualRegister { x, y },
            (0x6, ..) => Instruction::LoadValue { x, value },
            (0x7, ..) => Instruction::AddValue { x, value },
            (0x8, _, _, 0x0) => Instruction::LoadRegister { x, y },
            (0x8, _, _, 0x1) => Instruction::Or { x, y },
            (0x8, _, _, 0x2) => Instruction::And { x, y },
            (0x8, _, _, 0x3) => Instruction::Xor { x, y },
            (0x8, _, _, 0x4) => Instruction::AddRegister { x, y },
            (0x8, _, _, 0x5) => Instruction::Sub { x, y },
            (0x8, _, _, 0x6) => Instruction::ShiftRight { x },
            (0x8, _, _, 0x7) => Instruction::SubNegated { x, y },
            (0x8, _, _, 0xE) => Instruction::ShiftLeft { x },
            (0x9, _, _, 0x0) => Instruction::SkipNotEqualRegister { x, y },
            (0xA, ..) => Instruction::LoadIndex(address),
            (0xB, ..) => Instruction::JumpOffset(address),
            (0xC, ..) => Instruction::Random { x, value },
            (0xD, ..) => Instruction::Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => Instruction::SkipKeyPressed { x },
            (0xE, _, 0xA, 0x1) => Instruction::SkipKeyNotPressed { x },
            (0xF, _, 0x0, 0x7) => Instruction::LoadDelay { x },
            (0xF, _, 0x0, 0xA) => Instruction::WaitKey { x },
            (0xF, _, 0x1, 0x5) => Instruction::SetDelay { x },
            (0xF, _, 0x1, 0x8) => Instruction::SetSound { x },
            (0xF, _, 0x1, 0xE) => Instruction::AddIndex { x },
            (0xF, _, 0x2, 0x9) => Instruction::LoadGlyph { x },
            (0xF, _, 0x3, 0x3) => Instruction::StoreBcd { x },
            (0xF, _, 0x5, 0x5) => Instruction::StoreRegisters { x },
            (0xF, _, 0x6, 0x5) => Instruction::LoadRegisters { x },
            _ => return Err(Chip8Error::UnknownOpcode { opcode: self.raw() }),
        };
        Ok(instruction)
    }
}

impl From<u16> for Opcode {
    fn from(word: u16) -> Self {
        Opcode::new(&word.to_be_bytes())
    }
}

/// Every instruction of the CHIP-8 instruction set. `x` and `y` select the registers Vx and Vy,
/// `value` is an immediate byte and `n` an immediate nibble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Instruction {
    /// 00E0 - CLS
    ClearScreen,
    /// 00EE - RET
    Return,
    /// 1nnn - JP addr
    Jump(u12),
    /// 2nnn - CALL addr
    Call(u12),
    /// 3xkk - SE Vx, byte
    SkipEqualValue { x: u8, value: u8 },
    /// 4xkk - SNE Vx, byte
    SkipNotEqualValue { x: u8, value: u8 },
    /// 5xy0 - SE Vx, Vy
    SkipEqualRegister { x: u8, y: u8 },
    /// 6xkk - LD Vx, byte
    LoadValue { x: u8, value: u8 },
    /// 7xkk - ADD Vx, byte
    AddValue { x: u8, value: u8 },
    /// 8xy0 - LD Vx, Vy
    LoadRegister { x: u8, y: u8 },
    /// 8xy1 - OR Vx, Vy
    Or { x: u8, y: u8 },
    /// 8xy2 - AND Vx, Vy
    And { x: u8, y: u8 },
    /// 8xy3 - XOR Vx, Vy
    Xor { x: u8, y: u8 },
    /// 8xy4 - ADD Vx, Vy
    AddRegister { x: u8, y: u8 },
    /// 8xy5 - SUB Vx, Vy
    Sub { x: u8, y: u8 },
    /// 8xy6 - SHR Vx
    ShiftRight { x: u8 },
    /// 8xy7 - SUBN Vx, Vy
    SubNegated { x: u8, y: u8 },
    /// 8xyE - SHL Vx
    ShiftLeft { x: u8 },
    /// 9xy0 - SNE Vx, Vy
    SkipNotEqualRegister { x: u8, y: u8 },
    /// Annn - LD I, addr
    LoadIndex(u12),
    /// Bnnn - JP V0, addr
    JumpOffset(u12),
    /// Cxkk - RND Vx, byte
    Random { x: u8, value: u8 },
    /// Dxyn - DRW Vx, Vy, nibble
    Draw { x: u8, y: u8, n: u8 },
    /// Ex9E - SKP Vx
    SkipKeyPressed { x: u8 },
    /// ExA1 - SKNP Vx
    SkipKeyNotPressed { x: u8 },
    /// Fx07 - LD Vx, DT
    LoadDelay { x: u8 },
    /// Fx0A - LD Vx, K
    WaitKey { x: u8 },
    /// Fx15 - LD DT, Vx
    SetDelay { x: u8 },
    /// Fx18 - LD ST, Vx
    SetSound { x: u8 },
    /// Fx1E - ADD I, Vx
    AddIndex { x: u8 },
    /// Fx29 - LD F, Vx
    LoadGlyph { x: u8 },
    /// Fx33 - LD B, Vx
    StoreBcd { x: u8 },
    /// Fx55 - LD [I], Vx
    StoreRegisters { x: u8 },
    /// Fx65 - LD Vx, [I]
    LoadRegisters { x: u8 },
}

impl Instruction {
    /// Executes `self` relative to the given state. Note that this method will in-place modify
    /// the given state, and that the program counter already points to the next instruction.
    pub(super) fn execute(self, state: &mut Chip8) -> Result<(), Chip8Error> {
        use Instruction::*;

        match self {
            ClearScreen => system::clear_screen(state),
            Return => program_flow::ret(state)?,
            Jump(address) => program_flow::jump(state, address),
            Call(address) => program_flow::call(state, address)?,
            SkipEqualValue { x, value } => {
                let skip = state.registers[x as usize] == value;
                util::conditional_skip(state, skip)
            }
            SkipNotEqualValue { x, value } => {
                let skip = state.registers[x as usize] != value;
                util::conditional_skip(state, skip)
            }
            SkipEqualRegister { x, y } => {
                let skip = state.registers[x as usize] == state.registers[y as usize];
                util::conditional_skip(state, skip)
            }
            SkipNotEqualRegister { x, y } => {
                let skip = state.registers[x as usize] != state.registers[y as usize];
                util::conditional_skip(state, skip)
            }
            SkipKeyPressed { x } => {
                let skip = state.keypad.is_pressed(state.registers[x as usize]);
                util::conditional_skip(state, skip)
            }
            SkipKeyNotPressed { x } => {
                let skip = !state.keypad.is_pressed(state.registers[x as usize]);
                util::conditional_skip(state, skip)
            }
            JumpOffset(address) => program_flow::jump_offset(state, address),
            LoadValue { x, value } => state.registers[x as usize] = value,
            AddValue { x, value } => arithmetic_and_logic::add_value(state, x, value),
            LoadRegister { x, y } => {
                arithmetic_and_logic::modify_registers(state, x, y, |_, v2| (v2, None))
            }
            Or { x, y } => {
                arithmetic_and_logic::modify_registers(state, x, y, |v1, v2| (v1 | v2, None))
            }
            And { x, y } => {
                arithmetic_and_logic::modify_registers(state, x, y, |v1, v2| (v1 & v2, None))
            }
            Xor { x, y } => {
                arithmetic_and_logic::modify_registers(state, x, y, |v1, v2| (v1 ^ v2, None))
            }
            AddRegister { x, y } => arithmetic_and_logic::add_registers(state, x, y),
            Sub { x, y } => arithmetic_and_logic::sub(state, x, y),
            SubNegated { x, y } => arithmetic_and_logic::sub_negated(state, x, y),
            ShiftRight { x } => arithmetic_and_logic::shift_right(state, x),
            ShiftLeft { x } => arithmetic_and_logic::shift_left(state, x),
            LoadIndex(address) => state.index = u16::from(address),
            AddIndex { x } => arithmetic_and_logic::add_index(state, x),
            Random { x, value } => arithmetic_and_logic::random(state, x, value),
            Draw { x, y, n } => system::draw(state, x, y, n)?,
            LoadDelay { x } => state.registers[x as usize] = state.delay_timer,
            SetDelay { x } => state.delay_timer = state.registers[x as usize],
            SetSound { x } => state.sound_timer = state.registers[x as usize],
            WaitKey { x } => system::wait_key(state, x),
            LoadGlyph { x } => system::load_glyph(state, x),
            StoreBcd { x } => system::store_bcd(state, x)?,
            StoreRegisters { x } => system::store_registers(state, x)?,
            LoadRegisters { x } => system::load_registers(state, x)?,
        };
        Ok(())
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:04X}", self.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(word: u16) -> Result<Instruction, Chip8Error> {
        Opcode::from(word).decode()
    }

    #[test]
    fn test_nibbles() {
        let opcode = Opcode::from(0xABCD);
        assert_eq!(opcode.instruction_class, 0xA);
        assert_eq!(opcode.payload.operands(), (0xB, 0xC, 0xD));
        assert_eq!(opcode.payload.value(), 0xCD);
        assert_eq!(u16::from(opcode.payload.address()), 0xBCD);
        assert_eq!(opcode.raw(), 0xABCD);
        assert_eq!(opcode.to_string(), "ABCD");
    }

    #[test]
    fn test_decode_system_and_flow() {
        assert_eq!(decode(0x00E0), Ok(Instruction::ClearScreen));
        assert_eq!(decode(0x00EE), Ok(Instruction::Return));
        assert_eq!(decode(0x1ABC), Ok(Instruction::Jump(u12::new(0xABC))));
        assert_eq!(decode(0x2ABC), Ok(Instruction::Call(u12::new(0xABC))));
        assert_eq!(
            decode(0x3A12),
            Ok(Instruction::SkipEqualValue { x: 0xA, value: 0x12 })
        );
        assert_eq!(
            decode(0x4A12),
            Ok(Instruction::SkipNotEqualValue { x: 0xA, value: 0x12 })
        );
        assert_eq!(
            decode(0x5AB0),
            Ok(Instruction::SkipEqualRegister { x: 0xA, y: 0xB })
        );
        assert_eq!(
            decode(0x9AB0),
            Ok(Instruction::SkipNotEqualRegister { x: 0xA, y: 0xB })
        );
        assert_eq!(decode(0xBFFF), Ok(Instruction::JumpOffset(u12::new(0xFFF))));
        assert_eq!(decode(0xE39E), Ok(Instruction::SkipKeyPressed { x: 0x3 }));
        assert_eq!(decode(0xE3A1), Ok(Instruction::SkipKeyNotPressed { x: 0x3 }));
    }

    #[test]
    fn test_decode_arithmetic() {
        assert_eq!(decode(0x6122), Ok(Instruction::LoadValue { x: 1, value: 0x22 }));
        assert_eq!(decode(0x7122), Ok(Instruction::AddValue { x: 1, value: 0x22 }));
        assert_eq!(decode(0x8120), Ok(Instruction::LoadRegister { x: 1, y: 2 }));
        assert_eq!(decode(0x8121), Ok(Instruction::Or { x: 1, y: 2 }));
        assert_eq!(decode(0x8122), Ok(Instruction::And { x: 1, y: 2 }));
        assert_eq!(decode(0x8123), Ok(Instruction::Xor { x: 1, y: 2 }));
        assert_eq!(decode(0x8124), Ok(Instruction::AddRegister { x: 1, y: 2 }));
        assert_eq!(decode(0x8125), Ok(Instruction::Sub { x: 1, y: 2 }));
        assert_eq!(decode(0x8126), Ok(Instruction::ShiftRight { x: 1 }));
        assert_eq!(decode(0x8127), Ok(Instruction::SubNegated { x: 1, y: 2 }));
        assert_eq!(decode(0x812E), Ok(Instruction::ShiftLeft { x: 1 }));
        assert_eq!(decode(0xA123), Ok(Instruction::LoadIndex(u12::new(0x123))));
        assert_eq!(decode(0xC1FF), Ok(Instruction::Random { x: 1, value: 0xFF }));
        assert_eq!(decode(0xD125), Ok(Instruction::Draw { x: 1, y: 2, n: 5 }));
    }

    #[test]
    fn test_decode_misc() {
        assert_eq!(decode(0xF107), Ok(Instruction::LoadDelay { x: 1 }));
        assert_eq!(decode(0xF10A), Ok(Instruction::WaitKey { x: 1 }));
        assert_eq!(decode(0xF115), Ok(Instruction::SetDelay { x: 1 }));
        assert_eq!(decode(0xF118), Ok(Instruction::SetSound { x: 1 }));
        assert_eq!(decode(0xF11E), Ok(Instruction::AddIndex { x: 1 }));
        assert_eq!(decode(0xF129), Ok(Instruction::LoadGlyph { x: 1 }));
        assert_eq!(decode(0xF133), Ok(Instruction::StoreBcd { x: 1 }));
        assert_eq!(decode(0xF155), Ok(Instruction::StoreRegisters { x: 1 }));
        assert_eq!(decode(0xF165), Ok(Instruction::LoadRegisters { x: 1 }));
    }

    #[test]
    fn test_decode_unknown() {
        for &word in &[
            0x0000, 0x0123, 0x00E1, 0x00EF, 0x5121, 0x8008, 0x800F, 0x912F, 0xE002, 0xE19F,
            0xF000, 0xF0FF, 0xF156,
        ] {
            assert_eq!(
                decode(word),
                Err(Chip8Error::UnknownOpcode { opcode: word }),
                "{:04X} should not decode",
                word
            );
        }
    }
}
