use crate::chip::chip8::{
    constants::{CHIP8_CHARSET, CHIP8_CHARSET_LEN, CHIP8_CHARSET_OFFSET, CHIP8_MEMORY_SIZE},
    Chip8Error,
};

/// The 4096 bytes of main memory. Addresses are 16 bit wide, but only the first 4096 of them
/// are backed; accessing anything above fails with `Chip8Error::OutOfBoundsAddress`.
pub struct Memory {
    bytes: [u8; CHIP8_MEMORY_SIZE],
}

impl Memory {
    /// Constructs zeroed memory with the charset loaded at `CHIP8_CHARSET_OFFSET`.
    pub fn new() -> Self {
        let mut bytes = [0; CHIP8_MEMORY_SIZE];
        let offset = CHIP8_CHARSET_OFFSET as usize;
        bytes[offset..offset + CHIP8_CHARSET.len()].copy_from_slice(&CHIP8_CHARSET);
        Memory { bytes }
    }

    pub fn read(&self, addr: u16) -> Result<u8, Chip8Error> {
        let addr = Self::checked(addr as usize)?;
        Ok(self.bytes[addr])
    }

    pub fn write(&mut self, addr: u16, data: u8) -> Result<(), Chip8Error> {
        let addr = Self::checked(addr as usize)?;
        self.bytes[addr] = data;
        Ok(())
    }

    /// Reads a big-endian word, i.e., the high byte lives at `addr` and the low byte at `addr + 1`.
    pub fn read_word(&self, addr: u16) -> Result<u16, Chip8Error> {
        let bytes = self.read_slice(addr, 2)?;
        Ok(u16::from(bytes[0]) << 8 | u16::from(bytes[1]))
    }

    /// Writes `data` as a big-endian word. Nothing is written if `addr + 1` is out of bounds.
    pub fn write_word(&mut self, addr: u16, data: u16) -> Result<(), Chip8Error> {
        self.write_slice(addr, &data.to_be_bytes())
    }

    /// Returns the `len` bytes starting at `addr`.
    pub fn read_slice(&self, addr: u16, len: usize) -> Result<&[u8], Chip8Error> {
        if len == 0 {
            return Ok(&[]);
        }
        let start = addr as usize;
        Self::checked(start + len - 1)?;
        Ok(&self.bytes[start..start + len])
    }

    /// Copies `data` to memory starting at `addr`. The whole range is checked before the
    /// first byte is written, so a failed write leaves memory untouched.
    pub fn write_slice(&mut self, addr: u16, data: &[u8]) -> Result<(), Chip8Error> {
        if data.is_empty() {
            return Ok(());
        }
        let start = addr as usize;
        Self::checked(start + data.len() - 1)?;
        self.bytes[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Like `write_slice`, but used for writes issued by the running program: the charset is
    /// read-only and a write overlapping it fails with `Chip8Error::ReadOnlyAddress`.
    pub fn store(&mut self, addr: u16, data: &[u8]) -> Result<(), Chip8Error> {
        if data.is_empty() {
            return Ok(());
        }
        let start = addr as usize;
        let end = start + data.len();
        Self::checked(end - 1)?;

        let charset_start = CHIP8_CHARSET_OFFSET as usize;
        let charset_end = charset_start + CHIP8_CHARSET_LEN as usize;
        if start < charset_end && charset_start < end {
            return Err(Chip8Error::ReadOnlyAddress {
                address: start.max(charset_start),
            });
        }
        self.write_slice(addr, data)
    }

    fn checked(addr: usize) -> Result<usize, Chip8Error> {
        if addr < CHIP8_MEMORY_SIZE {
            Ok(addr)
        } else {
            Err(Chip8Error::OutOfBoundsAddress { address: addr })
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new()
    }
}
