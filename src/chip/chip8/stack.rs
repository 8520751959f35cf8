use crate::chip::chip8::{constants::CHIP8_STACK_DEPTH, Chip8Error};

/// The call stack. Note that there are no instructions that modify the stack directly; it only
/// stores return addresses for CALL and RET.
pub struct Stack {
    addresses: [u16; CHIP8_STACK_DEPTH],

    /// Points to the next free slot, i.e., it equals the number of stored addresses.
    pointer: usize,
}

impl Stack {
    pub fn new() -> Self {
        Stack {
            addresses: [0; CHIP8_STACK_DEPTH],
            pointer: 0,
        }
    }

    /// Stores `address` and advances the stack pointer.
    ///
    /// Fails with `Chip8Error::StackOverflow` if `CHIP8_STACK_DEPTH` addresses are stored already.
    pub fn push(&mut self, address: u16) -> Result<(), Chip8Error> {
        if self.pointer == CHIP8_STACK_DEPTH {
            return Err(Chip8Error::StackOverflow {
                capacity: CHIP8_STACK_DEPTH,
            });
        }
        self.addresses[self.pointer] = address;
        self.pointer += 1;
        Ok(())
    }

    /// Retreats the stack pointer and returns the address stored there.
    ///
    /// Fails with `Chip8Error::StackUnderflow` on an empty stack.
    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        if self.pointer == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.pointer -= 1;
        Ok(self.addresses[self.pointer])
    }

    pub fn len(&self) -> usize {
        self.pointer
    }

    pub fn is_empty(&self) -> bool {
        self.pointer == 0
    }
}

impl Default for Stack {
    fn default() -> Self {
        Stack::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop() {
        let mut stack = Stack::new();
        stack.push(0x202).unwrap();
        stack.push(0x34A).unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop(), Ok(0x34A));
        assert_eq!(stack.pop(), Ok(0x202));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_overflow() {
        let mut stack = Stack::new();
        for i in 0..CHIP8_STACK_DEPTH {
            stack.push(i as u16).unwrap();
        }
        assert_eq!(
            stack.push(0xFFF),
            Err(Chip8Error::StackOverflow { capacity: 16 })
        );
        assert_eq!(stack.len(), CHIP8_STACK_DEPTH);
        assert_eq!(stack.pop(), Ok(15));
    }

    #[test]
    fn test_underflow() {
        let mut stack = Stack::new();
        assert_eq!(stack.pop(), Err(Chip8Error::StackUnderflow));

        stack.push(0x200).unwrap();
        stack.pop().unwrap();
        assert_eq!(stack.pop(), Err(Chip8Error::StackUnderflow));
        assert!(stack.is_empty());
    }
}
