use crossbeam_channel::{unbounded, Receiver, SendError, Sender};

/// Number of keys on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

/// A change of the keypad state, sent by an input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(u8),
    Released(u8),
    ReleaseAll,
}

/// The keypad as seen by the interpreter. The interpreter is the only writer of the key state:
/// input collaborators send `KeyEvent`s through a `KeypadHandle`, and the interpreter applies them
/// when it polls at the start of each step.
pub struct Keypad {
    keys: [bool; KEY_COUNT],
    events: Receiver<KeyEvent>,
    sender: Sender<KeyEvent>,

    /// The first key that went from released to pressed during the last poll.
    fresh_press: Option<u8>,
}

/// The sending side of the keypad, handed to input collaborators. It can be cloned and moved to
/// other threads.
#[derive(Clone)]
pub struct KeypadHandle {
    sender: Sender<KeyEvent>,
}

impl Keypad {
    pub fn new() -> Self {
        let (sender, events) = unbounded();
        Keypad {
            keys: [false; KEY_COUNT],
            events,
            sender,
            fresh_press: None,
        }
    }

    pub fn handle(&self) -> KeypadHandle {
        KeypadHandle {
            sender: self.sender.clone(),
        }
    }

    /// Applies all pending events.
    pub fn poll(&mut self) {
        self.fresh_press = None;
        for event in self.events.try_iter() {
            match event {
                KeyEvent::Pressed(key) => {
                    let key_state = &mut self.keys[key as usize];
                    if !*key_state && self.fresh_press.is_none() {
                        self.fresh_press = Some(key);
                    }
                    *key_state = true;
                }
                KeyEvent::Released(key) => self.keys[key as usize] = false,
                KeyEvent::ReleaseAll => self.keys = [false; KEY_COUNT],
            }
        }
    }

    /// Returns the key that was freshly pressed during the last poll, if any, and forgets it.
    pub fn take_fresh_press(&mut self) -> Option<u8> {
        self.fresh_press.take()
    }

    /// Whether `key` is held down. Only the low nibble of `key` is considered.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Keypad::new()
    }
}

impl KeypadHandle {
    /// # Panics
    /// In case `key` is not in range 0x0 - 0xF (inclusive).
    pub fn press(&self, key: u8) -> Result<(), SendError<KeyEvent>> {
        assert!(key & 0x0F == key, "Invalid key {:#x}", key);
        self.sender.send(KeyEvent::Pressed(key))
    }

    /// # Panics
    /// In case `key` is not in range 0x0 - 0xF (inclusive).
    pub fn release(&self, key: u8) -> Result<(), SendError<KeyEvent>> {
        assert!(key & 0x0F == key, "Invalid key {:#x}", key);
        self.sender.send(KeyEvent::Released(key))
    }

    pub fn release_all(&self) -> Result<(), SendError<KeyEvent>> {
        self.sender.send(KeyEvent::ReleaseAll)
    }
}
