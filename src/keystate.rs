use crate::error::ErrorDetail;

/// The number of keys in the CHIP-8 keypad.
pub const NUMBER_OF_KEYS: u8 = 16;

/// An abstraction of the state of each key on the CHIP-8 keypad
/// (pressed / not pressed).
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct KeyState {
    /// Array holding a boolean for each key (true means pressed, false means not pressed).
    keys_pressed: [bool; NUMBER_OF_KEYS as usize],
}

impl KeyState {
    /// Constructor that returns a [KeyState] instance with no keys pressed.
    pub(crate) fn new() -> Self {
        KeyState {
            keys_pressed: [false; NUMBER_OF_KEYS as usize],
        }
    }

    /// Returns true if the specified key is pressed, false if the specified key is not
    /// pressed, and returns an [ErrorDetail::InvalidKey] if the specified key is invalid.
    ///
    /// # Arguments
    ///
    /// * `key` - the hex ordinal of the key (valid range 0x0 to 0xF inclusive)
    pub(crate) fn is_key_pressed(&self, key: u8) -> Result<bool, ErrorDetail> {
        match key {
            n if n < NUMBER_OF_KEYS => Ok(self.keys_pressed[n as usize]),
            _ => Err(ErrorDetail::InvalidKey { key }),
        }
    }

    /// Sets the state of the specified key; returns an [ErrorDetail::InvalidKey] if the
    /// specified key is invalid.
    ///
    /// # Arguments
    ///
    /// * `key` - the hex ordinal of the key (valid range 0x0 to 0xF inclusive)
    /// * `status` - boolean representing key state (true meaning pressed)
    pub(crate) fn set_key_status(&mut self, key: u8, status: bool) -> Result<(), ErrorDetail> {
        match key {
            n if n < NUMBER_OF_KEYS => {
                self.keys_pressed[n as usize] = status;
                Ok(())
            }
            _ => Err(ErrorDetail::InvalidKey { key }),
        }
    }

    /// Returns the lowest-numbered key currently pressed, if any.
    pub(crate) fn first_key_pressed(&self) -> Option<u8> {
        self.keys_pressed
            .iter()
            .position(|pressed| *pressed)
            .map(|key| key as u8)
    }

    /// Releases every key.
    pub(crate) fn clear(&mut self) {
        self.keys_pressed = [false; NUMBER_OF_KEYS as usize];
    }
}
