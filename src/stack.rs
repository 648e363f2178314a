use crate::error::ErrorDetail;

/// The number of return addresses the stack can hold.
pub const STACK_DEPTH: usize = 16;

/// An abstraction of the CHIP-8 stack, used for holding return addresses from function calls.
#[derive(Clone, Debug, PartialEq)]
pub struct Stack {
    /// A stack-allocated array of 16-bit values representing the entire CHIP-8 stack.
    pub bytes: [u16; STACK_DEPTH],
    /// A pointer to the current top of the stack (i.e. the next available empty slot), which
    /// is also the number of entries in use.
    pub pointer: usize,
}

impl Stack {
    /// Constructor that returns a [Stack] instance, initialised to zero entries.
    pub(crate) fn new() -> Self {
        Stack {
            bytes: [0x0; STACK_DEPTH],
            pointer: 0,
        }
    }

    /// Pushes the specified 16-bit value on to the top of the stack.  If the stack is already
    /// full, returns [ErrorDetail::PushFullStack] and leaves the stack unchanged.
    ///
    /// # Arguments
    ///
    /// * `value` - the value to push on to the stack
    pub fn push(&mut self, value: u16) -> Result<(), ErrorDetail> {
        if self.pointer >= STACK_DEPTH {
            return Err(ErrorDetail::PushFullStack);
        }
        self.bytes[self.pointer] = value;
        self.pointer += 1;
        Ok(())
    }

    /// Pops the top entry off the stack and returns it.  If the stack is already empty, returns
    /// [ErrorDetail::PopEmptyStack].
    pub fn pop(&mut self) -> Result<u16, ErrorDetail> {
        if self.pointer == 0 {
            return Err(ErrorDetail::PopEmptyStack);
        }
        // Decrement the stack pointer (before accessing the item at this index)
        self.pointer -= 1;
        Ok(self.bytes[self.pointer])
    }

    /// Returns the number of entries currently on the stack.
    pub fn len(&self) -> usize {
        self.pointer
    }

    pub fn is_empty(&self) -> bool {
        self.pointer == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop() {
        let mut stack: Stack = Stack::new();
        stack.bytes[0] = 0xC4;
        stack.pointer = 1;
        assert!(stack.pop().unwrap() == 0xC4 && stack.pointer == 0);
    }

    #[test]
    fn test_pop_empty_error() {
        let mut stack: Stack = Stack::new();
        assert_eq!(stack.pop().unwrap_err(), ErrorDetail::PopEmptyStack);
        assert_eq!(stack.pointer, 0);
    }

    #[test]
    fn test_push() {
        let mut stack: Stack = Stack::new();
        stack.bytes[0] = 0xC4;
        stack.pointer = 1;
        assert!(stack.push(0xFF).is_ok() && stack.bytes[1] == 0xFF && stack.pointer == 2);
    }

    #[test]
    fn test_push_full_error() {
        let mut stack: Stack = Stack::new();
        for i in 0..STACK_DEPTH {
            stack.push(i as u16).unwrap();
        }
        assert_eq!(stack.push(0xFF).unwrap_err(), ErrorDetail::PushFullStack);
        assert_eq!(stack.len(), STACK_DEPTH);
        assert_eq!(stack.bytes[STACK_DEPTH - 1], (STACK_DEPTH - 1) as u16);
    }
}
