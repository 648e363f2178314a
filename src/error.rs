use crate::processor::StateSnapshot;
use std::error;
use std::fmt;

/// An enum used throughout the Octet crate to describe the specific fault that occurred.
///
/// Load-time variants are returned directly by [Processor::load_program()](crate::Processor::load_program)
/// and [Program](crate::Program) constructors; execution-time variants are wrapped in an
/// [OctetError] by [Processor::execute_cycle()](crate::Processor::execute_cycle).
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    /// The ROM does not fit in the program area of memory
    RomTooLarge { size: usize, max_size: usize },
    /// Fewer ROM bytes could be read than were declared
    RomReadIncomplete { expected: usize, read: usize },
    /// An unrecognised opcode was read from memory
    UnknownInstruction { opcode: u16 },
    /// A subroutine call was made while the stack already held its maximum number of entries
    PushFullStack,
    /// A subroutine return was made while the stack was empty
    PopEmptyStack,
    /// An attempt was made to read/write from an address outside the addressable range
    MemoryAddressOutOfBounds { address: usize },
    /// An instruction attempted to write to the interpreter area below the program start address
    ReservedMemoryWrite { address: usize },
    /// A key ordinal was referenced that is outside the valid CHIP-8 keypad range (0x0 to 0xF)
    InvalidKey { key: u8 },
    /// The processor was asked to execute before a program was loaded
    UnknownError,
}

impl error::Error for ErrorDetail {}

impl fmt::Display for ErrorDetail {
    /// Returns a textual description of each enum variant for display purposes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorDetail::RomTooLarge { size, max_size } => {
                write!(
                    f,
                    "the ROM is {} bytes but at most {} bytes can be loaded",
                    size, max_size
                )
            }
            ErrorDetail::RomReadIncomplete { expected, read } => {
                write!(
                    f,
                    "only {} of {} ROM bytes could be read",
                    read, expected
                )
            }
            ErrorDetail::UnknownInstruction { opcode } => {
                write!(f, "an unrecognised opcode {:#06X} was decoded", opcode)
            }
            ErrorDetail::PushFullStack => {
                write!(f, "an attempt was made to push to the stack while full")
            }
            ErrorDetail::PopEmptyStack => {
                write!(f, "an attempt was made to pop the stack while empty")
            }
            ErrorDetail::MemoryAddressOutOfBounds { address } => {
                write!(f, "memory was accessed out of bounds at {:#06X}", address)
            }
            ErrorDetail::ReservedMemoryWrite { address } => {
                write!(
                    f,
                    "an instruction attempted to write reserved memory at {:#06X}",
                    address
                )
            }
            ErrorDetail::InvalidKey { key } => {
                write!(f, "an invalid key {:#04X} was specified", key)
            }
            ErrorDetail::UnknownError => {
                write!(f, "the processor is not in a state that can execute")
            }
        }
    }
}

/// The error returned to hosting applications when a cycle faults.
///
/// Holds the [ErrorDetail] describing the fault together with an extended
/// [StateSnapshot] of the machine taken at the moment the fault was raised.  A fault never
/// latches the processor: the offending instruction has been skipped, and the caller decides
/// whether to keep executing, re-initialise or stop.
#[derive(Debug)]
pub struct OctetError {
    pub state_snapshot_dump: StateSnapshot,
    pub inner_error: ErrorDetail,
}

impl error::Error for OctetError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.inner_error)
    }
}

impl fmt::Display for OctetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner_error)
    }
}
