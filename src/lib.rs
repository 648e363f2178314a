//! Octet: a CHIP-8 interpreter core.  See [Processor] for the hosting interface.

mod display;
mod error;
mod font;
mod instruction;
mod keystate;
mod memory;
mod options;
mod processor;
mod program;
mod stack;

// Re-exports
pub use crate::display::{Display, DISPLAY_HEIGHT_PIXELS, DISPLAY_WIDTH_PIXELS};
pub use crate::error::*;
pub use crate::keystate::NUMBER_OF_KEYS;
pub use crate::memory::{Memory, MAX_PROGRAM_SIZE_BYTES, MEMORY_SIZE_BYTES, PROGRAM_START_ADDRESS};
pub use crate::options::{Options, TimerMode};
pub use crate::processor::*;
pub use crate::program::Program;
pub use crate::stack::{Stack, STACK_DEPTH};
