#![allow(non_snake_case)]

use super::display::Display;
use super::error::{ErrorDetail, OctetError};
use super::font::Font;
use super::instruction::Instruction;
use super::keystate::KeyState;
use super::memory::{Memory, MAX_PROGRAM_SIZE_BYTES, PROGRAM_START_ADDRESS};
use super::options::{Options, TimerMode};
use super::program::Program;
use super::stack::Stack;
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod execute; // separate sub-module for all the instruction execution methods

/// The number of variable registers available.
pub const VARIABLE_REGISTER_COUNT: usize = 16;
/// The address in memory at which the font is loaded.
const FONT_START_ADDRESS: usize = 0x000;

/// An enum used to keep track of the processor execution status.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProcessorStatus {
    /// The processor has been reset and font data loaded, but no program is present
    Initialised,
    /// A program has been loaded into the processor's memory
    ProgramLoaded,
    /// The program is being executed (the fetch->decode->execute cycle has begun)
    Running,
    /// The processor is stalled on an FX0A instruction waiting for a keypress
    WaitingForKeypress,
}

/// The result of a successful call to [Processor::execute_cycle()].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// One instruction was executed and the program counter moved on
    Executed,
    /// An FX0A instruction is waiting for a key; the program counter has not moved and the
    /// same instruction will be retried on the next cycle
    WaitingForKeypress,
    /// The fetched opcode was not recognised; it was skipped as a no-op
    UnknownInstruction { opcode: u16 },
}

/// An enum used to indicate which variant of [StateSnapshot] should be returned when a call is
/// made to [Processor::export_state_snapshot()].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StateSnapshotVerbosity {
    /// Only the frame buffer state will be reported
    Minimal,
    /// The frame buffer, registers, stack and memory state will all be reported
    Extended,
}

/// An enum with variants representing the different state snapshots that can be
/// returned to hosting applications for processing.  Snapshots are copies, so they can be
/// handed to a renderer on another thread without exposing the live frame buffer.
#[derive(Clone, Debug, PartialEq)]
pub enum StateSnapshot {
    /// Minimal snapshot containing only the frame buffer state
    MinimalSnapshot {
        frame_buffer: Display,
        status: ProcessorStatus,
    },
    /// Extended snapshot containing the frame buffer state along with all registers,
    /// stack and memory
    ExtendedSnapshot {
        frame_buffer: Display,
        status: ProcessorStatus,
        stack: Stack,
        memory: Memory,
        program_counter: u16,
        index_register: u16,
        variable_registers: [u8; VARIABLE_REGISTER_COUNT],
        delay_timer: u8,
        sound_timer: u8,
        cycles: usize,
        draw_flag: bool,
    },
}

/// An abstraction of the CHIP-8 processor, and the core public interface to the Octet crate.
///
/// This struct exclusively owns the complete machine state, and exposes methods through which
/// a program can be loaded to memory and executed one cycle at a time, as well as methods for
/// supplying input to the processor (in the form of keypresses) and output to the host application
/// (in the form of a frame buffer and a draw flag).  The processor never blocks and never keeps
/// time: the hosting application decides how often to call [Processor::execute_cycle()] and,
/// in [TimerMode::External], [Processor::tick_timers()].
pub struct Processor {
    // CHIP-8 COMPONENT STATE FIELDS
    frame_buffer: Display, // The display frame buffer
    stack: Stack,          // The call stack (holds return addresses for subroutines)
    memory: Memory,        // The system memory
    program_counter: u16, // The program counter register (points to next opcode location in memory)
    index_register: u16,  // The index register (used to point to memory addresses)
    variable_registers: [u8; VARIABLE_REGISTER_COUNT], // General purpose registers
    delay_timer: u8,      // Delay timer, decrements towards zero when non-zero
    sound_timer: u8,      // Sound timer, decrements towards zero; a tone plays while non-zero
    // ADDITIONAL STATE FIELDS
    keystate: KeyState, // A representation of the state (pressed/not pressed) of each key
    draw_flag: bool,    // Set when the frame buffer changes; cleared by the renderer
    cycles: usize,      // The number of processor cycles that have been executed
    status: ProcessorStatus, // The current execution status of the processor
    rng: StdRng,        // Random source for CXNN
    // CONFIG AND SETUP FIELDS
    font: Font,
    options: Options,
}

impl Processor {
    /// Constructor/builder function that returns a freshly-initialised [Processor] instance
    /// with the supplied program data loaded into memory ready for execution.
    ///
    /// # Arguments
    ///
    /// * `program` - a [Program] instance holding the bytes of the ROM to be executed
    /// * `options` - an [Options] instance holding Octet start-up configuration information
    pub fn initialise_and_load(program: Program, options: Options) -> Result<Self, ErrorDetail> {
        let mut processor: Processor = Processor::new(options);
        processor.load_program(&program)?;
        Ok(processor)
    }

    /// Constructor that returns an initialised [Processor] with an empty program area.
    pub fn new(options: Options) -> Self {
        let mut processor = Processor {
            frame_buffer: Display::new(),
            stack: Stack::new(),
            memory: Memory::new(),
            program_counter: PROGRAM_START_ADDRESS as u16,
            index_register: 0x0,
            variable_registers: [0x0; VARIABLE_REGISTER_COUNT],
            delay_timer: 0x0,
            sound_timer: 0x0,
            keystate: KeyState::new(),
            draw_flag: false,
            cycles: 0,
            status: ProcessorStatus::Initialised,
            rng: StdRng::seed_from_u64(0), // reseeded by initialise()
            font: Font::hexadecimal(),
            options,
        };
        processor.initialise();
        processor
    }

    /// Resets the machine: registers, timers, stack, memory, keypad and frame buffer are
    /// zeroed, the font is reloaded at 0x000, the program counter returns to 0x200 and the
    /// random number generator is re-seeded.  Safe to call any number of times, e.g. before
    /// loading a different ROM.
    pub fn initialise(&mut self) {
        self.program_counter = PROGRAM_START_ADDRESS as u16;
        self.index_register = 0x0;
        self.variable_registers = [0x0; VARIABLE_REGISTER_COUNT];
        self.delay_timer = 0x0;
        self.sound_timer = 0x0;
        self.stack = Stack::new();
        self.memory.clear();
        self.keystate.clear();
        self.frame_buffer.clear();
        self.draw_flag = false;
        self.cycles = 0;
        self.load_font_data();
        self.rng = Processor::seed_rng(&self.options);
        self.status = ProcessorStatus::Initialised;
        debug!("processor initialised");
    }

    /// Copies the supplied program into memory starting at 0x200.  Returns
    /// [ErrorDetail::RomTooLarge] (leaving the machine untouched) if it does not fit.  The rest
    /// of memory is not modified, so this is normally preceded by [Processor::initialise()].
    ///
    /// # Arguments
    ///
    /// * `program` - the ROM to load
    pub fn load_program(&mut self, program: &Program) -> Result<(), ErrorDetail> {
        let size: usize = program.program_data_size();
        if size > MAX_PROGRAM_SIZE_BYTES {
            return Err(ErrorDetail::RomTooLarge {
                size,
                max_size: MAX_PROGRAM_SIZE_BYTES,
            });
        }
        self.memory
            .write_bytes(PROGRAM_START_ADDRESS, program.program_data())?;
        self.status = ProcessorStatus::ProgramLoaded;
        debug!("loaded {} byte program at {:#05X}", size, PROGRAM_START_ADDRESS);
        Ok(())
    }

    /// Returns a copy of the current state of the processor.
    ///
    /// The minimal level of state reporting returns just a copy of the [Display] frame buffer
    /// and the status.  The extended level additionally copies all registers, timers, the
    /// [Stack] and the [Memory].
    ///
    /// # Arguments
    ///
    /// * `verbosity` - the amount of state that should be returned
    pub fn export_state_snapshot(&self, verbosity: StateSnapshotVerbosity) -> StateSnapshot {
        match verbosity {
            StateSnapshotVerbosity::Minimal => StateSnapshot::MinimalSnapshot {
                frame_buffer: self.frame_buffer.clone(),
                status: self.status,
            },
            StateSnapshotVerbosity::Extended => StateSnapshot::ExtendedSnapshot {
                frame_buffer: self.frame_buffer.clone(),
                status: self.status,
                stack: self.stack.clone(),
                memory: self.memory.clone(),
                program_counter: self.program_counter,
                index_register: self.index_register,
                variable_registers: self.variable_registers,
                delay_timer: self.delay_timer,
                sound_timer: self.sound_timer,
                cycles: self.cycles,
                draw_flag: self.draw_flag,
            },
        }
    }

    /// Provides key press input, by setting the state of the specified key
    /// in the internal representation to pressed / not pressed as per supplied value.
    ///
    /// # Arguments
    ///
    /// * `key` - the hex ordinal of the key (valid range 0x0 to 0xF inclusive)
    /// * `status` - the value to set for the specified key (true means pressed)
    pub fn set_key_status(&mut self, key: u8, status: bool) -> Result<(), ErrorDetail> {
        self.keystate.set_key_status(key, status)
    }

    /// Returns true if the specified key is currently pressed.
    pub fn key_status(&self, key: u8) -> Result<bool, ErrorDetail> {
        self.keystate.is_key_pressed(key)
    }

    /// Borrows the live frame buffer.
    pub fn frame_buffer(&self) -> &Display {
        &self.frame_buffer
    }

    /// Returns true if the frame buffer has changed since the draw flag was last cleared.
    pub fn draw_flag(&self) -> bool {
        self.draw_flag
    }

    pub fn clear_draw_flag(&mut self) {
        self.draw_flag = false;
    }

    /// If the frame buffer has changed since it was last taken, clears the draw flag and
    /// returns a copy of the completed frame; otherwise returns `None`.
    pub fn take_frame(&mut self) -> Option<Display> {
        if !self.draw_flag {
            return None;
        }
        self.draw_flag = false;
        Some(self.frame_buffer.clone())
    }

    /// Returns true if the sound timer is active i.e. if the hosting application should play audio
    pub fn sound_timer_active(&self) -> bool {
        self.sound_timer > 0
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn index_register(&self) -> u16 {
        self.index_register
    }

    /// Returns the value of register Vx, or `None` if `x` is not a register index.
    pub fn variable_register(&self, x: usize) -> Option<u8> {
        self.variable_registers.get(x).copied()
    }

    pub fn status(&self) -> ProcessorStatus {
        self.status
    }

    /// Returns the number of instructions fetched since the last initialisation.
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Decrements the delay and sound timers by one each, stopping at zero.  Hosting applications
    /// using [TimerMode::External] should call this at 60 Hz.
    pub fn tick_timers(&mut self) {
        if self.delay_timer > 0x0 {
            self.delay_timer -= 1;
        }
        if self.sound_timer > 0x0 {
            self.sound_timer -= 1;
            if self.sound_timer == 0x0 {
                trace!("sound timer expired");
            }
        }
    }

    /// Executes one iteration of the fetch -> decode -> execute cycle, followed by a timer
    /// decrement when running in [TimerMode::PerCycle].
    ///
    /// Unknown opcodes are logged and skipped, and reported as
    /// [CycleOutcome::UnknownInstruction].  Faults (stack overflow/underflow, out-of-range
    /// memory access, invalid keys) are returned as an [OctetError]; the faulting instruction has
    /// been skipped and execution may continue with the next call.  A program counter that
    /// points past the last complete instruction word faults without moving.
    pub fn execute_cycle(&mut self) -> Result<CycleOutcome, OctetError> {
        match self.status {
            ProcessorStatus::ProgramLoaded => self.status = ProcessorStatus::Running,
            ProcessorStatus::Running | ProcessorStatus::WaitingForKeypress => {
                // no change
            }
            ProcessorStatus::Initialised => {
                return Err(self.fault(ErrorDetail::UnknownError));
            }
        }
        // Fetch two byte opcode from current Program Counter memory location
        let opcode: u16 = match self.memory.read_two_bytes(self.program_counter as usize) {
            Ok(opcode) => opcode,
            Err(e) => return Err(self.fault(e)),
        };
        self.cycles += 1;
        // Increment Program Counter (by two bytes, as we have 16-bit opcodes); control-transfer
        // and skip instructions adjust it further during execution
        self.program_counter += 0x2;
        let result: Result<CycleOutcome, ErrorDetail> = match Instruction::decode_from(opcode) {
            Ok(instruction) => {
                trace!(
                    "{:#05X}: {:#06X} ({})",
                    self.program_counter - 0x2,
                    opcode,
                    instruction.name()
                );
                self.execute(instruction)
            }
            Err(ErrorDetail::UnknownInstruction { opcode }) => {
                warn!(
                    "skipping unknown opcode {:#06X} at {:#05X}",
                    opcode,
                    self.program_counter - 0x2
                );
                Ok(CycleOutcome::UnknownInstruction { opcode })
            }
            Err(e) => Err(e),
        };
        if let TimerMode::PerCycle = self.options.timer_mode {
            self.tick_timers();
        }
        result.map_err(|e| self.fault(e))
    }

    /// Executes the passed Instruction.
    ///
    /// # Arguments
    ///
    /// * `instr` - the instruction to be executed
    fn execute(&mut self, instr: Instruction) -> Result<CycleOutcome, ErrorDetail> {
        match instr {
            Instruction::Op00E0 => self.execute_00E0(),
            Instruction::Op00EE => self.execute_00EE()?,
            Instruction::Op0NNN { nnn } => self.execute_0NNN(nnn),
            Instruction::Op1NNN { nnn } => self.execute_1NNN(nnn),
            Instruction::Op2NNN { nnn } => self.execute_2NNN(nnn)?,
            Instruction::Op3XNN { x, nn } => self.execute_3XNN(x, nn),
            Instruction::Op4XNN { x, nn } => self.execute_4XNN(x, nn),
            Instruction::Op5XY0 { x, y } => self.execute_5XY0(x, y),
            Instruction::Op6XNN { x, nn } => self.execute_6XNN(x, nn),
            Instruction::Op7XNN { x, nn } => self.execute_7XNN(x, nn),
            Instruction::Op8XY0 { x, y } => self.execute_8XY0(x, y),
            Instruction::Op8XY1 { x, y } => self.execute_8XY1(x, y),
            Instruction::Op8XY2 { x, y } => self.execute_8XY2(x, y),
            Instruction::Op8XY3 { x, y } => self.execute_8XY3(x, y),
            Instruction::Op8XY4 { x, y } => self.execute_8XY4(x, y),
            Instruction::Op8XY5 { x, y } => self.execute_8XY5(x, y),
            Instruction::Op8XY6 { x, y } => self.execute_8XY6(x, y),
            Instruction::Op8XY7 { x, y } => self.execute_8XY7(x, y),
            Instruction::Op8XYE { x, y } => self.execute_8XYE(x, y),
            Instruction::Op9XY0 { x, y } => self.execute_9XY0(x, y),
            Instruction::OpANNN { nnn } => self.execute_ANNN(nnn),
            Instruction::OpBNNN { nnn } => self.execute_BNNN(nnn),
            Instruction::OpCXNN { x, nn } => self.execute_CXNN(x, nn),
            Instruction::OpDXYN { x, y, n } => self.execute_DXYN(x, y, n)?,
            Instruction::OpEX9E { x } => self.execute_EX9E(x)?,
            Instruction::OpEXA1 { x } => self.execute_EXA1(x)?,
            Instruction::OpFX07 { x } => self.execute_FX07(x),
            Instruction::OpFX0A { x } => {
                self.execute_FX0A(x);
                if self.status == ProcessorStatus::WaitingForKeypress {
                    return Ok(CycleOutcome::WaitingForKeypress);
                }
            }
            Instruction::OpFX15 { x } => self.execute_FX15(x),
            Instruction::OpFX18 { x } => self.execute_FX18(x),
            Instruction::OpFX1E { x } => self.execute_FX1E(x),
            Instruction::OpFX29 { x } => self.execute_FX29(x),
            Instruction::OpFX33 { x } => self.execute_FX33(x)?,
            Instruction::OpFX55 { x } => self.execute_FX55(x)?,
            Instruction::OpFX65 { x } => self.execute_FX65(x)?,
        }
        Ok(CycleOutcome::Executed)
    }

    // Loads the hexadecimal font into the interpreter area at the bottom of memory
    fn load_font_data(&mut self) {
        let font_data: &[u8] = self.font.font_data();
        self.memory.bytes[FONT_START_ADDRESS..FONT_START_ADDRESS + font_data.len()]
            .copy_from_slice(font_data);
    }

    fn seed_rng(options: &Options) -> StdRng {
        match options.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    // Draws a uniformly distributed random byte
    fn random_byte(&mut self) -> u8 {
        self.rng.gen()
    }

    // Wraps an ErrorDetail raised this cycle into an OctetError carrying a full state dump
    fn fault(&self, inner_error: ErrorDetail) -> OctetError {
        warn!(
            "fault after cycle {} (pc {:#05X}): {}",
            self.cycles, self.program_counter, inner_error
        );
        OctetError {
            state_snapshot_dump: self.export_state_snapshot(StateSnapshotVerbosity::Extended),
            inner_error,
        }
    }
}
