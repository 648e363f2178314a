use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// How the delay and sound timers are driven.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerMode {
    /// Both timers decrement once at the end of every executed cycle, so their rate is tied to
    /// the rate at which the hosting application calls
    /// [Processor::execute_cycle()](crate::Processor::execute_cycle).
    PerCycle,
    /// Timers only decrement when the hosting application calls
    /// [Processor::tick_timers()](crate::Processor::tick_timers), normally at 60 Hz,
    /// independently of instruction throughput.
    External,
}

/// A struct to allow specification of Octet start-up parameters.
///
/// An instance is passed to
/// [Processor::initialise_and_load()](crate::processor::Processor::initialise_and_load).  Options
/// can be persisted as JSON with [Options::save_to_file()] and read back with
/// [Options::load_from_file()].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Which collaborator drives the delay and sound timers.
    pub timer_mode: TimerMode,
    /// Seed for the random number generator used by CXNN.  When `None` the generator is seeded
    /// from operating system entropy every time the processor is initialised.
    pub rng_seed: Option<u64>,
}

impl Default for Options {
    /// Constructor that returns an [Options] instance using typical default settings.
    fn default() -> Self {
        Options {
            timer_mode: TimerMode::PerCycle,
            rng_seed: None,
        }
    }
}

impl Options {
    /// Reads an [Options] instance from the JSON file at the specified path.
    ///
    /// # Arguments
    ///
    /// * `path` - the location of the JSON options file
    pub fn load_from_file(path: &Path) -> io::Result<Self> {
        let json: String = fs::read_to_string(path)?;
        let options: Options = serde_json::from_str(&json)?;
        Ok(options)
    }

    /// Writes this [Options] instance to the specified path as pretty-printed JSON.
    ///
    /// # Arguments
    ///
    /// * `path` - the location the JSON options file should be written to
    pub fn save_to_file(&self, path: &Path) -> io::Result<()> {
        let json: String = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }
}
