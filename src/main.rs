//! Headless Octet runner.
//!
//! Loads a ROM, executes a fixed number of cycles with optional keys held down, and prints
//! the final frame buffer as text:
//!
//! ```bash
//! RUST_LOG=debug octet --rom roms/ibm-logo.ch8 --cycles 200
//! ```

use clap::Parser;
use log::{error, info};
use octet::{CycleOutcome, Options, Processor, Program, TimerMode};
use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

#[doc(hidden)]
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, help = "Path to the ROM file to run")]
    rom: PathBuf,

    #[arg(short, long, help = "JSON options file to load")]
    options: Option<PathBuf>,

    #[arg(short, long, default_value_t = 1000, help = "Number of cycles to execute")]
    cycles: usize,

    #[arg(
        long,
        default_value_t = 10,
        help = "Cycles between timer ticks when the options select external timers"
    )]
    cycles_per_tick: usize,

    #[arg(long, value_parser = parse_key, help = "Hex key (0-F) held down for the whole run")]
    hold_key: Vec<u8>,

    #[arg(long, help = "Write the effective options to this JSON file and continue")]
    save_options: Option<PathBuf>,
}

fn parse_key(value: &str) -> Result<u8, String> {
    match u8::from_str_radix(value.trim_start_matches("0x"), 16) {
        Ok(key) if key < octet::NUMBER_OF_KEYS => Ok(key),
        _ => Err(format!("'{}' is not a key between 0 and F", value)),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let options: Options = match &args.options {
        Some(path) => Options::load_from_file(path)?,
        None => Options::default(),
    };
    if let Some(path) = &args.save_options {
        options.save_to_file(path)?;
        info!("options written to {}", path.display());
    }

    let file: File = File::open(&args.rom)?;
    let size: usize = file.metadata()?.len() as usize;
    let program: Program = Program::read_from(file, size)?;
    let mut processor: Processor = Processor::initialise_and_load(program, options)?;
    for key in &args.hold_key {
        processor.set_key_status(*key, true)?;
    }
    info!("running {} for {} cycles", args.rom.display(), args.cycles);

    let cycles_per_tick: usize = args.cycles_per_tick.max(1);
    for cycle in 1..=args.cycles {
        match processor.execute_cycle() {
            Ok(CycleOutcome::WaitingForKeypress) if args.hold_key.is_empty() => {
                info!("program is waiting for a key that will never arrive, stopping");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                error!("{}", e);
                print!("{}", processor.frame_buffer().to_text('#', '.'));
                return Err(Box::new(e));
            }
        }
        if processor.options().timer_mode == TimerMode::External && cycle % cycles_per_tick == 0
        {
            processor.tick_timers();
        }
    }

    print!("{}", processor.frame_buffer().to_text('#', '.'));
    Ok(())
}
