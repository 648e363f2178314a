//! End-to-end runs of small hand-assembled ROMs through the public interface.

use octet::{
    CycleOutcome, ErrorDetail, Options, Processor, ProcessorStatus, Program, StateSnapshot,
    StateSnapshotVerbosity, TimerMode, DISPLAY_WIDTH_PIXELS, PROGRAM_START_ADDRESS, STACK_DEPTH,
};
use std::fs::File;
use std::io::Write;

fn assemble(opcodes: &[u16]) -> Vec<u8> {
    opcodes.iter().flat_map(|op| op.to_be_bytes()).collect()
}

fn boot(opcodes: &[u16], options: Options) -> Processor {
    let program: Program = Program::new(assemble(opcodes)).unwrap();
    Processor::initialise_and_load(program, options).unwrap()
}

fn seeded_options(timer_mode: TimerMode) -> Options {
    Options {
        timer_mode,
        rng_seed: Some(0x5EED),
    }
}

fn run(processor: &mut Processor, cycles: usize) {
    for _ in 0..cycles {
        processor.execute_cycle().unwrap();
    }
}

#[test]
fn draws_bcd_digits_of_a_register() {
    // V0 = 137, store its digits at 0x300, load them back into V0..V2 and draw each glyph
    let opcodes: [u16; 15] = [
        0x6089, // LD V0, 137
        0xA300, // LD I, 0x300
        0xF033, // LD B, V0
        0xF265, // LD V2, [I]
        0x6A00, // LD VA, 0
        0x6B00, // LD VB, 0
        0xF029, // LD F, V0
        0xDAB5, // DRW VA, VB, 5
        0x7A05, // ADD VA, 5
        0xF129, // LD F, V1
        0xDAB5, // DRW VA, VB, 5
        0x7A05, // ADD VA, 5
        0xF229, // LD F, V2
        0xDAB5, // DRW VA, VB, 5
        0x121C, // JP 0x21C
    ];
    let mut processor: Processor = boot(&opcodes, seeded_options(TimerMode::PerCycle));
    run(&mut processor, opcodes.len() + 2);

    assert_eq!(processor.variable_register(0x0), Some(1));
    assert_eq!(processor.variable_register(0x1), Some(3));
    assert_eq!(processor.variable_register(0x2), Some(7));
    assert_eq!(processor.variable_register(0xF), Some(0));
    assert_eq!(processor.program_counter(), 0x21C);

    let text: String = processor.frame_buffer().to_text('#', '.');
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), 32);
    assert_eq!(rows[0].len(), DISPLAY_WIDTH_PIXELS);
    // Glyphs "1", "3" and "7" side by side, four columns each with a one column gap
    assert_eq!(&rows[0][..15], "..#..####.####.");
    assert_eq!(&rows[1][..15], ".##.....#....#.");
    assert_eq!(&rows[2][..15], "..#..####...#..");
    assert_eq!(&rows[3][..15], "..#.....#..#...");
    assert_eq!(&rows[4][..15], ".###.####..#...");
    assert!(rows[5].chars().all(|c| c == '.'));
}

#[test]
fn subroutine_returns_to_caller() {
    let opcodes: [u16; 6] = [
        0x2206, // CALL 0x206
        0x6A01, // LD VA, 1
        0x1204, // JP 0x204
        0xA00A, // LD I, 0x00A
        0xD005, // DRW V0, V0, 5
        0x00EE, // RET
    ];
    let mut processor: Processor = boot(&opcodes, seeded_options(TimerMode::PerCycle));
    run(&mut processor, 3);
    assert_eq!(processor.program_counter(), 0x20A);
    assert_eq!(processor.index_register(), 0x00A);
    assert!(processor.draw_flag());
    processor.clear_draw_flag();
    assert!(!processor.draw_flag());
    assert!(processor.take_frame().is_none());

    run(&mut processor, 2);
    assert_eq!(processor.program_counter(), 0x204);
    assert_eq!(processor.variable_register(0xA), Some(0x1));
    assert_eq!(processor.cycles(), 5);
    run(&mut processor, 3);
    assert_eq!(processor.program_counter(), 0x204);
    assert_eq!(processor.cycles(), 8);
}

#[test]
fn rom_loaded_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&assemble(&[0x6A2F, 0x1202])).unwrap();
    file.flush().unwrap();

    let rom: File = File::open(file.path()).unwrap();
    let size: usize = rom.metadata().unwrap().len() as usize;
    let program: Program = Program::read_from(rom, size).unwrap();
    assert_eq!(program.program_data_size(), 4);

    let mut processor: Processor =
        Processor::initialise_and_load(program, Options::default()).unwrap();
    assert_eq!(processor.status(), ProcessorStatus::ProgramLoaded);
    run(&mut processor, 3);
    assert_eq!(processor.variable_register(0xA), Some(0x2F));
    assert_eq!(processor.program_counter(), 0x202);
    assert_eq!(processor.status(), ProcessorStatus::Running);
}

#[test]
fn waits_for_keypress_then_continues() {
    let opcodes: [u16; 3] = [
        0xF50A, // LD V5, K
        0x6601, // LD V6, 1
        0x1204, // JP 0x204
    ];
    let mut processor: Processor = boot(&opcodes, seeded_options(TimerMode::PerCycle));
    for _ in 0..3 {
        assert_eq!(
            processor.execute_cycle().unwrap(),
            CycleOutcome::WaitingForKeypress
        );
    }
    assert_eq!(processor.status(), ProcessorStatus::WaitingForKeypress);
    assert_eq!(processor.program_counter(), PROGRAM_START_ADDRESS as u16);

    processor.set_key_status(0xE, true).unwrap();
    assert_eq!(processor.execute_cycle().unwrap(), CycleOutcome::Executed);
    processor.set_key_status(0xE, false).unwrap();
    run(&mut processor, 1);
    assert_eq!(processor.variable_register(0x5), Some(0xE));
    assert_eq!(processor.variable_register(0x6), Some(0x1));
}

#[test]
fn held_key_skips_instruction() {
    let opcodes: [u16; 5] = [
        0x6107, // LD V1, 7
        0xE19E, // SKP V1
        0x6201, // LD V2, 1
        0xE1A1, // SKNP V1
        0x6301, // LD V3, 1
    ];
    let mut processor: Processor = boot(&opcodes, seeded_options(TimerMode::PerCycle));
    processor.set_key_status(0x7, true).unwrap();
    assert!(processor.key_status(0x7).unwrap());
    run(&mut processor, 4);
    assert_eq!(processor.variable_register(0x2), Some(0x0));
    assert_eq!(processor.variable_register(0x3), Some(0x1));
}

#[test]
fn runaway_recursion_faults_without_latching() {
    // 0x200 calls itself forever
    let mut processor: Processor = boot(&[0x2200, 0x6C01], seeded_options(TimerMode::PerCycle));
    run(&mut processor, STACK_DEPTH);
    let error = processor.execute_cycle().unwrap_err();
    assert_eq!(error.inner_error, ErrorDetail::PushFullStack);
    match error.state_snapshot_dump {
        StateSnapshot::ExtendedSnapshot { stack, .. } => assert_eq!(stack.len(), STACK_DEPTH),
        _ => panic!("faults carry an extended snapshot"),
    }
    // The failed call was skipped, so execution carries on after it
    assert_eq!(processor.program_counter(), 0x202);
    run(&mut processor, 1);
    assert_eq!(processor.variable_register(0xC), Some(0x1));
}

#[test]
fn running_off_the_end_of_memory_faults() {
    let mut processor: Processor = boot(&[0x1FFE], seeded_options(TimerMode::PerCycle));
    // 0xFFE holds 0x0000, a machine code call that is ignored
    run(&mut processor, 2);
    assert_eq!(processor.program_counter(), 0x1000);
    let error = processor.execute_cycle().unwrap_err();
    assert!(matches!(
        error.inner_error,
        ErrorDetail::MemoryAddressOutOfBounds { .. }
    ));
    assert_eq!(processor.program_counter(), 0x1000);
}

#[test]
fn unknown_opcodes_are_skipped() {
    let mut processor: Processor =
        boot(&[0xFFFF, 0x800F, 0x6D09], seeded_options(TimerMode::PerCycle));
    assert_eq!(
        processor.execute_cycle().unwrap(),
        CycleOutcome::UnknownInstruction { opcode: 0xFFFF }
    );
    assert_eq!(
        processor.execute_cycle().unwrap(),
        CycleOutcome::UnknownInstruction { opcode: 0x800F }
    );
    assert_eq!(processor.execute_cycle().unwrap(), CycleOutcome::Executed);
    assert_eq!(processor.variable_register(0xD), Some(0x09));
}

#[test]
fn external_timers_only_move_when_ticked() {
    let opcodes: [u16; 4] = [
        0x6003, // LD V0, 3
        0xF015, // LD DT, V0
        0xF018, // LD ST, V0
        0x1206, // JP 0x206
    ];
    let mut processor: Processor = boot(&opcodes, seeded_options(TimerMode::External));
    run(&mut processor, 20);
    assert_eq!(processor.delay_timer(), 3);
    assert!(processor.sound_timer_active());
    for expected in [2, 1, 0, 0] {
        processor.tick_timers();
        assert_eq!(processor.delay_timer(), expected);
        assert_eq!(processor.sound_timer(), expected);
    }
    assert!(!processor.sound_timer_active());
}

#[test]
fn seeded_random_numbers_repeat_across_runs() {
    let opcodes: [u16; 5] = [
        0xC0FF, // RND V0, 0xFF
        0xC1FF, // RND V1, 0xFF
        0xC20F, // RND V2, 0x0F
        0x00E0, // CLS
        0x1208, // JP 0x208
    ];
    let mut first: Processor = boot(&opcodes, seeded_options(TimerMode::PerCycle));
    let mut second: Processor = boot(&opcodes, seeded_options(TimerMode::PerCycle));
    run(&mut first, 3);
    run(&mut second, 3);
    for x in 0..3 {
        assert_eq!(first.variable_register(x), second.variable_register(x));
    }
    assert!(first.variable_register(0x2).unwrap() <= 0x0F);

    // Re-initialising restores the seeded sequence
    first.initialise();
    first.load_program(&Program::new(assemble(&opcodes)).unwrap()).unwrap();
    run(&mut first, 3);
    for x in 0..3 {
        assert_eq!(first.variable_register(x), second.variable_register(x));
    }
}

#[test]
fn frames_are_taken_once() {
    let mut processor: Processor =
        boot(&[0xA000, 0xD005, 0x1204], seeded_options(TimerMode::PerCycle));
    run(&mut processor, 1);
    assert!(processor.take_frame().is_none());
    run(&mut processor, 1);
    let frame = processor.take_frame().unwrap();
    assert!(frame.is_pixel_set(0, 0));
    assert!(!frame.is_pixel_set(4, 0));
    run(&mut processor, 5);
    assert!(!processor.draw_flag());
    assert!(processor.take_frame().is_none());
}

#[test]
fn options_file_drives_processor() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("octet.json");
    seeded_options(TimerMode::External).save_to_file(&path).unwrap();

    let options: Options = Options::load_from_file(&path).unwrap();
    let processor: Processor = boot(&[0x1200], options);
    assert_eq!(processor.options().timer_mode, TimerMode::External);
    assert_eq!(processor.options().rng_seed, Some(0x5EED));
}

#[test]
fn oversized_rom_is_rejected() {
    let data: Vec<u8> = vec![0x0; 0x1000 - PROGRAM_START_ADDRESS + 1];
    assert!(matches!(
        Program::new(data),
        Err(ErrorDetail::RomTooLarge { .. })
    ));
}

#[test]
fn snapshot_is_detached_from_live_state() {
    let mut processor: Processor = boot(&[0x00E0, 0x6001], seeded_options(TimerMode::PerCycle));
    let before: StateSnapshot = processor.export_state_snapshot(StateSnapshotVerbosity::Extended);
    run(&mut processor, 2);
    match before {
        StateSnapshot::ExtendedSnapshot {
            program_counter,
            variable_registers,
            status,
            ..
        } => {
            assert_eq!(program_counter, 0x200);
            assert_eq!(variable_registers[0x0], 0x0);
            assert_eq!(status, ProcessorStatus::ProgramLoaded);
        }
        _ => panic!("expected an extended snapshot"),
    }
}
