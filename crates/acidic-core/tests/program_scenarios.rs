use acidic_core::config::load_program;
use acidic_core::trace::RecordingTraceHandler;
use acidic_core::{
    ConfigError, Engine, EngineError, Operation, Outcome, RunState, ScriptedConsole, Seed,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn run_once(storage: &str, command: &str) -> (Engine, Outcome, ScriptedConsole) {
    init_logging();
    let seed = Seed::default()
        .with_storage(storage)
        .with_command(command)
        .with_wrap(false);
    let mut engine = Engine::new(seed);
    let mut console = ScriptedConsole::new();
    let outcome = engine.run(&mut console).unwrap();
    (engine, outcome, console)
}

#[test]
fn output_program_prints_storage_once() {
    let (engine, outcome, console) = run_once("AB", "*");
    assert_eq!(outcome, Outcome::Ended);
    assert_eq!(console.output(), &["AB".to_string()]);
    assert_eq!(engine.steps(), 1);
}

#[test]
fn blank_push_moves_storage_onto_command_tape() {
    init_logging();
    let mut engine = Engine::new(
        Seed::default()
            .with_storage("X")
            .with_command(" ")
            .with_wrap(false),
    );
    let mut console = ScriptedConsole::new();

    assert_eq!(engine.step(&mut console).unwrap(), RunState::Running);
    assert_eq!(engine.storage(), "");
    assert_eq!(engine.command(), "X ");
    assert_eq!(engine.cursor(), 2);

    // The prepended X (a mark) runs next, then the pass ends.
    assert_eq!(engine.run(&mut console).unwrap(), Outcome::Ended);
    assert_eq!(engine.command(), "X ");
    assert_eq!(engine.accumulator_a(), 2);
}

#[test]
fn halt_succeeds_regardless_of_wrap() {
    for wrap in [true, false] {
        let mut engine = Engine::new(Seed::default().with_command("##+##").with_wrap(wrap));
        let outcome = engine.run(&mut ScriptedConsole::new()).unwrap();
        assert_eq!(outcome, Outcome::Halted, "wrap = {}", wrap);
        assert_eq!(engine.accumulator_a(), 2);
    }
}

#[test]
fn halt_reached_after_wraparound() {
    let mut engine = Engine::new(Seed::default().with_command("#d#").with_entry_offset(2));
    assert_eq!(engine.run(&mut ScriptedConsole::new()).unwrap(), Outcome::Halted);
    // distance 3, wrap, distance 1, then the halt at distance 2
    assert_eq!(engine.accumulator_a(), 2);
    assert_eq!(engine.steps(), 3);
}

#[test]
fn three_line_source_fails_before_any_state_exists() {
    let err = Engine::from_source("AB\n*\n+\n", Seed::default()).unwrap_err();
    assert_eq!(err, ConfigError::MalformedProgram { lines: 3 });
}

#[test]
fn pure_cursor_arithmetic_pass() {
    // mark, increment, exchange, increment
    let (engine, outcome, _) = run_once("", "#,#~");
    assert_eq!(outcome, Outcome::Ended);
    assert_eq!(engine.accumulator_a(), 1);
    assert_eq!(engine.accumulator_b(), 2);
    assert_eq!(engine.cursor(), 5);
    assert_eq!(engine.command(), "#,#~");
}

#[test]
fn rotating_by_tape_length_restores_order() {
    let (engine, _, _) = run_once("ABCDE", "\"5H[n");
    assert_eq!(engine.storage(), "ABCDE");

    let (engine, _, _) = run_once("ABCDE", "\"\"");
    assert_eq!(engine.storage(), "DEABC");
}

#[test]
fn push_then_pop_restores_both_tapes() {
    let (engine, outcome, _) = run_once("AB", "! ");
    assert_eq!(outcome, Outcome::Ended);
    assert_eq!(engine.storage(), "AB");
    assert_eq!(engine.command(), "! ");
}

#[test]
fn stack_size_tracks_live_storage_length() {
    let mut engine = Engine::new(
        Seed::default()
            .with_storage("ABC")
            .with_command("& ")
            .with_wrap(false),
    );
    let mut console = ScriptedConsole::new();
    engine.step(&mut console).unwrap();
    engine.step(&mut console).unwrap();
    assert_eq!(engine.storage(), "BC");
    assert_eq!(engine.accumulator_a(), 2);
}

#[test]
fn conditional_jumps_are_mutually_exclusive() {
    for b in [-2, 0, 5] {
        for command in ["#0", "#1"] {
            let mut engine = Engine::new(
                Seed::default()
                    .with_command(command)
                    .with_accumulators(2, b)
                    .with_wrap(false),
            );
            let mut recorder = RecordingTraceHandler::default();
            engine
                .run_traced(&mut ScriptedConsole::new(), Some(&mut recorder))
                .unwrap();

            let jump = &recorder.steps[0];
            let took_jump = jump.cursor_after == 3;
            let advanced = jump.cursor_after == 2;
            assert!(took_jump ^ advanced);

            let expected = if command == "#0" { b == 0 } else { b != 0 };
            assert_eq!(took_jump, expected, "command {:?} with B = {}", command, b);
        }
    }
}

#[test]
fn input_feeds_accumulator() {
    let mut engine = Engine::new(
        Seed::default()
            .with_storage("ABC")
            .with_command("/-")
            .with_wrap(false),
    );
    let mut console = ScriptedConsole::with_input(["1"]);
    engine.run(&mut console).unwrap();
    assert_eq!(engine.accumulator_a(), 1);
    assert_eq!(engine.storage(), "CAB");
}

#[test]
fn replace_deletes_itself_then_halts() {
    // RPLC deletes itself because the storage tape is shorter than the
    // command tape, and the counter then runs into the halt.
    let mut engine = Engine::new(Seed::default().with_command("+#.").with_max_steps(Some(50)));
    assert_eq!(engine.run(&mut ScriptedConsole::new()).unwrap(), Outcome::Halted);
    assert_eq!(engine.command(), "+#");
    assert_eq!(engine.accumulator_a(), 1);
}

#[test]
fn unbounded_loop_hits_step_budget() {
    let mut engine = Engine::new(Seed::default().with_command("#").with_max_steps(Some(1000)));
    let err = engine.run(&mut ScriptedConsole::new()).unwrap_err();
    assert_eq!(err, EngineError::StepLimitExceeded(1000));
}

#[test]
fn program_file_round_trip() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "Hello\n*\n").unwrap();

    let program = load_program(file.path()).unwrap();
    let mut engine = Engine::new(Seed::default().with_wrap(false).with_program(&program));
    let mut console = ScriptedConsole::new();
    engine.run(&mut console).unwrap();
    assert_eq!(console.output(), &["Hello".to_string()]);
}

#[test]
fn faults_name_the_operation() {
    let mut engine = Engine::new(Seed::default().with_command("t").with_wrap(false));
    let err = engine.run(&mut ScriptedConsole::new()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::IndexOutOfRange { op: Operation::PushAt, .. }
    ));
    assert!(err.to_string().starts_with("PUSHR"));
}
