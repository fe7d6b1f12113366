//! Command-line front-end for the ACIDIC interpreter
//!
//! Flags mirror the classic `acidic` tool. A YAML settings file can supply
//! the same values; flags given on the command line win over the file. Each
//! program file runs on a fresh engine built from the same seed.

use acidic_core::errors::{EXIT_RUNTIME_FAULT, EXIT_SUCCESS};
use acidic_core::{
    command_chart, AcidicError, ConfigError, ConfigLoader, Console, Engine, LogTraceHandler,
    Outcome, ProgramLoader, RunSettings, Seed, StdConsole, TraceHandler,
};
use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

const AFTER_HELP: &str = "For more information on the ACIDIC programming language, see
http://esolangs.org/wiki/ACIDIC";

#[derive(Parser, Debug)]
#[clap(
    name = "acidic",
    author,
    about = "Interpreter for the ACIDIC programming language",
    disable_version_flag = true,
    after_help = AFTER_HELP
)]
pub struct Cli {
    #[clap(
        short = '1',
        long,
        help = "Loop through the command stack only once, as if there were a BRK at the end"
    )]
    pub once: bool,

    #[clap(short = 'A', value_name = "INT", allow_negative_numbers = true, help = "Initialize accumulator A to INT")]
    pub accumulator_a: Option<i64>,

    #[clap(short = 'B', value_name = "INT", allow_negative_numbers = true, help = "Initialize accumulator B to INT")]
    pub accumulator_b: Option<i64>,

    #[clap(short = 'e', value_name = "INT", allow_negative_numbers = true, help = "Begin executing commands at command INT")]
    pub entry: Option<i64>,

    #[clap(short = 'S', value_name = "STR", allow_hyphen_values = true, help = "Set the storage stack to STR")]
    pub storage: Option<String>,

    #[clap(short = 'C', value_name = "STR", allow_hyphen_values = true, help = "Set the command stack to STR")]
    pub command: Option<String>,

    #[clap(short = 'V', long, help = "Log every executed step")]
    pub verbose: bool,

    #[clap(short = 'c', long, help = "Print a list of the commands in the ACIDIC language and exit")]
    pub commands: bool,

    #[clap(short = 'v', long, help = "Print version info and exit")]
    pub version: bool,

    #[clap(long, value_name = "FILE", help = "YAML file with run settings")]
    pub config: Option<PathBuf>,

    #[clap(long, value_name = "N", help = "Abort a run after N steps")]
    pub max_steps: Option<u64>,

    #[clap(long, help = "Print the final engine state as JSON on stderr")]
    pub dump_state: bool,

    #[clap(long, default_value = "warn")]
    pub log_level: String,

    #[clap(value_name = "FILE", help = "Program files to run")]
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Settings given directly on the command line.
    pub fn settings(&self) -> RunSettings {
        RunSettings {
            once: self.once.then_some(true),
            accumulator_a: self.accumulator_a,
            accumulator_b: self.accumulator_b,
            entry_offset: self.entry,
            storage: self.storage.clone(),
            command: self.command.clone(),
            max_steps: self.max_steps,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            return LevelFilter::Trace;
        }
        self.log_level.parse().unwrap_or(LevelFilter::Warn)
    }
}

pub fn version_string() -> String {
    format!("acidic {}", env!("CARGO_PKG_VERSION"))
}

/// Layer the settings file (if any) under the command-line flags.
pub fn resolve_seed(cli: &Cli) -> Result<Seed, ConfigError> {
    let base = match &cli.config {
        Some(path) => ConfigLoader::from_file(path)?,
        None => RunSettings::default(),
    };
    let settings = base.overlay(cli.settings());
    settings.validate()?;
    Ok(settings.into_seed())
}

pub fn run(cli: &Cli) -> Result<()> {
    if cli.commands {
        println!("{}", command_chart());
        return Ok(());
    }
    if cli.version {
        println!("{}", version_string());
        return Ok(());
    }
    if cli.files.is_empty() {
        return Err(AcidicError::from(ConfigError::NoFileSpecified).into());
    }

    let seed = resolve_seed(cli).map_err(AcidicError::from)?;
    log::debug!("Resolved seed: {:?}", seed);

    run_files(&cli.files, &seed, &mut StdConsole::new(), cli.dump_state)
}

/// Run each file in turn. With more than one file, every run is preceded by
/// a `File: <name>` line, printed before the file is read.
pub fn run_files(
    files: &[PathBuf],
    seed: &Seed,
    console: &mut dyn Console,
    dump_state: bool,
) -> Result<()> {
    let show_names = files.len() > 1;
    for file in files {
        if !file.exists() {
            return Err(AcidicError::from(ConfigError::FileNotFound(file.clone())).into());
        }
        if show_names {
            console
                .write_line(&format!("File: {}", file.display()))
                .map_err(AcidicError::from)?;
        }

        let program = ProgramLoader::load(file).map_err(AcidicError::from)?;
        let outcome = run_program(seed.clone().with_program(&program), console, dump_state)?;
        log::info!("{}: {:?}", file.display(), outcome);
    }
    Ok(())
}

/// Run one program to completion on a fresh engine.
pub fn run_program(seed: Seed, console: &mut dyn Console, dump_state: bool) -> Result<Outcome> {
    let mut engine = Engine::new(seed);
    let mut tracer = LogTraceHandler;
    let trace: Option<&mut dyn TraceHandler> = if log::log_enabled!(log::Level::Trace) {
        Some(&mut tracer)
    } else {
        None
    };

    let result = engine.run_traced(console, trace);
    if dump_state {
        eprintln!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    }
    Ok(result.map_err(AcidicError::from)?)
}

/// Exit code for a failed invocation.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<AcidicError>()
        .map(AcidicError::exit_code)
        .unwrap_or(EXIT_RUNTIME_FAULT)
}

/// Exit code for a finished invocation.
pub fn result_code(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => exit_code(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acidic_core::ScriptedConsole;
    use clap::CommandFactory;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("acidic").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_classic_flags() {
        let cli = parse(&["-1", "-A", "-3", "-B", "4", "-e", "2", "-S", "-ab", "-C", "*", "prog.acd"]);
        let seed = cli.settings().into_seed();
        assert!(!seed.wrap);
        assert_eq!(seed.accumulator_a, -3);
        assert_eq!(seed.accumulator_b, 4);
        assert_eq!(seed.entry_offset, 2);
        assert_eq!(seed.storage, "-ab");
        assert_eq!(seed.command, "*");
        assert_eq!(cli.files, vec![PathBuf::from("prog.acd")]);
    }

    #[test]
    fn test_defaults_loop_forever() {
        let cli = parse(&["prog.acd"]);
        let seed = resolve_seed(&cli).unwrap();
        assert_eq!(seed, Seed::default());
        assert_eq!(cli.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_verbose_raises_log_level() {
        assert_eq!(parse(&["-V", "p"]).log_level(), LevelFilter::Trace);
        assert_eq!(parse(&["--log-level", "debug", "p"]).log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_flags_override_settings_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "once: true\naccumulator_a: 10\naccumulator_b: 20").unwrap();
        let config = file.path().to_str().unwrap().to_string();

        let cli = parse(&["--config", &config, "-A", "1", "prog.acd"]);
        let seed = resolve_seed(&cli).unwrap();
        assert!(!seed.wrap);
        assert_eq!(seed.accumulator_a, 1);
        assert_eq!(seed.accumulator_b, 20);
    }

    #[test]
    fn test_zero_step_budget_rejected() {
        let cli = parse(&["--max-steps", "0", "prog.acd"]);
        let err = resolve_seed(&cli).unwrap_err();
        assert!(matches!(err, ConfigError::Settings(_)));
    }

    #[test]
    fn test_exit_codes() {
        let cli = parse(&[]);
        let err = run(&cli).unwrap_err();
        assert_eq!(exit_code(&err), 1);

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.acd");
        let cli = parse(&[missing.to_str().unwrap()]);
        let err = run(&cli).unwrap_err();
        assert_eq!(exit_code(&err), 3);
        assert!(err.to_string().starts_with("Specified file does not exist"));

        let mut malformed = NamedTempFile::new().unwrap();
        write!(malformed, "a\nb\nc\n").unwrap();
        let cli = parse(&[malformed.path().to_str().unwrap()]);
        let err = run(&cli).unwrap_err();
        assert_eq!(exit_code(&err), 2);

        assert_eq!(exit_code(&anyhow::anyhow!("something else")), EXIT_RUNTIME_FAULT);
    }

    #[test]
    fn test_run_halting_program() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "AB\n+\n").unwrap();
        let cli = parse(&[file.path().to_str().unwrap()]);
        run(&cli).unwrap();
    }

    #[test]
    fn test_run_program_reports_engine_faults() {
        let seed = Seed::default().with_command("!").with_wrap(false);
        let err = run_program(seed, &mut ScriptedConsole::new(), false).unwrap_err();
        assert_eq!(exit_code(&err), EXIT_RUNTIME_FAULT);
        assert!(err.downcast_ref::<AcidicError>().is_some());
    }

    #[test]
    fn test_run_program_output() {
        let seed = Seed::default().with_storage("AB").with_command("*").with_wrap(false);
        let mut console = ScriptedConsole::new();
        let outcome = run_program(seed, &mut console, false).unwrap();
        assert_eq!(outcome, Outcome::Ended);
        assert_eq!(console.output(), &["AB".to_string()]);
    }

    #[test]
    fn test_result_codes() {
        assert_eq!(result_code(&Ok(())), 0);
        let err = anyhow::Error::from(AcidicError::from(ConfigError::MalformedProgram { lines: 1 }));
        assert_eq!(result_code(&Err(err)), 2);
    }

    #[test]
    fn test_file_header_precedes_malformed_source() {
        let mut good = NamedTempFile::new().unwrap();
        write!(good, "AB\n*\n").unwrap();
        let mut malformed = NamedTempFile::new().unwrap();
        write!(malformed, "a\nb\nc\n").unwrap();
        let files = vec![good.path().to_path_buf(), malformed.path().to_path_buf()];

        let seed = Seed::default().with_wrap(false);
        let mut console = ScriptedConsole::new();
        let err = run_files(&files, &seed, &mut console, false).unwrap_err();
        assert_eq!(exit_code(&err), 2);
        assert_eq!(
            console.output(),
            &[
                format!("File: {}", files[0].display()),
                "AB".to_string(),
                format!("File: {}", files[1].display()),
            ]
        );
    }

    #[test]
    fn test_missing_file_has_no_header() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![dir.path().join("a.acd"), dir.path().join("b.acd")];
        let mut console = ScriptedConsole::new();
        let err = run_files(&files, &Seed::default(), &mut console, false).unwrap_err();
        assert_eq!(exit_code(&err), 3);
        assert!(console.output().is_empty());
    }

    #[test]
    fn test_version_string() {
        assert!(version_string().starts_with("acidic "));
    }
}
