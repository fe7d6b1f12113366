//! Error types for program loading and execution
//!
//! Failures fall into two families. Configuration errors happen before an
//! engine exists (bad program source, missing files, invalid settings) and
//! engine errors abort a run that is already in progress. Both are fatal;
//! nothing in the interpreter retries.

use crate::dispatch::Operation;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit code for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Process exit code when no program file was given.
pub const EXIT_NO_FILE_SPECIFIED: i32 = 1;
/// Process exit code when a program source is not exactly two lines.
pub const EXIT_NOT_TWO_LINES: i32 = 2;
/// Process exit code when a program file does not exist.
pub const EXIT_FILE_DNE: i32 = 3;
/// Process exit code for engine faults and unusable settings.
pub const EXIT_RUNTIME_FAULT: i32 = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Program source must be exactly two lines, found {lines}")]
    MalformedProgram { lines: usize },
    #[error("Specified file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("No file specified.")]
    NoFileSpecified,
    #[error("Failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },
    #[error("Settings error: {0}")]
    Settings(String),
}

/// Which tape an out-of-range access was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapeKind {
    Storage,
    Command,
}

impl std::fmt::Display for TapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TapeKind::Storage => f.write_str("storage"),
            TapeKind::Command => f.write_str("command"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Command tape is empty")]
    EmptyCommandTape,
    #[error("Cursor {cursor} is outside the command tape (length {len})")]
    CursorOutOfRange { cursor: i64, len: usize },
    #[error("{op} needs a symbol but the storage tape is empty")]
    EmptyStorageTape { op: Operation },
    #[error("{op} addressed {tape} tape position {index}, but the tape has length {len}")]
    IndexOutOfRange {
        op: Operation,
        tape: TapeKind,
        index: i64,
        len: usize,
    },
    #[error("{op} overflowed integer arithmetic")]
    ArithmeticOverflow { op: Operation },
    #[error("Input is not an integer: {0:?}")]
    InputNotInteger(String),
    #[error("Input requested but standard input is exhausted")]
    InputExhausted,
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Step limit of {0} exceeded")]
    StepLimitExceeded(u64),
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::Io(err.to_string())
    }
}

/// Umbrella error for callers that drive both loading and execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AcidicError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl AcidicError {
    /// The process exit code this failure maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            AcidicError::Config(ConfigError::NoFileSpecified) => EXIT_NO_FILE_SPECIFIED,
            AcidicError::Config(ConfigError::MalformedProgram { .. }) => EXIT_NOT_TWO_LINES,
            AcidicError::Config(ConfigError::FileNotFound(_)) => EXIT_FILE_DNE,
            AcidicError::Config(ConfigError::Io { .. })
            | AcidicError::Config(ConfigError::Settings(_))
            | AcidicError::Engine(_) => EXIT_RUNTIME_FAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_match_cli_contract() {
        assert_eq!(AcidicError::from(ConfigError::NoFileSpecified).exit_code(), 1);
        assert_eq!(
            AcidicError::from(ConfigError::MalformedProgram { lines: 3 }).exit_code(),
            2
        );
        assert_eq!(
            AcidicError::from(ConfigError::FileNotFound(PathBuf::from("missing.acd"))).exit_code(),
            3
        );
        assert_eq!(
            AcidicError::from(EngineError::EmptyCommandTape).exit_code(),
            EXIT_RUNTIME_FAULT
        );
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::FileNotFound(PathBuf::from("prog.acd"));
        assert_eq!(err.to_string(), "Specified file does not exist: prog.acd");

        let err = EngineError::IndexOutOfRange {
            op: Operation::PushAt,
            tape: TapeKind::Storage,
            index: 7,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "PUSHR addressed storage tape position 7, but the tape has length 2"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: EngineError = io.into();
        assert!(matches!(err, EngineError::Io(ref msg) if msg.contains("pipe closed")));
    }
}
