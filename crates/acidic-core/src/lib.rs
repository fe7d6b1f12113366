//! Virtual machine for ACIDIC, a two-tape self-modifying stack language.
//!
//! A program is two lines of text: a storage tape and a command tape. The
//! engine walks the command tape right to left, dispatching one of 19
//! operations per symbol, and wraps around to run it again unless told to
//! stop after one pass.
//!
//! # Architecture Overview
//!
//! - **Dispatch**: the fixed symbol -> operation table with five aliases per operation
//! - **Engine**: tapes, accumulators, cursor and the step/run loop
//! - **Console**: line-oriented input and output for the INPUT and OUTPUT operations
//! - **Configuration**: program parsing, YAML run settings and engine seeds
//! - **Tracing**: per-step observation hooks
//!
//! ```
//! use acidic_core::{Engine, Outcome, ScriptedConsole, Seed};
//!
//! let mut engine = Engine::from_source("AB\n*\n", Seed::default().with_wrap(false))?;
//! let mut console = ScriptedConsole::new();
//! assert_eq!(engine.run(&mut console)?, Outcome::Ended);
//! assert_eq!(console.output(), &["AB".to_string()]);
//! # Ok::<(), acidic_core::AcidicError>(())
//! ```

pub mod config;
pub mod console;
pub mod dispatch;
pub mod engine;
pub mod errors;
pub mod trace;

pub use config::{ConfigLoader, Program, ProgramLoader, RunSettings, Seed};
pub use console::{Console, ScriptedConsole, StdConsole};
pub use dispatch::{command_chart, Operation};
pub use engine::{Engine, EngineSnapshot, Outcome, RunState};
pub use errors::{AcidicError, ConfigError, EngineError};
pub use trace::{LogTraceHandler, StepTrace, TraceHandler};
