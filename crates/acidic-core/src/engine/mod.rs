//! The execution engine
//!
//! An [`Engine`] owns both tapes, the two accumulators and the cursor. The
//! cursor counts from the right edge of the command tape: position 1 is the
//! last symbol and position `len` the first. Counting from the right keeps
//! not-yet-executed symbols at a stable position when symbols are prepended.
//!
//! Each step reads the symbol under the cursor, resolves it through the
//! dispatch table and executes the operation. A cursor that runs off the left
//! end is reset to 1 when wraparound is on; otherwise the run ends.

mod ops;

use crate::config::{Program, Seed};
use crate::console::Console;
use crate::dispatch::{self, Operation};
use crate::errors::{ConfigError, EngineError};
use crate::trace::{StepTrace, TraceHandler};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Running,
    /// Stopped by the halt operation.
    Halted,
    /// Ran off the end of the command tape with wraparound disabled.
    Ended,
}

/// How a successful run finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Halted,
    Ended,
}

/// What the dispatcher does after an operation returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Halt,
}

/// Serializable copy of the engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub storage: String,
    pub command: String,
    pub cursor: i64,
    pub accumulator_a: i64,
    pub accumulator_b: i64,
    pub wrap: bool,
    pub steps: u64,
    pub state: RunState,
}

#[derive(Debug, Clone)]
pub struct Engine {
    storage: VecDeque<char>,
    command: VecDeque<char>,
    cursor: i64,
    accumulator_a: i64,
    accumulator_b: i64,
    wrap: bool,
    steps: u64,
    max_steps: Option<u64>,
    state: RunState,
}

impl Engine {
    pub fn new(seed: Seed) -> Self {
        Self {
            storage: seed.storage.chars().collect(),
            command: seed.command.chars().collect(),
            // Offsets are zero-based, the cursor is one-based. A saturated
            // cursor lies past the tape and ends the run before any step.
            cursor: seed.entry_offset.saturating_add(1),
            accumulator_a: seed.accumulator_a,
            accumulator_b: seed.accumulator_b,
            wrap: seed.wrap,
            steps: 0,
            max_steps: seed.max_steps,
            state: RunState::Running,
        }
    }

    /// Build an engine from two-line program source. Non-empty tapes already
    /// present in `seed` override the parsed ones.
    pub fn from_source(source: &str, seed: Seed) -> Result<Self, ConfigError> {
        let program = Program::parse(source)?;
        Ok(Self::new(seed.with_program(&program)))
    }

    /// Step until the engine halts or runs off the end of the command tape.
    pub fn run(&mut self, console: &mut dyn Console) -> Result<Outcome, EngineError> {
        self.run_traced(console, None)
    }

    pub fn run_traced(
        &mut self,
        console: &mut dyn Console,
        mut trace: Option<&mut dyn TraceHandler>,
    ) -> Result<Outcome, EngineError> {
        log::debug!(
            "Run start: cursor {} wrap {} storage {} symbols, command {} symbols",
            self.cursor,
            self.wrap,
            self.storage.len(),
            self.command.len()
        );

        loop {
            match self.step_inner(console, trace.as_deref_mut())? {
                RunState::Running => continue,
                RunState::Halted => {
                    log::debug!("Run halted after {} steps", self.steps);
                    return Ok(Outcome::Halted);
                }
                RunState::Ended => {
                    log::debug!("Run ended after {} steps", self.steps);
                    return Ok(Outcome::Ended);
                }
            }
        }
    }

    /// Execute a single step and report the resulting state.
    pub fn step(&mut self, console: &mut dyn Console) -> Result<RunState, EngineError> {
        self.step_inner(console, None)
    }

    fn step_inner(
        &mut self,
        console: &mut dyn Console,
        trace: Option<&mut (dyn TraceHandler + '_)>,
    ) -> Result<RunState, EngineError> {
        if self.state != RunState::Running {
            return Ok(self.state);
        }
        if self.past_end() {
            self.state = RunState::Ended;
            return Ok(self.state);
        }
        if let Some(limit) = self.max_steps {
            if self.steps >= limit {
                return Err(EngineError::StepLimitExceeded(limit));
            }
        }

        let cursor_before = self.cursor;
        let symbol = self.current_symbol()?;
        let operation = dispatch::lookup(symbol);
        // Symbols outside every alias set do nothing, cursor included.
        let flow = match operation {
            Some(op) => self.execute(op, console)?,
            None => Flow::Continue,
        };
        self.steps += 1;

        match flow {
            Flow::Halt => self.halt(),
            Flow::Continue => {
                if self.past_end() && self.wrap {
                    self.cursor = 1;
                }
                if self.past_end() {
                    self.state = RunState::Ended;
                }
            }
        }

        if let Some(handler) = trace {
            handler.on_step(&self.step_trace(symbol, operation, cursor_before));
        }
        Ok(self.state)
    }

    /// Stop the run successfully.
    pub fn halt(&mut self) {
        self.state = RunState::Halted;
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn accumulator_a(&self) -> i64 {
        self.accumulator_a
    }

    pub fn accumulator_b(&self) -> i64 {
        self.accumulator_b
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn storage(&self) -> String {
        self.storage.iter().collect()
    }

    pub fn command(&self) -> String {
        self.command.iter().collect()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            storage: self.storage(),
            command: self.command(),
            cursor: self.cursor,
            accumulator_a: self.accumulator_a,
            accumulator_b: self.accumulator_b,
            wrap: self.wrap,
            steps: self.steps,
            state: self.state,
        }
    }

    fn step_trace(&self, symbol: char, operation: Option<Operation>, cursor_before: i64) -> StepTrace {
        StepTrace {
            step: self.steps,
            symbol,
            operation,
            cursor_before,
            cursor_after: self.cursor,
            accumulator_a: self.accumulator_a,
            accumulator_b: self.accumulator_b,
            storage: self.storage(),
            command: self.command(),
        }
    }

    fn command_len(&self) -> i64 {
        self.command.len() as i64
    }

    /// True once the cursor reaches `len + 1` or beyond.
    fn past_end(&self) -> bool {
        self.cursor > self.command_len()
    }

    /// Index into the command tape of the symbol `distance` from the right.
    fn distance_index(&self, distance: i64) -> Option<usize> {
        let len = self.command.len();
        usize::try_from(distance)
            .ok()
            .filter(|&d| d >= 1 && d <= len)
            .map(|d| len - d)
    }

    fn current_symbol(&self) -> Result<char, EngineError> {
        if self.command.is_empty() {
            return Err(EngineError::EmptyCommandTape);
        }
        self.distance_index(self.cursor)
            .map(|idx| self.command[idx])
            .ok_or(EngineError::CursorOutOfRange {
                cursor: self.cursor,
                len: self.command.len(),
            })
    }

    /// Move to the next symbol on the left. Only called while the cursor is
    /// within `[1, len]`, so this cannot overflow.
    fn advance(&mut self) {
        self.cursor += 1;
    }
}
