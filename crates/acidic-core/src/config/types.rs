//! Configuration types: parsed programs, engine seeds and run settings

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// A program split into its two tapes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Program {
    pub storage: String,
    pub command: String,
}

impl Program {
    /// Parse program source text.
    ///
    /// One trailing newline is dropped and the rest must split into exactly
    /// two lines: storage tape first, command tape second. Empty source is an
    /// empty program, which lets tape overrides supply both tapes.
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        if source.is_empty() {
            return Ok(Self::default());
        }
        let body = source.strip_suffix('\n').unwrap_or(source);
        let lines: Vec<&str> = body.split('\n').collect();
        if lines.len() != 2 {
            return Err(ConfigError::MalformedProgram { lines: lines.len() });
        }
        Ok(Self {
            storage: strip_cr(lines[0]).to_string(),
            command: strip_cr(lines[1]).to_string(),
        })
    }
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Everything needed to initialize one engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    /// Zero-based offset from the right edge where execution starts.
    pub entry_offset: i64,
    pub accumulator_a: i64,
    pub accumulator_b: i64,
    /// Loop back to the rightmost command after running off the left end.
    pub wrap: bool,
    pub storage: String,
    pub command: String,
    /// Abort with an error after this many steps. Unbounded when `None`.
    pub max_steps: Option<u64>,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            entry_offset: 0,
            accumulator_a: 0,
            accumulator_b: 0,
            wrap: true,
            storage: String::new(),
            command: String::new(),
            max_steps: None,
        }
    }
}

impl Seed {
    pub fn with_storage(mut self, storage: impl Into<String>) -> Self {
        self.storage = storage.into();
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_entry_offset(mut self, offset: i64) -> Self {
        self.entry_offset = offset;
        self
    }

    pub fn with_accumulators(mut self, a: i64, b: i64) -> Self {
        self.accumulator_a = a;
        self.accumulator_b = b;
        self
    }

    pub fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Take tapes from `program` unless this seed already carries a
    /// non-empty override for them.
    pub fn with_program(mut self, program: &Program) -> Self {
        if self.storage.is_empty() {
            self.storage = program.storage.clone();
        }
        if self.command.is_empty() {
            self.command = program.command.clone();
        }
        self
    }
}

/// Run settings as read from a YAML file or assembled from CLI flags.
///
/// Every field is optional; [`RunSettings::overlay`] layers one set on top
/// of another and [`RunSettings::into_seed`] fills the gaps with defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunSettings {
    /// Run the command tape once instead of looping.
    pub once: Option<bool>,
    pub accumulator_a: Option<i64>,
    pub accumulator_b: Option<i64>,
    pub entry_offset: Option<i64>,
    pub storage: Option<String>,
    pub command: Option<String>,
    pub max_steps: Option<u64>,
}

impl RunSettings {
    /// Fields set in `top` win over fields set in `self`.
    pub fn overlay(self, top: RunSettings) -> RunSettings {
        RunSettings {
            once: top.once.or(self.once),
            accumulator_a: top.accumulator_a.or(self.accumulator_a),
            accumulator_b: top.accumulator_b.or(self.accumulator_b),
            entry_offset: top.entry_offset.or(self.entry_offset),
            storage: top.storage.or(self.storage),
            command: top.command.or(self.command),
            max_steps: top.max_steps.or(self.max_steps),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == Some(0) {
            return Err(ConfigError::Settings(
                "max_steps must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_seed(self) -> Seed {
        let defaults = Seed::default();
        Seed {
            entry_offset: self.entry_offset.unwrap_or(defaults.entry_offset),
            accumulator_a: self.accumulator_a.unwrap_or(defaults.accumulator_a),
            accumulator_b: self.accumulator_b.unwrap_or(defaults.accumulator_b),
            wrap: !self.once.unwrap_or(!defaults.wrap),
            storage: self.storage.unwrap_or_default(),
            command: self.command.unwrap_or_default(),
            max_steps: self.max_steps,
        }
    }
}
