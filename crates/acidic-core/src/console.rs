//! Line-oriented I/O used by the INPUT and OUTPUT operations

use crate::errors::EngineError;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Source of input lines and sink for output lines.
///
/// The engine only ever reads or writes whole lines; implementations hand
/// back lines without their terminator.
pub trait Console {
    /// Read one line, or `None` once input is exhausted.
    fn read_line(&mut self) -> Result<Option<String>, EngineError>;

    fn write_line(&mut self, line: &str) -> Result<(), EngineError>;
}

/// Console bound to the process's standard input and output.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn read_line(&mut self) -> Result<Option<String>, EngineError> {
        let mut buf = String::new();
        let read = io::stdin().lock().read_line(&mut buf)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(strip_terminator(buf)))
    }

    fn write_line(&mut self, line: &str) -> Result<(), EngineError> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", line)?;
        out.flush()?;
        Ok(())
    }
}

fn strip_terminator(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// In-memory console with queued input and captured output.
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Console whose reads return `lines` in order.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// Lines written so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> Result<Option<String>, EngineError> {
        Ok(self.input.pop_front())
    }

    fn write_line(&mut self, line: &str) -> Result<(), EngineError> {
        self.output.push(line.to_string());
        Ok(())
    }
}
