// src/trace.rs

use crate::dispatch::Operation;
use serde::{Deserialize, Serialize};

/// Record of one executed step, captured after the operation ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTrace {
    pub step: u64,
    pub symbol: char,
    pub operation: Option<Operation>,
    /// Cursor before the step.
    pub cursor_before: i64,
    /// Cursor after the step, after any wraparound.
    pub cursor_after: i64,
    pub accumulator_a: i64,
    pub accumulator_b: i64,
    pub storage: String,
    pub command: String,
}

/// A trait for observing engine execution.
/// This allows for decoupled monitoring or logging without modifying the
/// engine's stepping logic.
pub trait TraceHandler {
    /// Called after each step of the engine's execution.
    fn on_step(&mut self, trace: &StepTrace);
}

/// Writes every step to the `log` facade at trace level.
#[derive(Debug, Default)]
pub struct LogTraceHandler;

impl TraceHandler for LogTraceHandler {
    fn on_step(&mut self, trace: &StepTrace) {
        let op = trace
            .operation
            .map(|op| op.mnemonic())
            .unwrap_or("NOP");
        log::trace!(
            "step {}: {:?} {} ip {} -> {} A={} B={} ss={:?} cs={:?}",
            trace.step,
            trace.symbol,
            op,
            trace.cursor_before,
            trace.cursor_after,
            trace.accumulator_a,
            trace.accumulator_b,
            trace.storage,
            trace.command
        );
    }
}

/// Keeps every step in memory.
#[derive(Debug, Default)]
pub struct RecordingTraceHandler {
    pub steps: Vec<StepTrace>,
}

impl TraceHandler for RecordingTraceHandler {
    fn on_step(&mut self, trace: &StepTrace) {
        self.steps.push(trace.clone());
    }
}
