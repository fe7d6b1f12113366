//! The 19 operations
//!
//! Unless an operation says otherwise it mutates state first and then moves
//! the cursor one symbol to the left.

use super::{Engine, Flow};
use crate::console::Console;
use crate::dispatch::Operation;
use crate::errors::{EngineError, TapeKind};

impl Engine {
    pub(crate) fn execute(
        &mut self,
        op: Operation,
        console: &mut dyn Console,
    ) -> Result<Flow, EngineError> {
        match op {
            Operation::Push => self.push()?,
            Operation::Pop => self.pop()?,
            Operation::Rotate => self.rotate()?,
            Operation::Increment => self.increment()?,
            Operation::Decrement => self.decrement()?,
            Operation::Jump => self.jump(),
            Operation::StackSize => self.stack_size()?,
            Operation::JumpRelative => self.jump_relative()?,
            Operation::PushAt => self.push_at()?,
            Operation::PopAt => self.pop_at()?,
            Operation::Output => self.output(console)?,
            Operation::Halt => return Ok(Flow::Halt),
            Operation::Exchange => self.exchange(),
            Operation::Input => self.input(console)?,
            Operation::Replace => self.replace()?,
            Operation::RotateN => self.rotate_n()?,
            Operation::JumpIfZero => self.jump_if(op, self.accumulator_b == 0)?,
            Operation::JumpIfNonzero => self.jump_if(op, self.accumulator_b != 0)?,
            Operation::Mark => self.mark(),
        }
        Ok(Flow::Continue)
    }

    fn push(&mut self) -> Result<(), EngineError> {
        let symbol = self
            .storage
            .pop_front()
            .ok_or(EngineError::EmptyStorageTape { op: Operation::Push })?;
        self.command.push_front(symbol);
        self.advance();
        Ok(())
    }

    /// Moves the symbol just left of the cursor onto the storage tape.
    fn pop(&mut self) -> Result<(), EngineError> {
        let distance = self.cursor + 1;
        let len = self.command.len();
        let symbol = self
            .distance_index(distance)
            .and_then(|idx| self.command.remove(idx))
            .ok_or(EngineError::IndexOutOfRange {
                op: Operation::Pop,
                tape: TapeKind::Command,
                index: distance,
                len,
            })?;
        self.storage.push_front(symbol);
        self.advance();
        Ok(())
    }

    fn rotate(&mut self) -> Result<(), EngineError> {
        if self.storage.is_empty() {
            return Err(EngineError::EmptyStorageTape { op: Operation::Rotate });
        }
        self.storage.rotate_right(1);
        self.advance();
        Ok(())
    }

    fn increment(&mut self) -> Result<(), EngineError> {
        self.accumulator_a = self
            .accumulator_a
            .checked_add(1)
            .ok_or(EngineError::ArithmeticOverflow { op: Operation::Increment })?;
        self.advance();
        Ok(())
    }

    fn decrement(&mut self) -> Result<(), EngineError> {
        self.accumulator_a = self
            .accumulator_a
            .checked_sub(1)
            .ok_or(EngineError::ArithmeticOverflow { op: Operation::Decrement })?;
        self.advance();
        Ok(())
    }

    fn jump(&mut self) {
        self.cursor = self.accumulator_a;
    }

    fn stack_size(&mut self) -> Result<(), EngineError> {
        self.accumulator_a = i64::try_from(self.storage.len())
            .map_err(|_| EngineError::ArithmeticOverflow { op: Operation::StackSize })?;
        self.advance();
        Ok(())
    }

    fn jump_relative(&mut self) -> Result<(), EngineError> {
        self.cursor = self
            .cursor
            .checked_add(self.accumulator_a)
            .and_then(|c| c.checked_add(1))
            .ok_or(EngineError::ArithmeticOverflow { op: Operation::JumpRelative })?;
        Ok(())
    }

    /// Moves the storage symbol at left-to-right index A onto the command tape.
    fn push_at(&mut self) -> Result<(), EngineError> {
        let index = self.accumulator_a;
        let len = self.storage.len();
        let symbol = usize::try_from(index)
            .ok()
            .and_then(|i| self.storage.remove(i))
            .ok_or(EngineError::IndexOutOfRange {
                op: Operation::PushAt,
                tape: TapeKind::Storage,
                index,
                len,
            })?;
        self.command.push_front(symbol);
        self.advance();
        Ok(())
    }

    /// Moves the command symbol at left-to-right index A onto the storage tape.
    fn pop_at(&mut self) -> Result<(), EngineError> {
        let index = self.accumulator_a;
        let len = self.command.len();
        let symbol = usize::try_from(index)
            .ok()
            .and_then(|i| self.command.remove(i))
            .ok_or(EngineError::IndexOutOfRange {
                op: Operation::PopAt,
                tape: TapeKind::Command,
                index,
                len,
            })?;
        self.storage.push_front(symbol);
        self.advance();
        Ok(())
    }

    fn output(&mut self, console: &mut dyn Console) -> Result<(), EngineError> {
        let line: String = self.storage.iter().collect();
        console.write_line(&line)?;
        self.advance();
        Ok(())
    }

    fn exchange(&mut self) {
        std::mem::swap(&mut self.accumulator_a, &mut self.accumulator_b);
        self.advance();
    }

    fn input(&mut self, console: &mut dyn Console) -> Result<(), EngineError> {
        let line = console.read_line()?.ok_or(EngineError::InputExhausted)?;
        self.accumulator_a = match line.trim().parse::<i64>() {
            Ok(value) => value,
            Err(_) => return Err(EngineError::InputNotInteger(line)),
        };
        self.advance();
        Ok(())
    }

    /// Rewrites the symbol under the cursor with the storage symbol in the
    /// same column, or deletes it when the storage tape is shorter than the
    /// command tape. The cursor stays put: it now addresses either the new
    /// symbol or, after a deletion, the next symbol to the left.
    fn replace(&mut self) -> Result<(), EngineError> {
        let len = self.command.len();
        let idx = self
            .distance_index(self.cursor)
            .ok_or(EngineError::CursorOutOfRange {
                cursor: self.cursor,
                len,
            })?;

        if self.storage.len() >= len {
            let replacement = self.storage[idx];
            self.command[idx] = replacement;
        } else {
            self.command.remove(idx);
        }
        Ok(())
    }

    fn rotate_n(&mut self) -> Result<(), EngineError> {
        if self.accumulator_a > 0 {
            if self.storage.is_empty() {
                return Err(EngineError::EmptyStorageTape { op: Operation::RotateN });
            }
            let len = self.storage.len() as u64;
            let turns = (self.accumulator_a.unsigned_abs() % len) as usize;
            self.storage.rotate_right(turns);
        }
        self.advance();
        Ok(())
    }

    fn jump_if(&mut self, op: Operation, taken: bool) -> Result<(), EngineError> {
        if taken {
            self.cursor = self
                .accumulator_a
                .checked_add(1)
                .ok_or(EngineError::ArithmeticOverflow { op })?;
        } else {
            self.advance();
        }
        Ok(())
    }

    fn mark(&mut self) {
        self.accumulator_a = self.cursor;
        self.advance();
    }
}
