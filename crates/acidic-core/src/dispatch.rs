//! Symbol table mapping command-tape symbols to operations
//!
//! Every operation answers to five interchangeable symbols. Together the 19
//! alias sets cover the 95 printable ASCII characters exactly once, so any
//! printable symbol resolves to one operation and anything else resolves to
//! nothing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The 19 primitive operations of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Push,
    Pop,
    Rotate,
    Increment,
    Decrement,
    Jump,
    StackSize,
    JumpRelative,
    PushAt,
    PopAt,
    Output,
    Halt,
    Exchange,
    Input,
    Replace,
    RotateN,
    JumpIfZero,
    JumpIfNonzero,
    Mark,
}

/// Alias sets in chart order.
const ALIAS_SETS: [(Operation, [char; 5]); 19] = [
    (Operation::Push, [' ', '3', 'F', 'Y', 'l']),
    (Operation::Pop, ['!', '4', 'G', 'Z', 'm']),
    (Operation::Rotate, ['"', '5', 'H', '[', 'n']),
    (Operation::Increment, ['#', '6', 'I', '\\', 'o']),
    (Operation::Decrement, ['$', '7', 'J', ']', 'p']),
    (Operation::Jump, ['%', '8', 'K', '^', 'q']),
    (Operation::StackSize, ['&', '9', 'L', '_', 'r']),
    (Operation::JumpRelative, ['\'', ':', 'M', '`', 's']),
    (Operation::PushAt, ['(', ';', 'N', 'a', 't']),
    (Operation::PopAt, [')', '<', 'O', 'b', 'u']),
    (Operation::Output, ['*', '=', 'P', 'c', 'v']),
    (Operation::Halt, ['+', '>', 'Q', 'd', 'w']),
    (Operation::Exchange, [',', '?', 'R', 'e', 'x']),
    (Operation::Input, ['-', '@', 'S', 'f', 'y']),
    (Operation::Replace, ['.', 'A', 'T', 'g', 'z']),
    (Operation::RotateN, ['/', 'B', 'U', 'h', '{']),
    (Operation::JumpIfZero, ['0', 'C', 'V', 'i', '|']),
    (Operation::JumpIfNonzero, ['1', 'D', 'W', 'j', '}']),
    (Operation::Mark, ['2', 'E', 'X', 'k', '~']),
];

impl Operation {
    /// All operations in chart order.
    pub const ALL: [Operation; 19] = [
        Operation::Push,
        Operation::Pop,
        Operation::Rotate,
        Operation::Increment,
        Operation::Decrement,
        Operation::Jump,
        Operation::StackSize,
        Operation::JumpRelative,
        Operation::PushAt,
        Operation::PopAt,
        Operation::Output,
        Operation::Halt,
        Operation::Exchange,
        Operation::Input,
        Operation::Replace,
        Operation::RotateN,
        Operation::JumpIfZero,
        Operation::JumpIfNonzero,
        Operation::Mark,
    ];

    /// The chart mnemonic, e.g. `PUSH` or `JMPNZ`.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Operation::Push => "PUSH",
            Operation::Pop => "POP",
            Operation::Rotate => "ROT",
            Operation::Increment => "INC",
            Operation::Decrement => "DEC",
            Operation::Jump => "JUMP",
            Operation::StackSize => "STKSZE",
            Operation::JumpRelative => "JMPR",
            Operation::PushAt => "PUSHR",
            Operation::PopAt => "POPR",
            Operation::Output => "OUTPUT",
            Operation::Halt => "BRK",
            Operation::Exchange => "EXC",
            Operation::Input => "INPUT",
            Operation::Replace => "RPLC",
            Operation::RotateN => "ROTA",
            Operation::JumpIfZero => "JMPZ",
            Operation::JumpIfNonzero => "JMPNZ",
            Operation::Mark => "PLC",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Operation::Push => "Pushes the leftmost value of the Storage Stack onto the Command Stack.",
            Operation::Pop => "Pops the value to the left of it onto the Storage Stack.",
            Operation::Rotate => "Rotates the Storage Stack once to the right.",
            Operation::Increment => "Increments A.",
            Operation::Decrement => "Decrements A.",
            Operation::Jump => "Jumps to the command pointed to by A.",
            Operation::StackSize => "Makes A equal to the size of the Storage Stack.",
            Operation::JumpRelative => "Jumps A spaces to the left.",
            Operation::PushAt => "Pushes the value at A on the Storage Stack onto the Command Stack.",
            Operation::PopAt => "Pops the command at A onto the Storage Stack.",
            Operation::Output => "Displays the Storage Stack.",
            Operation::Halt => "Ends the program.",
            Operation::Exchange => "Exchanges B with A.",
            Operation::Input => "Sets A to the integer read from STDIN.",
            Operation::Replace => "Replaces this command with a command in the Storage Stack in the same column.",
            Operation::RotateN => "Rotates the Storage Stack A times to the right.",
            Operation::JumpIfZero => "Jumps to the command pointed to by A if B is equal to 0.",
            Operation::JumpIfNonzero => "Jumps to the command pointed to by A if B is not equal to 0.",
            Operation::Mark => "Sets A to the current pointer position.",
        }
    }

    /// The five symbols that trigger this operation.
    pub fn aliases(self) -> [char; 5] {
        ALIAS_SETS[self as usize].1
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Direct symbol -> operation lookup, flattened from the alias sets.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    slots: [Option<Operation>; 128],
}

impl DispatchTable {
    pub const fn new() -> Self {
        let mut slots = [None; 128];
        let mut set = 0;
        while set < ALIAS_SETS.len() {
            let (op, symbols) = ALIAS_SETS[set];
            let mut i = 0;
            while i < symbols.len() {
                slots[symbols[i] as usize] = Some(op);
                i += 1;
            }
            set += 1;
        }
        Self { slots }
    }

    /// Resolve a symbol; `None` means the symbol is not a command.
    #[inline]
    pub fn lookup(&self, symbol: char) -> Option<Operation> {
        self.slots.get(symbol as usize).copied().flatten()
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

/// The table shared by every engine.
pub static DISPATCH: DispatchTable = DispatchTable::new();

/// Resolve a symbol through [`DISPATCH`].
#[inline]
pub fn lookup(symbol: char) -> Option<Operation> {
    DISPATCH.lookup(symbol)
}

/// Human-readable command chart, one block per operation.
pub fn command_chart() -> String {
    Operation::ALL
        .iter()
        .map(|op| {
            let symbols = op
                .aliases()
                .iter()
                .map(|&c| if c == ' ' { "<space>".to_string() } else { c.to_string() })
                .collect::<Vec<_>>()
                .join("   ");
            format!("{} :   {}\n{}", op.mnemonic(), symbols, op.description())
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
