//! Instruction decoding for Intcode.
//!
//! # Instruction Format
//!
//! An instruction word is read as a five-digit decimal, leading zeros kept:
//!
//! | Digits | Meaning |
//! |--------|---------|
//! | ones + tens | Opcode |
//! | hundreds | Mode of parameter 1 |
//! | thousands | Mode of parameter 2 |
//! | ten-thousands | Mode of parameter 3 |
//!
//! Mode `0` is position mode (the parameter is an address to dereference),
//! mode `1` is immediate mode (the parameter is the value itself).
//!
//! # Example
//!
//! ```
//! use intcode::interpreter::decode::{decode, Mode, Opcode};
//!
//! let instr = decode(1002, 0).unwrap();
//! assert_eq!(instr.opcode, Opcode::Multiply);
//! assert_eq!(instr.mode(1), Mode::Immediate);
//! ```

mod decoder;

pub use decoder::{decode, MODE_DIGITS};

/// Operations in the Intcode instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `c <- a + b`
    Add,
    /// `c <- a * b`
    Multiply,
    /// `a <- next input`
    Input,
    /// emit `a`
    Output,
    /// jump to `b` if `a != 0`
    JumpIfTrue,
    /// jump to `b` if `a == 0`
    JumpIfFalse,
    /// `c <- (a < b) as int`
    LessThan,
    /// `c <- (a == b) as int`
    Equals,
    /// stop execution
    Halt,
}

impl Opcode {
    /// Map a two-digit opcode value to an operation.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Add),
            2 => Some(Self::Multiply),
            3 => Some(Self::Input),
            4 => Some(Self::Output),
            5 => Some(Self::JumpIfTrue),
            6 => Some(Self::JumpIfFalse),
            7 => Some(Self::LessThan),
            8 => Some(Self::Equals),
            99 => Some(Self::Halt),
            _ => None,
        }
    }

    /// The numeric opcode.
    pub fn code(self) -> i64 {
        match self {
            Self::Add => 1,
            Self::Multiply => 2,
            Self::Input => 3,
            Self::Output => 4,
            Self::JumpIfTrue => 5,
            Self::JumpIfFalse => 6,
            Self::LessThan => 7,
            Self::Equals => 8,
            Self::Halt => 99,
        }
    }

    /// Human-readable name used in traces.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Multiply => "MULTIPLY",
            Self::Input => "INPUT",
            Self::Output => "OUTPUT",
            Self::JumpIfTrue => "JUMP_IF_TRUE",
            Self::JumpIfFalse => "JUMP_IF_FALSE",
            Self::LessThan => "LESS_THAN",
            Self::Equals => "EQUALS",
            Self::Halt => "HALT",
        }
    }

    /// Number of parameters read as values (mode applies).
    pub fn inputs(self) -> usize {
        match self {
            Self::Add | Self::Multiply | Self::LessThan | Self::Equals => 2,
            Self::JumpIfTrue | Self::JumpIfFalse => 2,
            Self::Output => 1,
            Self::Input | Self::Halt => 0,
        }
    }

    /// Number of parameters used as write targets (never dereferenced).
    pub fn outputs(self) -> usize {
        match self {
            Self::Add | Self::Multiply | Self::LessThan | Self::Equals | Self::Input => 1,
            Self::Output | Self::JumpIfTrue | Self::JumpIfFalse | Self::Halt => 0,
        }
    }

    /// Instruction length in words, including the instruction word itself.
    pub fn width(self) -> usize {
        1 + self.inputs() + self.outputs()
    }
}

/// Parameter addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Parameter is an address; the operand is the value stored there.
    #[default]
    Position,
    /// Parameter is the operand.
    Immediate,
}

impl Mode {
    /// Map a mode digit to a mode.
    pub fn from_digit(digit: i64) -> Option<Self> {
        match digit {
            0 => Some(Self::Position),
            1 => Some(Self::Immediate),
            _ => None,
        }
    }

    /// Trace letter: `D` (direct) for immediate, `I` (indirect) for position.
    pub fn letter(self) -> char {
        match self {
            Self::Position => 'I',
            Self::Immediate => 'D',
        }
    }
}

/// A decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The operation.
    pub opcode: Opcode,
    /// Modes of parameters 1 to 3.
    pub modes: [Mode; MODE_DIGITS],
}

impl Instruction {
    /// Mode of the zero-based parameter `index`.
    ///
    /// Positions past the encoded digits default to position mode.
    #[inline]
    pub fn mode(&self, index: usize) -> Mode {
        self.modes.get(index).copied().unwrap_or_default()
    }

    /// Modes of the value parameters. Write targets are left out.
    #[inline]
    pub fn input_modes(&self) -> &[Mode] {
        &self.modes[..self.opcode.inputs()]
    }
}
