//! Instruction word decoder.
//!
//! Splits a raw word into its opcode and parameter modes and validates both
//! against the fixed instruction table.

use super::{Instruction, Mode, Opcode};
use crate::interpreter::traits::MachineError;

/// Largest word that fits the five-digit `CBAOO` layout.
const MAX_WORD: i64 = 99_999;

/// Number of mode digits carried by every instruction word.
pub const MODE_DIGITS: usize = 3;

/// Decode the instruction word found at `ptr`.
///
/// The word is read as a fixed-width decimal `CBAOO`: `OO` is the opcode and
/// `A`, `B`, `C` are the modes of the first, second and third parameter.
/// Mode digits are validated for all three positions even when the operation
/// takes fewer parameters.
pub fn decode(word: i64, ptr: usize) -> Result<Instruction, MachineError> {
    if !(0..=MAX_WORD).contains(&word) {
        return Err(MachineError::MalformedWord { word, ptr });
    }

    let code = word % 100;
    let opcode = Opcode::from_code(code).ok_or(MachineError::InvalidOpcode { opcode: code, ptr })?;

    let mut modes = [Mode::Position; MODE_DIGITS];
    let mut rest = word / 100;
    for (i, mode) in modes.iter_mut().enumerate() {
        let digit = rest % 10;
        *mode = Mode::from_digit(digit).ok_or(MachineError::InvalidMode {
            mode: digit,
            param: i as u8 + 1,
            ptr,
        })?;
        rest /= 10;
    }

    Ok(Instruction { opcode, modes })
}
