//! Execution units for Intcode operations.
//!
//! | Unit | Operations |
//! |------|------------|
//! | [`ArithmeticUnit`] | add, multiply, less-than, equals |
//! | [`ControlUnit`] | jump-if-true, jump-if-false, halt |
//! | [`IoUnit`] | input, output |
//!
//! [`execute`] dispatches a decoded instruction to its unit with an
//! exhaustive match over [`Opcode`]; every handler returns an
//! [`ExecuteResult`] telling the run loop where to go next.

mod arithmetic;
mod control;
mod io;
mod operands;

pub use arithmetic::ArithmeticUnit;
pub use control::ControlUnit;
pub use io::IoUnit;
pub use operands::{fetch_operands, store, Operands};

use crate::interpreter::decode::{Instruction, Opcode};
use crate::interpreter::state::ExecutionContext;
use crate::interpreter::traits::{
    ExecuteResult, InputSource, MachineError, OutputSink, TraceSink,
};

/// Execute one decoded instruction at the context's current pointer.
///
/// The pointer itself is left untouched; applying the result is the run
/// loop's job.
pub fn execute(
    instr: &Instruction,
    ctx: &mut ExecutionContext,
    input: &mut dyn InputSource,
    output: &mut dyn OutputSink,
    tracer: &mut dyn TraceSink,
) -> Result<ExecuteResult, MachineError> {
    match instr.opcode {
        Opcode::Add => ArithmeticUnit::add(instr, ctx, tracer),
        Opcode::Multiply => ArithmeticUnit::multiply(instr, ctx, tracer),
        Opcode::Input => IoUnit::input(instr, ctx, input, tracer),
        Opcode::Output => IoUnit::output(instr, ctx, output, tracer),
        Opcode::JumpIfTrue => ControlUnit::jump_if_true(instr, ctx, tracer),
        Opcode::JumpIfFalse => ControlUnit::jump_if_false(instr, ctx, tracer),
        Opcode::LessThan => ArithmeticUnit::less_than(instr, ctx, tracer),
        Opcode::Equals => ArithmeticUnit::equals(instr, ctx, tracer),
        Opcode::Halt => ControlUnit::halt(instr, ctx, tracer),
    }
}

/// Pointer of the instruction following the one at `ptr`.
#[inline]
fn advance(ptr: usize, opcode: Opcode) -> i64 {
    (ptr + opcode.width()) as i64
}
