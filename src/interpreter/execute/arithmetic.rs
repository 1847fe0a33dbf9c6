//! Arithmetic and comparison operations.
//!
//! All four take two value operands and one write target:
//!
//! | Opcode | Operation | Result |
//! |--------|-----------|--------|
//! | 1 | add | `a + b` |
//! | 2 | multiply | `a * b` |
//! | 7 | less-than | `1` if `a < b` else `0` |
//! | 8 | equals | `1` if `a == b` else `0` |

use super::advance;
use super::operands::{fetch_operands, store};
use crate::interpreter::decode::Instruction;
use crate::interpreter::state::ExecutionContext;
use crate::interpreter::traits::{ExecuteResult, MachineError, TraceSink};

/// Arithmetic unit for the three-parameter operations.
pub struct ArithmeticUnit;

impl ArithmeticUnit {
    /// `c <- a + b`
    pub fn add(
        instr: &Instruction,
        ctx: &mut ExecutionContext,
        tracer: &mut dyn TraceSink,
    ) -> Result<ExecuteResult, MachineError> {
        Self::binary(instr, ctx, tracer, i64::checked_add)
    }

    /// `c <- a * b`
    pub fn multiply(
        instr: &Instruction,
        ctx: &mut ExecutionContext,
        tracer: &mut dyn TraceSink,
    ) -> Result<ExecuteResult, MachineError> {
        Self::binary(instr, ctx, tracer, i64::checked_mul)
    }

    /// `c <- 1 if a < b else 0`
    pub fn less_than(
        instr: &Instruction,
        ctx: &mut ExecutionContext,
        tracer: &mut dyn TraceSink,
    ) -> Result<ExecuteResult, MachineError> {
        Self::binary(instr, ctx, tracer, |a, b| Some(i64::from(a < b)))
    }

    /// `c <- 1 if a == b else 0`
    pub fn equals(
        instr: &Instruction,
        ctx: &mut ExecutionContext,
        tracer: &mut dyn TraceSink,
    ) -> Result<ExecuteResult, MachineError> {
        Self::binary(instr, ctx, tracer, |a, b| Some(i64::from(a == b)))
    }

    /// Shared body: resolve `a` and `b`, store `f(a, b)` at `c`.
    ///
    /// `f` returns `None` on overflow.
    fn binary(
        instr: &Instruction,
        ctx: &mut ExecutionContext,
        tracer: &mut dyn TraceSink,
        f: impl FnOnce(i64, i64) -> Option<i64>,
    ) -> Result<ExecuteResult, MachineError> {
        let ptr = ctx.ptr();
        let ops = fetch_operands(instr, ctx, tracer)?;
        let value = f(ops.inputs[0], ops.inputs[1]).ok_or(MachineError::Overflow { ptr })?;
        store(ctx, tracer, ops.outputs[0], value)?;
        Ok(ExecuteResult::Continue(advance(ptr, instr.opcode)))
    }
}
