//! Control unit execution.
//!
//! Handles control flow:
//!
//! - **Jump-if-true** (5): jump to `b` when `a != 0`
//! - **Jump-if-false** (6): jump to `b` when `a == 0`
//! - **Halt** (99): stop the machine

use super::advance;
use super::operands::fetch_operands;
use crate::interpreter::decode::Instruction;
use crate::interpreter::state::ExecutionContext;
use crate::interpreter::traits::{ExecuteResult, MachineError, TraceSink};

/// Control unit for jumps and halt.
pub struct ControlUnit;

impl ControlUnit {
    /// Jump to `b` if `a` is non-zero, else fall through.
    pub fn jump_if_true(
        instr: &Instruction,
        ctx: &mut ExecutionContext,
        tracer: &mut dyn TraceSink,
    ) -> Result<ExecuteResult, MachineError> {
        Self::jump(instr, ctx, tracer, |a| a != 0)
    }

    /// Jump to `b` if `a` is zero, else fall through.
    pub fn jump_if_false(
        instr: &Instruction,
        ctx: &mut ExecutionContext,
        tracer: &mut dyn TraceSink,
    ) -> Result<ExecuteResult, MachineError> {
        Self::jump(instr, ctx, tracer, |a| a == 0)
    }

    /// Stop execution.
    pub fn halt(
        instr: &Instruction,
        ctx: &mut ExecutionContext,
        tracer: &mut dyn TraceSink,
    ) -> Result<ExecuteResult, MachineError> {
        fetch_operands(instr, ctx, tracer)?;
        Ok(ExecuteResult::Halt)
    }

    fn jump(
        instr: &Instruction,
        ctx: &mut ExecutionContext,
        tracer: &mut dyn TraceSink,
        taken: impl FnOnce(i64) -> bool,
    ) -> Result<ExecuteResult, MachineError> {
        let ptr = ctx.ptr();
        let ops = fetch_operands(instr, ctx, tracer)?;
        let (test, target) = (ops.inputs[0], ops.inputs[1]);

        if taken(test) {
            Ok(ExecuteResult::Continue(target))
        } else {
            Ok(ExecuteResult::Continue(advance(ptr, instr.opcode)))
        }
    }
}
