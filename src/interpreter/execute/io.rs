//! Input/output unit.
//!
//! The only two operations that can suspend the machine:
//!
//! - **Input** (3): takes a value from the [`InputSource`]; if none is
//!   available the machine suspends and the instruction is retried on resume
//! - **Output** (4): hands a value to the [`OutputSink`] and always suspends
//!   afterwards, so the caller sees outputs one at a time

use super::advance;
use super::operands::{fetch_operands, store};
use crate::interpreter::decode::Instruction;
use crate::interpreter::state::ExecutionContext;
use crate::interpreter::traits::{
    ExecuteResult, InputSource, MachineError, OutputSink, SuspendReason, TraceSink,
};

/// Unit for the input and output operations.
pub struct IoUnit;

impl IoUnit {
    /// `a <- next input`, or suspend at the current pointer.
    pub fn input(
        instr: &Instruction,
        ctx: &mut ExecutionContext,
        input: &mut dyn InputSource,
        tracer: &mut dyn TraceSink,
    ) -> Result<ExecuteResult, MachineError> {
        let ptr = ctx.ptr();
        let ops = fetch_operands(instr, ctx, tracer)?;

        match input.next_input() {
            Some(value) => {
                store(ctx, tracer, ops.outputs[0], value)?;
                Ok(ExecuteResult::Continue(advance(ptr, instr.opcode)))
            }
            None => Ok(ExecuteResult::Suspend {
                reason: SuspendReason::AwaitingInput,
                resume: ptr,
            }),
        }
    }

    /// Emit `a`, then suspend just past the instruction.
    pub fn output(
        instr: &Instruction,
        ctx: &mut ExecutionContext,
        output: &mut dyn OutputSink,
        tracer: &mut dyn TraceSink,
    ) -> Result<ExecuteResult, MachineError> {
        let ptr = ctx.ptr();
        let ops = fetch_operands(instr, ctx, tracer)?;

        output.emit_output(ops.inputs[0]);
        Ok(ExecuteResult::Suspend {
            reason: SuspendReason::ProducedOutput,
            resume: ptr + instr.opcode.width(),
        })
    }
}
