//! Operand access and memory writes.
//!
//! Value parameters are resolved according to their mode. Write-target
//! parameters are passed through untouched: they are addresses for a later
//! [`store`].

use crate::interpreter::decode::{Instruction, Mode};
use crate::interpreter::state::ExecutionContext;
use crate::interpreter::trace::TraceEvent;
use crate::interpreter::traits::{MachineError, TraceSink};

/// Resolved operands of one instruction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Operands {
    /// Value operands, in parameter order.
    pub inputs: Vec<i64>,
    /// Write-target addresses, in parameter order.
    pub outputs: Vec<i64>,
}

/// Read and resolve the parameters of `instr` at the current pointer.
///
/// Emits one [`TraceEvent::Step`] once every operand is resolved.
pub fn fetch_operands(
    instr: &Instruction,
    ctx: &ExecutionContext,
    tracer: &mut dyn TraceSink,
) -> Result<Operands, MachineError> {
    let ptr = ctx.ptr();
    let n_inputs = instr.opcode.inputs();
    let n_outputs = instr.opcode.outputs();

    let params = ctx.memory.read_slice(ptr + 1, n_inputs + n_outputs)?;

    let inputs = params[..n_inputs]
        .iter()
        .enumerate()
        .map(|(i, &raw)| match instr.mode(i) {
            Mode::Position => ctx.memory.read(raw),
            Mode::Immediate => Ok(raw),
        })
        .collect::<Result<Vec<_>, _>>()?;
    let outputs = &params[n_inputs..];

    tracer.trace(&TraceEvent::Step {
        ptr,
        opcode: instr.opcode,
        modes: instr.input_modes(),
        params,
        inputs: &inputs,
        outputs,
    });

    Ok(Operands { inputs, outputs: outputs.to_vec() })
}

/// Write `value` to the absolute `address`.
pub fn store(
    ctx: &mut ExecutionContext,
    tracer: &mut dyn TraceSink,
    address: i64,
    value: i64,
) -> Result<(), MachineError> {
    tracer.trace(&TraceEvent::Write { address, value });
    ctx.memory.write(address, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::decode::decode;
    use crate::interpreter::state::Memory;
    use crate::interpreter::trace::{NullTrace, RecordingTrace};

    fn ctx(program: Vec<i64>) -> ExecutionContext {
        ExecutionContext::new(Memory::new(program), 0)
    }

    #[test]
    fn test_position_mode_dereferences() {
        let ctx = ctx(vec![1, 5, 6, 0, 99, 30, 40]);
        let instr = decode(1, 0).unwrap();

        let ops = fetch_operands(&instr, &ctx, &mut NullTrace).unwrap();
        assert_eq!(ops.inputs, vec![30, 40]);
        assert_eq!(ops.outputs, vec![0]);
    }

    #[test]
    fn test_immediate_mode_is_literal() {
        let ctx = ctx(vec![1101, 5, 6, 0, 99]);
        let instr = decode(1101, 0).unwrap();

        let ops = fetch_operands(&instr, &ctx, &mut NullTrace).unwrap();
        assert_eq!(ops.inputs, vec![5, 6]);
    }

    #[test]
    fn test_output_params_not_dereferenced() {
        // Target 100 is far outside memory but is only an address here.
        let ctx = ctx(vec![3, 100]);
        let instr = decode(3, 0).unwrap();

        let ops = fetch_operands(&instr, &ctx, &mut NullTrace).unwrap();
        assert!(ops.inputs.is_empty());
        assert_eq!(ops.outputs, vec![100]);
    }

    #[test]
    fn test_truncated_instruction_out_of_bounds() {
        let ctx = ctx(vec![1, 0]);
        let instr = decode(1, 0).unwrap();

        let err = fetch_operands(&instr, &ctx, &mut NullTrace).unwrap_err();
        assert!(matches!(err, MachineError::OutOfBounds { .. }));
    }

    #[test]
    fn test_dereference_out_of_bounds() {
        let ctx = ctx(vec![4, 50, 99]);
        let instr = decode(4, 0).unwrap();

        let err = fetch_operands(&instr, &ctx, &mut NullTrace).unwrap_err();
        assert_eq!(err, MachineError::OutOfBounds { address: 50, len: 3 });
    }

    #[test]
    fn test_fetch_traces_step() {
        let ctx = ctx(vec![1001, 4, 3, 4, 33]);
        let instr = decode(1001, 0).unwrap();
        let recorder = RecordingTrace::new();

        fetch_operands(&instr, &ctx, &mut recorder.clone()).unwrap();

        assert_eq!(
            recorder.lines(),
            vec!["  0 ADD ID [4, 3, 4]", "    IN: [33, 3] OUT: [4]"]
        );
    }

    /// Remembers where the raw parameters of the last step lived.
    #[derive(Default)]
    struct ParamAddress(Option<*const i64>);

    impl TraceSink for ParamAddress {
        fn trace(&mut self, event: &TraceEvent<'_>) {
            if let TraceEvent::Step { params, .. } = event {
                self.0 = Some(params.as_ptr());
            }
        }
    }

    #[test]
    fn test_step_event_borrows_memory() {
        let ctx = ctx(vec![1, 5, 6, 0, 99, 30, 40]);
        let instr = decode(1, 0).unwrap();
        let mut sink = ParamAddress::default();

        fetch_operands(&instr, &ctx, &mut sink).unwrap();
        assert_eq!(sink.0, Some(ctx.memory.as_slice()[1..].as_ptr()));
    }

    #[test]
    fn test_store_traces_and_writes() {
        let mut ctx = ctx(vec![0, 0]);
        let recorder = RecordingTrace::new();

        store(&mut ctx, &mut recorder.clone(), 1, 9).unwrap();
        assert_eq!(ctx.memory.read(1), Ok(9));
        assert_eq!(recorder.lines(), vec!["    WRITE: ptr=1 value=9"]);

        let err = store(&mut ctx, &mut NullTrace, 2, 9).unwrap_err();
        assert_eq!(err, MachineError::OutOfBounds { address: 2, len: 2 });
    }
}
