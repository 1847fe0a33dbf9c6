//! The Intcode machine.
//!
//! [`Machine`] ties together memory, the decoder and the execution units to
//! run a single Intcode program.
//!
//! # Execution Model
//!
//! Each step:
//!
//! 1. Fetch the instruction word at the pointer
//! 2. Decode it into an opcode and parameter modes
//! 3. Dispatch to the matching execution unit
//! 4. Apply the result (continue, suspend or halt)
//!
//! `run` repeats this until the machine halts or suspends. Input suspends
//! when no value is available; output always suspends right after emitting.
//! Both return control to the caller, which can feed input, collect output
//! and call `run` again to resume where execution stopped.
//!
//! # Example
//!
//! ```
//! use std::collections::VecDeque;
//! use intcode::interpreter::{Machine, RunStatus, SuspendReason};
//!
//! // Echo one input value, then halt.
//! let mut machine: Machine<VecDeque<i64>, Vec<i64>> =
//!     Machine::new(vec![3, 5, 4, 5, 99, 0], VecDeque::new(), Vec::new());
//!
//! assert_eq!(machine.run().unwrap(), RunStatus::Suspended(SuspendReason::AwaitingInput));
//! machine.input_mut().push_back(42);
//! assert_eq!(machine.run().unwrap(), RunStatus::Suspended(SuspendReason::ProducedOutput));
//! assert_eq!(machine.output(), &vec![42]);
//! assert_eq!(machine.run().unwrap(), RunStatus::Halted);
//! ```

mod machine;

pub use machine::{
    ExecutionStatus, Machine, MachineConfig, RunStatus, StepResult, HALT_CODE, SUSPEND_CODE,
};

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::interpreter::traits::{MachineError, SuspendReason};

    type QueueMachine = Machine<VecDeque<i64>, VecDeque<i64>>;

    fn queue_machine(program: &[i64], input: &[i64]) -> QueueMachine {
        Machine::new(program.to_vec(), input.iter().copied().collect(), VecDeque::new())
    }

    /// Run to halt, collecting every output. Panics if input runs dry.
    fn run_collect(program: &[i64], input: &[i64]) -> Vec<i64> {
        let mut machine = queue_machine(program, input);
        loop {
            match machine.run().expect("program should not fault") {
                RunStatus::Halted => break,
                RunStatus::Suspended(SuspendReason::ProducedOutput) => continue,
                RunStatus::Suspended(SuspendReason::AwaitingInput) => panic!("input exhausted"),
            }
        }
        machine.output_mut().drain(..).collect()
    }

    fn run_memory(program: &[i64]) -> Vec<i64> {
        let mut machine = queue_machine(program, &[]);
        assert_eq!(machine.run(), Ok(RunStatus::Halted));
        machine.memory().as_slice().to_vec()
    }

    #[test]
    fn test_halt_only_leaves_memory_unchanged() {
        let program = [99, 5, -3, 1002];
        let mut machine = queue_machine(&program, &[]);

        assert_eq!(machine.run(), Ok(RunStatus::Halted));
        assert_eq!(machine.memory().as_slice(), &program);
        assert_eq!(machine.instructions(), 1);
    }

    #[test]
    fn test_arithmetic_program() {
        let mut machine = queue_machine(&[1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50], &[]);

        assert_eq!(machine.run(), Ok(RunStatus::Halted));
        assert_eq!(machine.read(0), Ok(3500));
    }

    #[test]
    fn test_small_programs_final_memory() {
        assert_eq!(run_memory(&[1, 0, 0, 0, 99]), vec![2, 0, 0, 0, 99]);
        assert_eq!(run_memory(&[2, 3, 0, 3, 99]), vec![2, 3, 0, 6, 99]);
        assert_eq!(run_memory(&[2, 4, 4, 5, 99, 0]), vec![2, 4, 4, 5, 99, 9801]);
        assert_eq!(
            run_memory(&[1, 1, 1, 4, 99, 5, 6, 0, 99]),
            vec![30, 1, 1, 4, 2, 5, 6, 0, 99]
        );
    }

    #[test]
    fn test_immediate_matches_position() {
        for (a, b) in [(3, 4), (-7, 20), (0, 0), (1000, -1000)] {
            let position = run_memory(&[1, 5, 6, 7, 99, a, b, 0]);
            let immediate = run_memory(&[1101, a, b, 7, 99, 0, 0, 0]);
            assert_eq!(position[7], a + b);
            assert_eq!(immediate[7], position[7]);
        }
    }

    #[test]
    fn test_negative_immediate() {
        assert_eq!(run_memory(&[1101, 100, -1, 4, 0]), vec![1101, 100, -1, 4, 99]);
    }

    #[test]
    fn test_equals_eight_position() {
        let program = [3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];
        assert_eq!(run_collect(&program, &[8]), vec![1]);
        assert_eq!(run_collect(&program, &[7]), vec![0]);
    }

    #[test]
    fn test_equals_eight_immediate() {
        let program = [3, 3, 1108, -1, 8, 3, 4, 3, 99];
        assert_eq!(run_collect(&program, &[8]), vec![1]);
        assert_eq!(run_collect(&program, &[7]), vec![0]);
    }

    #[test]
    fn test_less_than_eight_position() {
        let program = [3, 9, 7, 9, 10, 9, 4, 9, 99, -1, 8];
        assert_eq!(run_collect(&program, &[7]), vec![1]);
        assert_eq!(run_collect(&program, &[8]), vec![0]);
    }

    #[test]
    fn test_less_than_eight_immediate() {
        let program = [3, 3, 1107, -1, 8, 3, 4, 3, 99];
        assert_eq!(run_collect(&program, &[7]), vec![1]);
        assert_eq!(run_collect(&program, &[8]), vec![0]);
    }

    #[test]
    fn test_jump_if_true_paths() {
        // Outputs 0 when the input is 0, otherwise 1.
        let program = [3, 3, 1105, -1, 9, 1101, 0, 0, 12, 4, 12, 99, 1];

        assert_eq!(run_collect(&program, &[0]), vec![0]);
        assert_eq!(run_collect(&program, &[5]), vec![1]);
    }

    #[test]
    fn test_jump_if_false_paths() {
        let program = [3, 12, 6, 12, 15, 1, 13, 14, 13, 4, 13, 99, -1, 0, 1, 9];

        assert_eq!(run_collect(&program, &[0]), vec![0]);
        assert_eq!(run_collect(&program, &[-4]), vec![1]);
    }

    #[test]
    fn test_compare_with_eight() {
        let program = [
            3, 21, 1008, 21, 8, 20, 1005, 20, 22, 107, 8, 21, 20, 1006, 20, 31, 1106, 0, 36, 98,
            0, 0, 1002, 21, 125, 20, 4, 20, 1105, 1, 46, 104, 999, 1105, 1, 46, 1001, 20, 1, 20,
            4, 20, 1105, 1, 46, 98, 99,
        ];

        assert_eq!(run_collect(&program, &[7]), vec![999]);
        assert_eq!(run_collect(&program, &[8]), vec![1000]);
        assert_eq!(run_collect(&program, &[9]), vec![1001]);
    }

    #[test]
    fn test_awaiting_input_is_idempotent() {
        let mut machine = queue_machine(&[3, 5, 4, 5, 99, 0], &[]);

        let first = machine.run();
        let snapshot = machine.memory().clone();
        assert_eq!(first, Ok(RunStatus::Suspended(SuspendReason::AwaitingInput)));
        assert_eq!(machine.ptr(), 0);

        for _ in 0..3 {
            assert_eq!(machine.run(), first);
            assert_eq!(machine.ptr(), 0);
            assert_eq!(machine.memory(), &snapshot);
        }
        assert_eq!(machine.status(), ExecutionStatus::Suspended(SuspendReason::AwaitingInput));

        machine.input_mut().push_back(42);
        assert_eq!(machine.run(), Ok(RunStatus::Suspended(SuspendReason::ProducedOutput)));
        assert_eq!(machine.ptr(), 4);
        assert_eq!(machine.output_mut().pop_front(), Some(42));
        assert_eq!(machine.run(), Ok(RunStatus::Halted));
    }

    #[test]
    fn test_output_cadence() {
        let mut machine = queue_machine(&[104, 1, 104, 2, 104, 3, 99], &[]);
        let mut seen = Vec::new();

        loop {
            let before = machine.output().len();
            match machine.run().unwrap() {
                RunStatus::Suspended(SuspendReason::ProducedOutput) => {
                    assert_eq!(machine.output().len(), before + 1);
                    seen.push(machine.output_mut().pop_front().unwrap());
                }
                RunStatus::Halted => break,
                other => panic!("unexpected status {:?}", other),
            }
        }

        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_write_beyond_end_is_out_of_bounds() {
        let mut machine = queue_machine(&[1101, 1, 1, 4], &[]);

        assert_eq!(
            machine.run(),
            Err(MachineError::OutOfBounds { address: 4, len: 4 })
        );
        assert_eq!(machine.memory().len(), 4);
    }

    #[test]
    fn test_input_write_beyond_end_is_out_of_bounds() {
        let mut machine = queue_machine(&[3, 10, 99], &[1]);

        assert_eq!(
            machine.run(),
            Err(MachineError::OutOfBounds { address: 10, len: 3 })
        );
    }

    #[test]
    fn test_invalid_mode_is_fatal() {
        let mut machine = queue_machine(&[201, 0, 0, 0, 99], &[]);

        assert_eq!(
            machine.run(),
            Err(MachineError::InvalidMode { mode: 2, param: 1, ptr: 0 })
        );
        assert_eq!(machine.memory().as_slice(), &[201, 0, 0, 0, 99]);
    }

    #[test]
    fn test_malformed_word_is_fatal() {
        // Jump straight onto a negative data word.
        let mut jumper = queue_machine(&[1105, 1, 4, 0, -5], &[]);

        assert_eq!(
            jumper.run(),
            Err(MachineError::MalformedWord { word: -5, ptr: 4 })
        );
    }

    /// Chain one machine per phase setting, passing each output on.
    fn amplifier_chain(program: &[i64], phases: &[i64]) -> i64 {
        let mut signal = 0;
        for &phase in phases {
            let mut amp = queue_machine(program, &[phase, signal]);
            assert_eq!(amp.run(), Ok(RunStatus::Suspended(SuspendReason::ProducedOutput)));
            signal = amp.output_mut().pop_front().unwrap();
        }
        signal
    }

    /// Run machines round-robin, feeding the last output back to the first.
    fn feedback_loop(program: &[i64], phases: &[i64]) -> i64 {
        let mut amps: Vec<QueueMachine> =
            phases.iter().map(|&phase| queue_machine(program, &[phase])).collect();
        let last = amps.len() - 1;
        let mut signal = 0;
        let mut result = None;

        loop {
            for (i, amp) in amps.iter_mut().enumerate() {
                amp.input_mut().push_back(signal);
                match amp.run().unwrap() {
                    RunStatus::Suspended(SuspendReason::ProducedOutput) => {
                        signal = amp.output_mut().pop_front().unwrap();
                        if i == last {
                            result = Some(signal);
                        }
                    }
                    RunStatus::Halted => return result.unwrap(),
                    RunStatus::Suspended(SuspendReason::AwaitingInput) => {
                        panic!("amplifier {} starved", i)
                    }
                }
            }
        }
    }

    #[test]
    fn test_amplifier_chain() {
        let program = [3, 15, 3, 16, 1002, 16, 10, 16, 1, 16, 15, 15, 4, 15, 99, 0, 0];
        assert_eq!(amplifier_chain(&program, &[4, 3, 2, 1, 0]), 43210);
    }

    #[test]
    fn test_feedback_loop_pipeline() {
        let program = [
            3, 26, 1001, 26, -4, 26, 3, 27, 1002, 27, 2, 27, 1, 27, 26, 27, 4, 27, 1001, 28, -1,
            28, 1005, 28, 6, 99, 0, 0, 5,
        ];
        assert_eq!(feedback_loop(&program, &[9, 8, 7, 6, 5]), 139629729);
    }
}
