//! Core traits for the interpreter.
//!
//! These traits define the capability slots a caller plugs into a
//! [`Machine`](crate::interpreter::Machine):
//!
//! - `InputSource`: Supplies input values, or reports that none is ready yet
//! - `OutputSink`: Receives produced output values one at a time
//! - `TraceSink`: Receives diagnostic trace events for every step
//!
//! The machine never blocks on I/O. When an `InputSource` has nothing to
//! offer, the input instruction suspends and hands control back to the
//! caller, which is what lets one thread drive several machines.

use std::collections::VecDeque;

use thiserror::Error;

use super::trace::TraceEvent;

/// Why a machine returned control to its caller without halting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuspendReason {
    /// An input instruction found no value available.
    AwaitingInput,
    /// An output instruction just emitted a value.
    ProducedOutput,
}

/// Result of executing a single instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteResult {
    /// Continue at the given pointer. A negative pointer halts the machine.
    Continue(i64),

    /// Pause execution; the next run resumes at `resume`.
    Suspend {
        /// Why execution paused.
        reason: SuspendReason,
        /// Pointer to resume from.
        resume: usize,
    },

    /// Machine has halted (normal termination).
    Halt,
}

/// Errors that can occur while decoding or executing Intcode.
///
/// Every variant is fatal: the run loop never recovers from any of them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MachineError {
    /// Decoded opcode has no matching operation.
    #[error("invalid opcode {opcode} at ptr {ptr}")]
    InvalidOpcode {
        /// The two-digit opcode value.
        opcode: i64,
        /// Instruction pointer where decoding failed.
        ptr: usize,
    },

    /// Parameter mode digit outside {0, 1}.
    #[error("invalid mode {mode} for parameter {param} at ptr {ptr}")]
    InvalidMode {
        /// The offending mode digit.
        mode: i64,
        /// One-based parameter position.
        param: u8,
        /// Instruction pointer where decoding failed.
        ptr: usize,
    },

    /// Read or write outside `[0, len)`.
    #[error("address {address} out of bounds (memory length {len})")]
    OutOfBounds {
        /// The requested address.
        address: i64,
        /// Memory length at the time of the access.
        len: usize,
    },

    /// Instruction word cannot be split into opcode and modes.
    #[error("malformed instruction word {word} at ptr {ptr}")]
    MalformedWord {
        /// The raw instruction word.
        word: i64,
        /// Instruction pointer where decoding failed.
        ptr: usize,
    },

    /// Arithmetic result does not fit in a 64-bit signed integer.
    #[error("arithmetic overflow at ptr {ptr}")]
    Overflow {
        /// Instruction pointer of the overflowing instruction.
        ptr: usize,
    },

    /// The machine already failed and cannot continue.
    #[error("machine faulted at ptr {ptr}; no further execution possible")]
    Faulted {
        /// Instruction pointer the fault occurred at.
        ptr: usize,
    },
}

/// Trait for supplying input values to a machine.
///
/// Returning `None` means "no value yet", not "never": the machine suspends
/// with [`SuspendReason::AwaitingInput`] and retries the same instruction on
/// the next run.
pub trait InputSource {
    /// Take the next input value, if one is available.
    fn next_input(&mut self) -> Option<i64>;
}

/// Trait for receiving output values from a machine.
pub trait OutputSink {
    /// Receive one produced value.
    fn emit_output(&mut self, value: i64);
}

/// Trait for receiving trace events.
///
/// The machine reports every event unconditionally; the sink decides whether
/// to render, record or drop it. Sinks must not influence execution.
pub trait TraceSink {
    /// Handle a single trace event.
    fn trace(&mut self, event: &TraceEvent<'_>);
}

impl InputSource for VecDeque<i64> {
    fn next_input(&mut self) -> Option<i64> {
        self.pop_front()
    }
}

impl OutputSink for VecDeque<i64> {
    fn emit_output(&mut self, value: i64) {
        self.push_back(value);
    }
}

impl OutputSink for Vec<i64> {
    fn emit_output(&mut self, value: i64) {
        self.push(value);
    }
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn next_input(&mut self) -> Option<i64> {
        (**self).next_input()
    }
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    fn emit_output(&mut self, value: i64) {
        (**self).emit_output(value);
    }
}
