//! Intcode interpreter.
//!
//! This module implements a suspendable interpreter for the Intcode
//! instruction set: a single integer array serves as both code and data,
//! and execution can pause on input and output so that several machines
//! (or a machine and an external driver) can exchange values.
//!
//! # Architecture
//!
//! The interpreter is organized into several submodules:
//!
//! - [`traits`]: Capability traits, execution results and errors
//! - [`state`]: Bounds-checked memory and the execution context
//! - [`decode`]: Instruction word decoding (opcode + parameter modes)
//! - [`execute`]: Operand access and the operation table
//! - [`core`]: The [`Machine`] and its run loop
//! - [`console`]: Line-oriented stdin/stdout capabilities
//! - [`trace`]: Trace events and sinks
//!
//! # Example
//!
//! ```
//! use std::collections::VecDeque;
//! use intcode::interpreter::{Machine, RunStatus};
//!
//! let program = vec![1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50];
//! let mut machine: Machine<VecDeque<i64>, Vec<i64>> =
//!     Machine::new(program, VecDeque::new(), Vec::new());
//!
//! assert_eq!(machine.run().unwrap(), RunStatus::Halted);
//! assert_eq!(machine.read(0).unwrap(), 3500);
//! ```

pub mod traits;
pub mod state;
pub mod decode;
pub mod execute;
pub mod core;
pub mod console;
pub mod trace;

// Re-export key types for convenience
pub use traits::{ExecuteResult, InputSource, MachineError, OutputSink, SuspendReason, TraceSink};

// Decoder types
pub use decode::{Instruction, Mode, Opcode};

// State types
pub use state::{ExecutionContext, Memory};

// Core types
pub use core::{
    ExecutionStatus, Machine, MachineConfig, RunStatus, StepResult, HALT_CODE, SUSPEND_CODE,
};

// Capabilities
pub use console::{LineInput, LineOutput, StdinInput, StdoutOutput};
pub use trace::{LogTrace, NullTrace, RecordingTrace, TraceEvent};
