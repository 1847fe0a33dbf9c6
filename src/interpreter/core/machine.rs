//! Machine implementation.
//!
//! The machine owns its memory and instruction pointer and manages the
//! decode-execute loop, including suspension on input and output.

use std::fmt;

use crate::interpreter::console::{StdinInput, StdoutOutput};
use crate::interpreter::decode::{decode, Instruction};
use crate::interpreter::execute::execute;
use crate::interpreter::state::{ExecutionContext, Memory};
use crate::interpreter::trace::{LogTrace, NullTrace, TraceEvent};
use crate::interpreter::traits::{
    ExecuteResult, InputSource, MachineError, OutputSink, SuspendReason, TraceSink,
};

/// Status code returned by [`RunStatus::code`] for a halted machine.
pub const HALT_CODE: i64 = -1;

/// Status code returned by [`RunStatus::code`] for a suspended machine.
pub const SUSPEND_CODE: i64 = -2;

/// Machine lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStatus {
    /// Ready to execute, or executing.
    #[default]
    Running,
    /// Returned control to the caller; a later run resumes.
    Suspended(SuspendReason),
    /// Reached halt. Terminal.
    Halted,
    /// Hit a fatal error. Terminal.
    Faulted,
}

/// Outcome of a [`Machine::run`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The machine halted; further runs do nothing.
    Halted,
    /// The machine paused and can be resumed.
    Suspended(SuspendReason),
}

impl RunStatus {
    /// Numeric status: [`HALT_CODE`] or [`SUSPEND_CODE`].
    pub fn code(self) -> i64 {
        match self {
            RunStatus::Halted => HALT_CODE,
            RunStatus::Suspended(_) => SUSPEND_CODE,
        }
    }

    /// Check if this is the terminal status.
    pub fn is_halted(self) -> bool {
        matches!(self, RunStatus::Halted)
    }
}

/// Result of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Executed one instruction; more can follow.
    Continue,
    /// Executed (or attempted) an instruction that suspends.
    Suspend(SuspendReason),
    /// Machine halted.
    Halt,
}

/// Construction-time machine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MachineConfig {
    /// Pointer of the first instruction to execute.
    pub start_ptr: usize,
    /// Render every step through the `log` facade.
    pub trace: bool,
}

/// An Intcode machine.
///
/// Generic over its input and output capabilities. The defaults read from
/// stdin and write to stdout; tests and pipelines typically use
/// `VecDeque<i64>` for both.
pub struct Machine<I = StdinInput, O = StdoutOutput>
where
    I: InputSource,
    O: OutputSink,
{
    /// Memory and instruction pointer.
    ctx: ExecutionContext,
    /// Input capability.
    input: I,
    /// Output capability.
    output: O,
    /// Trace sink, called for every event.
    tracer: Box<dyn TraceSink>,
    /// Lifecycle state.
    status: ExecutionStatus,
    /// Last decoded instruction (for debugging).
    last_instruction: Option<Instruction>,
}

impl Machine<StdinInput, StdoutOutput> {
    /// Create a machine wired to standard input and output.
    pub fn interactive(program: Vec<i64>, config: &MachineConfig) -> Self {
        Self::with_config(program, config, StdinInput::stdin(), StdoutOutput::stdout())
    }
}

impl<I, O> Machine<I, O>
where
    I: InputSource,
    O: OutputSink,
{
    /// Create a machine starting at pointer 0 with tracing off.
    pub fn new(program: Vec<i64>, input: I, output: O) -> Self {
        Self::with_config(program, &MachineConfig::default(), input, output)
    }

    /// Create a machine with explicit settings.
    pub fn with_config(program: Vec<i64>, config: &MachineConfig, input: I, output: O) -> Self {
        let tracer: Box<dyn TraceSink> = if config.trace {
            Box::new(LogTrace)
        } else {
            Box::new(NullTrace)
        };

        Self {
            ctx: ExecutionContext::new(Memory::new(program), config.start_ptr),
            input,
            output,
            tracer,
            status: ExecutionStatus::Running,
            last_instruction: None,
        }
    }

    /// Replace the trace sink.
    pub fn with_tracer<T: TraceSink + 'static>(mut self, tracer: T) -> Self {
        self.tracer = Box::new(tracer);
        self
    }

    /// Get the lifecycle state.
    pub fn status(&self) -> ExecutionStatus {
        self.status
    }

    /// Check if the machine halted.
    pub fn is_halted(&self) -> bool {
        matches!(self.status, ExecutionStatus::Halted)
    }

    /// Check if the machine is suspended.
    pub fn is_suspended(&self) -> bool {
        matches!(self.status, ExecutionStatus::Suspended(_))
    }

    /// Get the instruction pointer.
    pub fn ptr(&self) -> usize {
        self.ctx.ptr()
    }

    /// Instructions dispatched so far, including suspended input attempts.
    pub fn instructions(&self) -> u64 {
        self.ctx.instructions
    }

    /// Get the last decoded instruction.
    pub fn last_instruction(&self) -> Option<&Instruction> {
        self.last_instruction.as_ref()
    }

    /// Read memory at `address`.
    pub fn read(&self, address: i64) -> Result<i64, MachineError> {
        self.ctx.memory.read(address)
    }

    /// View the whole memory.
    pub fn memory(&self) -> &Memory {
        &self.ctx.memory
    }

    /// Get the input capability.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Get the input capability mutably (e.g. to queue values).
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Get the output capability.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get the output capability mutably (e.g. to drain values).
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Consume the machine, returning memory and capabilities.
    pub fn into_parts(self) -> (Memory, I, O) {
        (self.ctx.memory, self.input, self.output)
    }

    /// Execute a single instruction.
    ///
    /// A halted machine stays halted; a faulted machine refuses to run.
    pub fn step(&mut self) -> Result<StepResult, MachineError> {
        match self.status {
            ExecutionStatus::Halted => return Ok(StepResult::Halt),
            ExecutionStatus::Faulted => {
                return Err(MachineError::Faulted { ptr: self.ctx.ptr() })
            }
            ExecutionStatus::Running | ExecutionStatus::Suspended(_) => {}
        }

        self.status = ExecutionStatus::Running;
        match self.try_step() {
            Ok(result) => Ok(result),
            Err(e) => {
                log::debug!("Machine faulted at ptr {}: {}", self.ctx.ptr(), e);
                self.status = ExecutionStatus::Faulted;
                Err(e)
            }
        }
    }

    /// Run until the machine halts or suspends.
    ///
    /// Resumes from wherever the previous call stopped. After an
    /// `AwaitingInput` suspension the input instruction is retried.
    pub fn run(&mut self) -> Result<RunStatus, MachineError> {
        match self.status {
            ExecutionStatus::Halted => return Ok(RunStatus::Halted),
            ExecutionStatus::Faulted => {
                return Err(MachineError::Faulted { ptr: self.ctx.ptr() })
            }
            ExecutionStatus::Running | ExecutionStatus::Suspended(_) => {}
        }

        self.tracer.trace(&TraceEvent::Resume { ptr: self.ctx.ptr() });

        loop {
            match self.step()? {
                StepResult::Continue => continue,
                StepResult::Suspend(reason) => {
                    log::debug!("Suspended ({:?}) at ptr {}", reason, self.ctx.ptr());
                    return Ok(RunStatus::Suspended(reason));
                }
                StepResult::Halt => {
                    log::debug!("Halted after {} instructions", self.ctx.instructions);
                    return Ok(RunStatus::Halted);
                }
            }
        }
    }

    fn try_step(&mut self) -> Result<StepResult, MachineError> {
        let ptr = self.ctx.ptr();
        let instr = decode(self.ctx.fetch()?, ptr)?;
        self.last_instruction = Some(instr);
        self.ctx.instructions += 1;

        let result = execute(
            &instr,
            &mut self.ctx,
            &mut self.input,
            &mut self.output,
            self.tracer.as_mut(),
        )?;

        Ok(self.apply(result))
    }

    /// Apply a handler's result to the pointer and status.
    fn apply(&mut self, result: ExecuteResult) -> StepResult {
        match result {
            ExecuteResult::Continue(next) => match usize::try_from(next) {
                Ok(next) => {
                    self.ctx.set_ptr(next);
                    StepResult::Continue
                }
                Err(_) => {
                    log::debug!("Negative pointer {} from ptr {}, halting", next, self.ctx.ptr());
                    self.status = ExecutionStatus::Halted;
                    StepResult::Halt
                }
            },

            ExecuteResult::Suspend { reason, resume } => {
                self.ctx.set_ptr(resume);
                self.status = ExecutionStatus::Suspended(reason);
                StepResult::Suspend(reason)
            }

            ExecuteResult::Halt => {
                self.status = ExecutionStatus::Halted;
                StepResult::Halt
            }
        }
    }
}

impl<I, O> fmt::Debug for Machine<I, O>
where
    I: InputSource + fmt::Debug,
    O: OutputSink + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("ptr", &self.ctx.ptr())
            .field("status", &self.status)
            .field("instructions", &self.ctx.instructions)
            .field("input", &self.input)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}
