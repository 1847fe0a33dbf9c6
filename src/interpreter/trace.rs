//! Execution tracing.
//!
//! The machine reports a [`TraceEvent`] for every resume, every decoded
//! step and every memory write. Where the events go is decided by the
//! [`TraceSink`] supplied at construction:
//!
//! | Sink | Behavior |
//! |------|----------|
//! | [`NullTrace`] | Drops everything |
//! | [`LogTrace`] | Renders each event through `log::trace!` |
//! | [`RecordingTrace`] | Keeps events in memory for later inspection |

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::decode::{Mode, Opcode};
use super::traits::TraceSink;

/// Log target used by [`LogTrace`].
pub const TRACE_TARGET: &str = "intcode::trace";

/// A single diagnostic event.
///
/// Step events borrow the operands they describe, so reporting an event to
/// a sink that drops it costs no allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent<'a> {
    /// A run call started or resumed at `ptr`.
    Resume {
        /// Pointer execution continues from.
        ptr: usize,
    },

    /// An instruction was decoded and its operands resolved.
    Step {
        /// Pointer of the instruction word.
        ptr: usize,
        /// Decoded operation.
        opcode: Opcode,
        /// Modes of the value parameters.
        modes: &'a [Mode],
        /// Raw parameter words following the instruction word.
        params: &'a [i64],
        /// Resolved value operands.
        inputs: &'a [i64],
        /// Write-target addresses.
        outputs: &'a [i64],
    },

    /// A value was written to memory.
    Write {
        /// Destination address.
        address: i64,
        /// Value written.
        value: i64,
    },
}

impl fmt::Display for TraceEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Resume { .. } => write!(f, "-----"),
            TraceEvent::Step { ptr, opcode, modes, params, inputs, outputs } => {
                write!(f, "{:3} {} ", ptr, opcode.name())?;
                for mode in modes.iter() {
                    write!(f, "{}", mode.letter())?;
                }
                writeln!(f, " {:?}", params)?;
                write!(f, "    IN: {:?} OUT: {:?}", inputs, outputs)
            }
            TraceEvent::Write { address, value } => {
                write!(f, "    WRITE: ptr={} value={}", address, value)
            }
        }
    }
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    #[inline]
    fn trace(&mut self, _event: &TraceEvent<'_>) {}
}

/// Sink that renders events through the `log` facade at trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn trace(&mut self, event: &TraceEvent<'_>) {
        for line in event.to_string().lines() {
            log::trace!(target: TRACE_TARGET, "{}", line);
        }
    }
}

/// Sink that records events, rendered as text.
///
/// Clones share the same buffer, so a caller can keep one handle and give
/// another to a machine.
#[derive(Debug, Clone, Default)]
pub struct RecordingTrace {
    events: Rc<RefCell<Vec<String>>>,
}

impl RecordingTrace {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, one string per event.
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    /// Recorded events rendered as text lines.
    pub fn lines(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .flat_map(|e| e.lines().map(str::to_string).collect::<Vec<_>>())
            .collect()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl TraceSink for RecordingTrace {
    fn trace(&mut self, event: &TraceEvent<'_>) {
        self.events.borrow_mut().push(event.to_string());
    }
}
