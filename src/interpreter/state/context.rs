//! Execution context for an Intcode machine.
//!
//! The `ExecutionContext` holds everything an instruction may touch:
//! memory, the instruction pointer and execution statistics.

use super::memory::Memory;
use crate::interpreter::traits::MachineError;

/// Machine state visible to the operation handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    /// Code and data.
    pub memory: Memory,
    /// Pointer to the next instruction word.
    ptr: usize,
    /// Instructions dispatched so far, including suspended attempts.
    pub instructions: u64,
}

impl ExecutionContext {
    /// Create a context over `memory` starting at `ptr`.
    pub fn new(memory: Memory, ptr: usize) -> Self {
        Self {
            memory,
            ptr,
            instructions: 0,
        }
    }

    /// Get the instruction pointer.
    #[inline]
    pub fn ptr(&self) -> usize {
        self.ptr
    }

    /// Set the instruction pointer.
    #[inline]
    pub fn set_ptr(&mut self, ptr: usize) {
        self.ptr = ptr;
    }

    /// Fetch the instruction word at the current pointer.
    pub fn fetch(&self) -> Result<i64, MachineError> {
        let address = i64::try_from(self.ptr).unwrap_or(i64::MAX);
        self.memory.read(address)
    }
}
