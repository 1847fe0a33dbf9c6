//! Bounds-checked Intcode memory.
//!
//! Memory is a fixed-length array of signed integers holding both code and
//! data. It never grows: every read and write validates the address against
//! the current length and fails with [`MachineError::OutOfBounds`] instead.

use crate::interpreter::traits::MachineError;

/// Addressable integer memory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Memory {
    cells: Vec<i64>,
}

impl Memory {
    /// Create memory holding the given program.
    pub fn new(cells: Vec<i64>) -> Self {
        Self { cells }
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if memory has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Validate an address and convert it to an index.
    #[inline]
    pub fn index(&self, address: i64) -> Result<usize, MachineError> {
        usize::try_from(address)
            .ok()
            .filter(|&i| i < self.cells.len())
            .ok_or(MachineError::OutOfBounds { address, len: self.cells.len() })
    }

    /// Read the cell at `address`.
    #[inline]
    pub fn read(&self, address: i64) -> Result<i64, MachineError> {
        let index = self.index(address)?;
        Ok(self.cells[index])
    }

    /// Write `value` to the cell at `address`.
    #[inline]
    pub fn write(&mut self, address: i64, value: i64) -> Result<(), MachineError> {
        let index = self.index(address)?;
        self.cells[index] = value;
        Ok(())
    }

    /// Read `count` consecutive cells starting at `start`.
    pub fn read_slice(&self, start: usize, count: usize) -> Result<&[i64], MachineError> {
        let end = start.saturating_add(count);
        if end > self.cells.len() {
            // Report the first address that is missing.
            let address = i64::try_from(start.max(self.cells.len())).unwrap_or(i64::MAX);
            return Err(MachineError::OutOfBounds { address, len: self.cells.len() });
        }
        Ok(&self.cells[start..end])
    }

    /// View all cells.
    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    /// Consume the memory, returning its cells.
    pub fn into_inner(self) -> Vec<i64> {
        self.cells
    }
}

impl From<Vec<i64>> for Memory {
    fn from(cells: Vec<i64>) -> Self {
        Self::new(cells)
    }
}
