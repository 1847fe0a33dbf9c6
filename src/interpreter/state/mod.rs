//! Machine state.
//!
//! | Piece | Purpose |
//! |-------|---------|
//! | [`Memory`] | Fixed-length integer array holding code and data |
//! | [`ExecutionContext`] | Memory plus instruction pointer and counters |
//!
//! # Example
//!
//! ```
//! use intcode::interpreter::state::{ExecutionContext, Memory};
//!
//! let mut ctx = ExecutionContext::new(Memory::new(vec![1, 0, 0, 0, 99]), 0);
//! ctx.memory.write(0, 2).unwrap();
//! ctx.set_ptr(4);
//! assert_eq!(ctx.fetch().unwrap(), 99);
//! ```

mod context;
mod memory;

pub use context::ExecutionContext;
pub use memory::Memory;
