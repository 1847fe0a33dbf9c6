//! Program parsers.
//!
//! - [`program`] - Comma-separated Intcode program text

pub mod program;

pub use program::{load_program, parse_program};
