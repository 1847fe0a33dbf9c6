//! intcode library
//!
//! A suspendable interpreter for the Intcode instruction set.

pub mod config;
pub mod interpreter;
pub mod parser;
