//! Intcode program text parser.
//!
//! A program is a list of signed integers separated by commas. Whitespace
//! (including the trailing newline of a puzzle input file) is ignored.
//!
//! ```text
//! 1,9,10,3,
//! 2,3,11,0,
//! 99,
//! 30,40,50
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};

/// Parse program text into memory cells.
pub fn parse_program(text: &str) -> Result<Vec<i64>> {
    let mut cells = Vec::new();

    for (index, field) in text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .enumerate()
    {
        let value = field
            .parse::<i64>()
            .with_context(|| format!("Invalid integer {:?} at position {}", field, index))?;
        cells.push(value);
    }

    if cells.is_empty() {
        bail!("Program is empty");
    }

    Ok(cells)
}

/// Read and parse a program file.
pub fn load_program(path: impl AsRef<Path>) -> Result<Vec<i64>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read program {}", path.display()))?;
    let program = parse_program(&text)
        .with_context(|| format!("Failed to parse program {}", path.display()))?;

    log::debug!("Loaded {} cells from {}", program.len(), path.display());
    Ok(program)
}
