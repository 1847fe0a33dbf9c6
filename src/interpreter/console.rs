//! Line-oriented input and output capabilities.
//!
//! These are the capabilities a machine uses when run standalone: one
//! integer per line in, one integer per line out. [`StdinInput`] and
//! [`StdoutOutput`] bind them to the process's standard streams.

use std::io::{self, BufRead, IsTerminal, Stdout, StdinLock, Write};

use super::traits::{InputSource, OutputSink};

/// Reads one integer per line from a buffered reader.
///
/// Lines that do not parse as an integer are logged and skipped. Once the
/// reader hits end-of-file every later call returns `None`.
#[derive(Debug)]
pub struct LineInput<R: BufRead> {
    reader: R,
    prompt: Option<String>,
    exhausted: bool,
}

/// Line input bound to standard input.
pub type StdinInput = LineInput<StdinLock<'static>>;

impl<R: BufRead> LineInput<R> {
    /// Create a reader without a prompt.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            prompt: None,
            exhausted: false,
        }
    }

    /// Print `prompt` to stderr before every read.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Check if the reader reached end-of-file.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl StdinInput {
    /// Read from standard input, prompting only when it is a terminal.
    pub fn stdin() -> Self {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        let input = Self::new(stdin.lock());
        if interactive {
            input.with_prompt("input> ")
        } else {
            input
        }
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn next_input(&mut self) -> Option<i64> {
        while !self.exhausted {
            if let Some(prompt) = &self.prompt {
                eprint!("{}", prompt);
                let _ = io::stderr().flush();
            }

            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => self.exhausted = true,
                Ok(_) => {
                    let text = line.trim();
                    match text.parse::<i64>() {
                        Ok(value) => return Some(value),
                        Err(e) => log::warn!("Ignoring input line {:?}: {}", text, e),
                    }
                }
                Err(e) => {
                    log::warn!("Failed to read input: {}", e);
                    self.exhausted = true;
                }
            }
        }
        None
    }
}

/// Writes one integer per line to a writer.
#[derive(Debug)]
pub struct LineOutput<W: Write> {
    writer: W,
}

/// Line output bound to standard output.
pub type StdoutOutput = LineOutput<Stdout>;

impl<W: Write> LineOutput<W> {
    /// Create a line writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl StdoutOutput {
    /// Write to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputSink for LineOutput<W> {
    fn emit_output(&mut self, value: i64) {
        if let Err(e) = writeln!(self.writer, "{}", value).and_then(|_| self.writer.flush()) {
            log::warn!("Failed to write output {}: {}", value, e);
        }
    }
}
