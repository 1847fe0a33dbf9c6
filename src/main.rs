//! intcode: run an Intcode program from the command line
//!
//! Input values are read from stdin (one per line) and outputs are printed
//! to stdout as the program produces them.

use std::env;

use anyhow::{bail, Context};
use intcode::config::Config;
use intcode::interpreter::{InputSource, Machine, OutputSink, RunStatus, SuspendReason};
use intcode::parser::load_program;

const USAGE: &str = "\
Usage: intcode <program> [options]

Options:
  --trace          Trace every instruction and memory write
  --start <N>      Start executing at pointer N
  --read <ADDR>    Print memory[ADDR] after the program halts (repeatable)
  --sample-config  Print a sample configuration file and exit
  -h, --help       Show this help";

/// Command-line options.
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    path: Option<String>,
    trace: bool,
    start_ptr: Option<usize>,
    reads: Vec<i64>,
    sample_config: bool,
    help: bool,
}

impl Options {
    /// Parse the arguments that follow the program name.
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut options = Self::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--trace" => options.trace = true,
                "--sample-config" => options.sample_config = true,
                "-h" | "--help" => options.help = true,
                "--start" => {
                    let value = iter.next().context("--start needs a value")?;
                    let ptr = value
                        .parse()
                        .with_context(|| format!("Invalid --start value {:?}", value))?;
                    options.start_ptr = Some(ptr);
                }
                "--read" => {
                    let value = iter.next().context("--read needs an address")?;
                    let address = value
                        .parse()
                        .with_context(|| format!("Invalid --read address {:?}", value))?;
                    options.reads.push(address);
                }
                other if other.starts_with('-') => bail!("Unknown option {}\n\n{}", other, USAGE),
                other => {
                    if options.path.is_some() {
                        bail!("Only one program may be given\n\n{}", USAGE);
                    }
                    options.path = Some(other.to_string());
                }
            }
        }

        Ok(options)
    }

    /// Settings given on the command line, as a config overlay.
    fn overrides(&self) -> Config {
        Config {
            start_ptr: self.start_ptr,
            trace: self.trace.then_some(true),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Before anything else, so config loading can report problems
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = Options::parse(&args)?;

    if options.help {
        println!("{}", USAGE);
        return Ok(());
    }
    if options.sample_config {
        print!("{}", Config::sample_config());
        return Ok(());
    }

    let path = match &options.path {
        Some(p) => p,
        None => bail!("No program given\n\n{}", USAGE),
    };

    let mut config = Config::get().clone();
    config.merge(options.overrides());

    let program = load_program(path)?;
    let machine_config = config.machine_config();
    log::debug!("Running {} with {:?}", path, machine_config);

    let mut machine = Machine::interactive(program, &machine_config);
    drive(&mut machine)?;

    log::debug!("Program halted after {} instructions", machine.instructions());

    for (address, value) in read_cells(&machine, &options.reads)? {
        println!("[{}] = {}", address, value);
    }

    Ok(())
}

/// Run `machine` to completion, resuming after every output.
///
/// The driver's input never refills once it reports nothing available, so
/// waiting for input is terminal here.
fn drive<I: InputSource, O: OutputSink>(machine: &mut Machine<I, O>) -> anyhow::Result<()> {
    loop {
        match machine.run()? {
            RunStatus::Halted => return Ok(()),
            RunStatus::Suspended(SuspendReason::ProducedOutput) => continue,
            RunStatus::Suspended(SuspendReason::AwaitingInput) => {
                bail!(
                    "Input exhausted: program is waiting for input at ptr {}",
                    machine.ptr()
                );
            }
        }
    }
}

/// Read the requested memory cells of a halted machine.
fn read_cells<I: InputSource, O: OutputSink>(
    machine: &Machine<I, O>,
    addresses: &[i64],
) -> anyhow::Result<Vec<(i64, i64)>> {
    addresses
        .iter()
        .map(|&address| {
            let value = machine
                .read(address)
                .with_context(|| format!("Cannot read address {}", address))?;
            Ok((address, value))
        })
        .collect()
}

/// Initialize logging.
///
/// `RUST_LOG` wins; otherwise only warnings are shown. Trace lines are let
/// through by default since they are only produced when tracing is enabled.
fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,intcode::trace=trace"),
    )
    .format_timestamp(None)
    .init();
}
