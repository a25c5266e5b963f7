//! 16-bit Pipelined CPU Simulator CLI.
//!
//! The main executable for the simulator. It handles command-line argument
//! parsing, configuration, program loading and the main simulation loop.
//!
//! # Usage
//!
//! ```text
//! cpu16-emulator program.hex [--config cfg.toml] [--trace] [--regs]
//! cpu16-emulator --dump-table
//! cpu16-emulator --dump-rom
//! ```

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::{error, info, LevelFilter, Log, Metadata, Record};

use cpu16_emulator::common::error::SimError;
use cpu16_emulator::config::Config;
use cpu16_emulator::core::control::ControlWordTableBuilder;
use cpu16_emulator::core::Cpu;
use cpu16_emulator::sim::loader;
use cpu16_emulator::soc::Ram;

/// Command-line arguments for the simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "16-bit Pipelined CPU Cycle-Accurate Simulator")]
struct Args {
    /// Program image (.hex/.txt text or raw big-endian binary).
    program: Option<PathBuf>,

    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides `general.max_cycles`.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Trace every pipeline stage to stderr.
    #[arg(short, long)]
    trace: bool,

    /// Print the decode table as JSON and exit.
    #[arg(long)]
    dump_table: bool,

    /// Print the decoder ROM image as hex words and exit.
    #[arg(long)]
    dump_rom: bool,

    /// Print registers and flags after the run.
    #[arg(long)]
    regs: bool,
}

/// Minimal stderr logger.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(trace: bool) {
    let level = if trace || cfg!(feature = "always-trace") {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn run(args: Args) -> Result<i32, SimError> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if config.general.trace_instructions {
        log::set_max_level(LevelFilter::Trace);
    }

    if args.dump_table {
        let table = ControlWordTableBuilder::generate();
        let json = serde_json::to_string_pretty(&table.entries())?;
        println!("{}", json);
        return Ok(0);
    }

    if args.dump_rom {
        let table = ControlWordTableBuilder::generate();
        for (i, word) in table.rom_image().iter().enumerate() {
            println!("{:03x}: {:06x}", i, word);
        }
        return Ok(0);
    }

    let Some(path) = args.program else {
        eprintln!("Error: No program specified.");
        eprintln!("Usage: cpu16-emulator <program.hex> [--config <file.toml>]");
        return Ok(1);
    };

    let program = loader::load_program(&path)?;
    let mut ram = Ram::new(config.memory.data_words_val()?);
    if let Some(image) = &config.memory.data_image {
        let data = loader::load_program(Path::new(image))?;
        ram.load_words(&data, 0);
    }

    info!("loaded {} words from {}", program.len(), path.display());
    let mut cpu = Cpu::with_config(program, ram, &config);
    let max_cycles = args.max_cycles.unwrap_or(config.general.max_cycles);

    let result = cpu.run(max_cycles);
    if args.regs {
        cpu.dump_state();
    }
    cpu.stats.print();
    result.map(|_| 0)
}

/// Main entry point for the simulator.
///
/// Exits with status 0 when the program halts, 1 on any error, including a
/// program that runs past the cycle limit.
fn main() {
    let args = Args::parse();
    init_logging(args.trace);
    match run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
