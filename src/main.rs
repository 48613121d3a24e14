//! Command-line front end: load a file, run one codec pass, write the
//! result. Argument errors exit with clap's native status 2; the remaining
//! failure categories each map to their own status below.

#[macro_use]
extern crate log;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use byterle::{decode, encode, RleError};
use clap::{Parser, ValueEnum};
use thiserror::Error;

/// Some file (input/output) could not be read or written.
const EXIT_FAILURE_FILE: u8 = 3;
/// The program was unable to allocate necessary memory.
const EXIT_FAILURE_MEMORY: u8 = 4;
/// The codec rejected the input.
const EXIT_RLE_ERROR: u8 = 5;

/// Run-length encode or decode a file.
#[derive(Parser, Debug)]
#[command(name = "byterle", version, about)]
struct Cli {
    /// Path to the input file.
    input: PathBuf,

    /// Action to perform on the input.
    #[arg(value_enum)]
    mode: Mode,

    /// Path to the output file.
    output: PathBuf,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode {
    /// Encode the input file.
    #[value(alias = "e")]
    Encode,

    /// Decode the input file.
    #[value(alias = "d")]
    Decode,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("cannot read {}: {source}", .path.display())]
    ReadInput { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", .path.display())]
    WriteOutput { path: PathBuf, source: io::Error },

    #[error("error while {verb}: {source}")]
    Codec { verb: &'static str, source: RleError },
}

impl AppError {
    fn exit_code(&self) -> ExitCode {
        let code = match self {
            AppError::ReadInput { .. } | AppError::WriteOutput { .. } => EXIT_FAILURE_FILE,
            AppError::Codec {
                source: RleError::AllocationFailure { .. },
                ..
            } => EXIT_FAILURE_MEMORY,
            AppError::Codec { .. } => EXIT_RLE_ERROR,
        };
        ExitCode::from(code)
    }
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            err.exit_code()
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let input = fs::read(&cli.input).map_err(|source| AppError::ReadInput {
        path: cli.input.clone(),
        source,
    })?;
    debug!("loaded {} byte(s) from {}", input.len(), cli.input.display());

    let (verb, done) = match cli.mode {
        Mode::Encode => ("encoding", "Encode"),
        Mode::Decode => ("decoding", "Decode"),
    };
    let result = match cli.mode {
        Mode::Encode => encode(&input),
        Mode::Decode => decode(&input),
    }
    .map_err(|source| AppError::Codec { verb, source })?;

    fs::write(&cli.output, &result).map_err(|source| AppError::WriteOutput {
        path: cli.output.clone(),
        source,
    })?;
    debug!("wrote {} byte(s) to {}", result.len(), cli.output.display());

    println!("{done} done");
    // an empty result (empty input) has no meaningful ratio
    if !result.is_empty() {
        println!(
            "Compression ratio: {:.3}",
            input.len() as f64 / result.len() as f64
        );
    }
    Ok(())
}
