//! Command-line interface for multitick
//!
//! Reads a program tree serialized by a host toolchain, rewrites every over-delimited
//! literal in it, and prints the result.
//!
//! Usage:
//!   multitick rewrite `<path>` [--to json|yaml] [--compact]   - Print the rewritten program
//!   multitick check `<path>`                                  - List malformed literals

use clap::{Parser, Subcommand, ValueEnum};
use multitick_config::{Loader, MultitickConfig};
use multitick_transform::multitick::loader::{ProgramLoader, SourceFormat};
use multitick_transform::multitick::transforms::stages::SerializeProgram;
use multitick_transform::multitick::transforms::Runnable;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "multitick", version, about = "Rewrite over-delimited template literals")]
struct Cli {
    /// Configuration file layered over the built-in defaults
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Read the input as this format instead of guessing from the extension
    #[arg(long, global = true)]
    from: Option<Format>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the program with every over-delimited literal rewritten
    Rewrite {
        /// Path to the serialized program
        path: PathBuf,
        /// Output format
        #[arg(long)]
        to: Option<Format>,
        /// Emit compact JSON
        #[arg(long)]
        compact: bool,
    },
    /// Report malformed over-delimited literals without rewriting
    Check {
        /// Path to the serialized program
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

impl From<Format> for SourceFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => SourceFormat::Json,
            Format::Yaml => SourceFormat::Yaml,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let result = match &cli.command {
        Command::Rewrite { path, to, compact } => {
            handle_rewrite_command(&config, path, cli.from, *to, *compact)
        }
        Command::Check { path } => handle_check_command(&config, path, cli.from),
    };

    match result {
        Ok(code) => code,
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("MULTITICK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<MultitickConfig, String> {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    loader.build().map_err(|e| e.to_string())
}

fn open(
    config: &MultitickConfig,
    path: &Path,
    from: Option<Format>,
) -> Result<ProgramLoader, String> {
    let format = match from {
        Some(format) => format.into(),
        None => config.input.format.resolve(path),
    };
    let loader = ProgramLoader::from_path(path).map_err(|e| e.to_string())?;
    Ok(loader.with_format(format))
}

/// Handle the rewrite command
fn handle_rewrite_command(
    config: &MultitickConfig,
    path: &Path,
    from: Option<Format>,
    to: Option<Format>,
    compact: bool,
) -> Result<ExitCode, String> {
    let program = open(config, path, from)?
        .rewrite()
        .map_err(|e| e.to_string())?;

    let format = to.map(SourceFormat::from).unwrap_or(config.output.format);
    let pretty = config.output.pretty && !compact;
    let output = SerializeProgram::new(format, pretty)
        .run(program)
        .map_err(|e| e.to_string())?;

    println!("{}", output.trim_end());
    Ok(ExitCode::SUCCESS)
}

/// Handle the check command
fn handle_check_command(
    config: &MultitickConfig,
    path: &Path,
    from: Option<Format>,
) -> Result<ExitCode, String> {
    let diagnostics = open(config, path, from)?
        .diagnose()
        .map_err(|e| e.to_string())?;

    if diagnostics.is_empty() {
        println!("{}: no malformed literals", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let limit = config.check.limit().unwrap_or(diagnostics.len());
    for diagnostic in diagnostics.iter().take(limit) {
        println!("{}: {}", path.display(), diagnostic);
    }
    if diagnostics.len() > limit {
        println!("... and {} more", diagnostics.len() - limit);
    }
    Ok(ExitCode::FAILURE)
}
