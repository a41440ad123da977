//! GC Trace Studio CLI
//!
//! Reads HotSpot G1 logs written with -XX:+PrintGCDetails and prints the
//! ordered collection events they contain.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use gc_trace_studio::commands::{
    display_types, display_version, execute_parse, validate_args, OutputFormat, ParseArgs,
};

/// GC Trace Studio - G1 log reader
#[derive(Parser, Debug)]
#[command(name = "gc-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a G1 log into collection events
    Parse {
        /// Path to the GC log
        #[arg(short, long, env = "GC_TRACE_FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Exit with an error when any line could not be parsed
        #[arg(long)]
        strict: bool,
    },

    /// List the collector phases the reader recognizes
    Types {
        /// Show concurrency and shape of each phase
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Parse {
            file,
            format,
            strict,
        } => {
            let args = ParseArgs {
                input: file,
                format,
                strict,
            };

            // Validate args first
            validate_args(&args)?;

            execute_parse(&args)?;
        }

        Commands::Types { show } => {
            display_types(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
