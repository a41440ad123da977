//! Parse command implementation.
//!
//! The parse command:
//! 1. Reads the G1 log into an event model
//! 2. Renders the model on stdout
//! 3. Reports skipped lines

use super::models::{OutputFormat, ParseArgs};
use crate::output::{write_model_json, write_model_text};
use crate::parser::{read_file, ParsedGcLog};
use crate::utils::error::ReadError;
use anyhow::{Context, Result};
use log::{info, warn};
use std::io::{self, Write};
use std::time::Instant;

/// Execute the parse command, rendering to stdout
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Input file cannot be opened or read
/// * Output cannot be written
/// * `--strict` and at least one line was skipped
pub fn execute_parse(args: &ParseArgs) -> Result<()> {
    let stdout = io::stdout();
    execute_parse_to(args, stdout.lock())
}

/// Execute the parse command against any writer
pub fn execute_parse_to<W: Write>(args: &ParseArgs, mut writer: W) -> Result<()> {
    let start_time = Instant::now();

    info!("Parsing GC log: {}", args.input.display());

    let parsed = match read_file(&args.input) {
        Ok(parsed) => parsed,
        Err(err @ ReadError::Io { .. }) => {
            // render what was read before the failure, then surface it
            let message = err.to_string();
            if let Some(partial) = err.into_partial() {
                render(&partial, args.format, &mut writer)?;
            }
            anyhow::bail!("{message}");
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read {}", args.input.display()))
        }
    };

    render(&parsed, args.format, &mut writer)?;

    info!(
        "Parsed {} events in {:.2}s",
        parsed.model.len(),
        start_time.elapsed().as_secs_f64()
    );

    if !parsed.diagnostics.is_empty() {
        warn!("{} lines could not be parsed", parsed.diagnostics.len());
        if args.strict {
            anyhow::bail!(
                "{} lines could not be parsed (--strict)",
                parsed.diagnostics.len()
            );
        }
    }

    Ok(())
}

fn render<W: Write>(parsed: &ParsedGcLog, format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Text => write_model_text(parsed, writer).context("Failed to write text output"),
        OutputFormat::Json => write_model_json(parsed, writer).context("Failed to write JSON output"),
    }
}

/// Validate parse arguments
///
/// **Public** - can be called before execute_parse for early validation
pub fn validate_args(args: &ParseArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.input.is_dir() {
        anyhow::bail!("Input path is a directory: {}", args.input.display());
    }

    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    Ok(())
}
