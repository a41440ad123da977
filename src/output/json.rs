//! JSON model writer.
//!
//! Serializes a read result to any writer with pretty formatting.

use crate::parser::{GcEvent, LogFormat, ParsedGcLog};
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::debug;
use serde::Serialize;
use std::io::Write;

/// Top-level JSON document
#[derive(Debug, Serialize)]
struct ModelDocument<'a> {
    version: &'static str,
    format: LogFormat,
    events: &'a [GcEvent],
    diagnostics: Vec<DiagnosticEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct DiagnosticEntry<'a> {
    line_number: usize,
    offset: usize,
    message: String,
    line: &'a str,
}

fn document(parsed: &ParsedGcLog) -> ModelDocument<'_> {
    ModelDocument {
        version: SCHEMA_VERSION,
        format: parsed.model.format,
        events: parsed.model.events(),
        diagnostics: parsed
            .diagnostics
            .iter()
            .map(|d| DiagnosticEntry {
                line_number: d.line_number,
                offset: d.offset,
                message: d.kind.to_string(),
                line: &d.line,
            })
            .collect(),
    }
}

/// Write the model and its diagnostics as pretty JSON
///
/// # Errors
/// * `OutputError::SerializationFailed` - JSON serialization or write error
/// * `OutputError::WriteFailed` - trailing newline could not be written
pub fn write_model_json<W: Write>(parsed: &ParsedGcLog, mut writer: W) -> Result<(), OutputError> {
    debug!("Serializing {} events as JSON", parsed.model.len());

    serde_json::to_writer_pretty(&mut writer, &document(parsed))?;
    writeln!(writer)?;

    Ok(())
}

/// Model as a JSON string (for testing or in-memory use)
pub fn model_to_string(parsed: &ParsedGcLog) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(&document(parsed))?)
}
