//! Plain text listing of a model.

use crate::parser::{GcEvent, MemoryUsage, ParsedGcLog};
use crate::utils::config::KILOBYTE;
use crate::utils::error::OutputError;
use std::io::Write;

fn format_memory(memory: Option<MemoryUsage>) -> String {
    match memory {
        Some(m) => format!(
            "{}K->{}K({}K)",
            m.before / KILOBYTE,
            m.after / KILOBYTE,
            m.total / KILOBYTE
        ),
        None => String::new(),
    }
}

/// One event per line: timestamp, label, pause, memory
pub fn format_event(event: &GcEvent) -> String {
    let pause = event
        .pause()
        .map(|p| format!("{p:.7}s"))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{:>12.3}  {:<40} {:>12}  {}",
        event.timestamp(),
        event.gc_type().label(),
        pause,
        format_memory(event.memory())
    )
    .trim_end()
    .to_string()
}

/// Write the listing, the diagnostics and a one-line summary
pub fn write_model_text<W: Write>(parsed: &ParsedGcLog, mut writer: W) -> Result<(), OutputError> {
    for event in parsed.model.events() {
        writeln!(writer, "{}", format_event(event))?;
    }

    if !parsed.diagnostics.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Skipped lines:")?;
        for d in &parsed.diagnostics {
            writeln!(writer, "  line {:>6}: {} ({})", d.line_number, d.kind, d.line)?;
        }
    }

    writeln!(writer)?;
    writeln!(
        writer,
        "{} events, {} skipped lines",
        parsed.model.len(),
        parsed.diagnostics.len()
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    #[test]
    fn test_format_event() {
        let parsed = parse_str("2.0: [Full GC 16M->10M(32M), 0.0500 secs]\n").unwrap();
        let line = format_event(&parsed.model.events()[0]);

        assert!(line.contains("Full GC"));
        assert!(line.contains("0.0500000s"));
        assert!(line.ends_with("16384K->10240K(32768K)"));
    }

    #[test]
    fn test_concurrent_start_has_dash_pause() {
        let parsed = parse_str("0.4: [GC concurrent-mark-start]\n").unwrap();
        let line = format_event(&parsed.model.events()[0]);

        assert!(line.ends_with('-'));
    }

    #[test]
    fn test_summary_line() {
        let parsed = parse_str("0.5: [GC remark, 0.0011 secs]\nnonsense\n").unwrap();
        let mut buffer = Vec::new();
        write_model_text(&parsed, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Skipped lines:"));
        assert!(text.trim_end().ends_with("1 events, 1 skipped lines"));
    }
}
