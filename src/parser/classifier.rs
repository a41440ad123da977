//! Decide what a complete logical line represents.
//!
//! Lines of the form `"0.295: [GC pause (young), 0.00594747 secs]"` are
//! matched structurally first. Under -XX:+PrintGCDetails a memory-pause
//! label in that form is always the header of a multi-line record.

use super::event::{ConcurrentEvent, DetailedPauseEvent, GcEvent, PauseEvent};
use super::extract::{parse_datestamp, parse_memory, parse_pause, parse_timestamp, parse_type};
use super::gc_type::{Concurrency, GcShape, GcType};
use crate::utils::config::{HEAP_SIZING_START, TIMES_MARKER};
use crate::utils::error::{ParseError, ParseErrorKind, ParsePosition};
use chrono::DateTime;
use log::trace;
use regex::Regex;
use std::sync::LazyLock;

static GC_PAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}[+-]\d{4}): )?",
        r"([0-9.]+)[: \[]{3}([A-Za-z\- ()]+)[, ]+([0-9.]+)[ sec\]]+$",
    ))
    .expect("valid gc pause regex")
});

const GC_DATESTAMP: usize = 1;
const GC_TIMESTAMP: usize = 2;
const GC_TYPE: usize = 3;
const GC_PAUSE_SECS: usize = 4;

/// What a logical line turned out to be
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    /// Complete one-line event
    Event(GcEvent),
    /// First line of a multi-line record; memory is filled in later
    DetailedHeader(DetailedPauseEvent),
    /// First line of a heap configuration dump
    HeapSummaryStart,
    /// " [Times: ...]" outside of a detailed record
    Trailer,
}

/// Classify one logical line
///
/// # Errors
/// Any [`ParseError`] from the generic parse, including unknown labels.
pub fn classify(line: &str, pos: &mut ParsePosition) -> Result<LineKind, ParseError> {
    if let Some(caps) = GC_PAUSE.captures(line) {
        match GcType::parse(&caps[GC_TYPE]) {
            Some(gc_type) if gc_type.shape() == GcShape::MemoryPause => {
                let datestamp = match caps.get(GC_DATESTAMP) {
                    Some(m) => Some(
                        DateTime::parse_from_str(m.as_str(), "%Y-%m-%dT%H:%M:%S%.3f%z")
                            .map_err(|_| {
                                ParseError::new(ParseErrorKind::InvalidTimestamp, line, pos)
                            })?,
                    ),
                    None => None,
                };
                let timestamp = caps[GC_TIMESTAMP].parse::<f64>().map_err(|_| {
                    ParseError::new(ParseErrorKind::InvalidTimestamp, line, pos)
                })?;
                let pause_literal = &caps[GC_PAUSE_SECS];
                let pause = pause_literal.parse::<f64>().map_err(|_| {
                    ParseError::new(
                        ParseErrorKind::InvalidNumber(pause_literal.to_string()),
                        line,
                        pos,
                    )
                })?;
                pos.index = line.len();

                return Ok(LineKind::DetailedHeader(DetailedPauseEvent {
                    timestamp,
                    datestamp,
                    gc_type,
                    pause,
                    memory: None,
                }));
            }
            // other shapes and unknown labels go through the generic parse
            _ => return parse_line(line, pos).map(LineKind::Event),
        }
    }

    if line.contains(HEAP_SIZING_START) {
        return Ok(LineKind::HeapSummaryStart);
    }
    if line.contains(TIMES_MARKER) {
        trace!("Ignoring trailer outside of a detailed event: {}", line);
        return Ok(LineKind::Trailer);
    }

    parse_line(line, pos).map(LineKind::Event)
}

/// Best-effort parse of a complete one-line event.
///
/// Reads timestamp and label, then whatever the label's shape reports:
/// nothing for concurrent start markers, a duration for concurrent ends,
/// an optional `before->after(total)` triple plus pause for memory pauses.
pub fn parse_line(line: &str, pos: &mut ParsePosition) -> Result<GcEvent, ParseError> {
    let datestamp = parse_datestamp(line, pos)?;
    let timestamp = parse_timestamp(line, pos)?;
    let gc_type = parse_type(line, pos)?;

    let event = match (gc_type.concurrency(), gc_type.shape()) {
        (Concurrency::Concurrent, GcShape::Simple) => GcEvent::Concurrent(ConcurrentEvent {
            timestamp,
            datestamp,
            gc_type,
            duration: None,
        }),
        (Concurrency::Concurrent, _) => GcEvent::Concurrent(ConcurrentEvent {
            timestamp,
            datestamp,
            gc_type,
            duration: Some(parse_pause(line, pos)?),
        }),
        (Concurrency::StopTheWorld, GcShape::MemoryPause) => {
            let memory = parse_memory(line, pos)?;
            GcEvent::Detailed(DetailedPauseEvent {
                timestamp,
                datestamp,
                gc_type,
                pause: parse_pause(line, pos)?,
                memory,
            })
        }
        (Concurrency::StopTheWorld, _) => GcEvent::Pause(PauseEvent {
            timestamp,
            datestamp,
            gc_type,
            pause: parse_pause(line, pos)?,
        }),
    };

    Ok(event)
}
