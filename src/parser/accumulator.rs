//! State machine for multi-line detailed pause records.
//!
//! ```text
//! 0.356: [GC pause (young), 0.00219944 secs]     <- header, opens the record
//!    [Parallel Time:   1.9 ms]                   <- ignored
//!    [ 4096K->3936K(16M)]                        <- region line, fills memory
//!  [Times: user=0.01 sys=0.00, real=0.00 secs]   <- trailer, seals the record
//! ```

use super::event::{DetailedPauseEvent, GcEvent};
use super::extract::parse_region_memory;
use crate::utils::config::TIMES_MARKER;
use crate::utils::error::{ParseError, ParseErrorKind, ParsePosition};
use log::{debug, trace};
use regex::Regex;
use std::sync::LazyLock;

/// "   [ 4096K->3936K(16M)]"
static REGION_MEMORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \[]{5}[0-9]+(?:\.[0-9]+)?[BKMG]").expect("valid region memory regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulatorState {
    Idle,
    InProgress,
}

#[derive(Debug, Default)]
pub struct DetailedEventAccumulator {
    in_progress: Option<DetailedPauseEvent>,
}

impl DetailedEventAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AccumulatorState {
        if self.in_progress.is_some() {
            AccumulatorState::InProgress
        } else {
            AccumulatorState::Idle
        }
    }

    /// Open a record from its header line
    pub fn begin(&mut self, header: DetailedPauseEvent) {
        if let Some(previous) = self.in_progress.replace(header) {
            debug!(
                "Discarding unterminated {} at {}",
                previous.gc_type, previous.timestamp
            );
        }
        trace!("Detailed event started");
    }

    /// Feed a line of the open record. Region lines update memory, the
    /// last one seen wins; everything else is ignored.
    pub fn accept(&mut self, line: &str, pos: &mut ParsePosition) -> Result<(), ParseError> {
        let Some(event) = self.in_progress.as_mut() else {
            return Ok(());
        };
        if !REGION_MEMORY.is_match(line) {
            return Ok(());
        }

        let usage = parse_region_memory(line, pos)?.ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::InvalidMemory(line.trim().to_string()),
                line,
                pos,
            )
        })?;
        if let Some(previous) = event.memory {
            if previous != usage {
                debug!(
                    "Region line at {} overrides memory of {} at {}",
                    pos.line_number, event.gc_type, event.timestamp
                );
            }
        }
        event.memory = Some(usage);

        Ok(())
    }

    /// Seal the open record if `line` carries the trailer marker
    pub fn seal_on_trailer(&mut self, line: &str) -> Option<GcEvent> {
        if !line.contains(TIMES_MARKER) {
            return None;
        }
        let event = self.in_progress.take()?;
        trace!("Detailed event sealed: {} at {}", event.gc_type, event.timestamp);
        Some(GcEvent::Detailed(event))
    }

    /// Drop an unterminated record at end of stream
    pub fn abandon(&mut self) -> Option<DetailedPauseEvent> {
        self.in_progress.take()
    }
}
