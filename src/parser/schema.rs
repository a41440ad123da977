//! Model handed to downstream consumers.
//!
//! Serialized as-is by the JSON renderer. Schema is versioned to allow
//! future evolution.

use super::event::GcEvent;
use crate::utils::error::ParseError;
use serde::Serialize;

/// Log dialect the events were read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// HotSpot `-Xloggc` output
    SunXLogGc,
}

/// Ordered sequence of sealed events
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GcModel {
    pub format: LogFormat,
    events: Vec<GcEvent>,
}

impl GcModel {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            events: Vec::new(),
        }
    }

    /// Add a sealed event, keeping timestamps non-decreasing.
    ///
    /// Reassembly can hand over an event older than the last one; it is
    /// placed after every event whose timestamp is not greater than its own.
    pub fn add(&mut self, event: GcEvent) {
        let ts = event.timestamp();
        let at = self.events.partition_point(|e| e.timestamp() <= ts);
        self.events.insert(at, event);
    }

    pub fn events(&self) -> &[GcEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Result of one read: the model plus every per-line failure that was skipped
#[derive(Debug, Clone)]
pub struct ParsedGcLog {
    pub model: GcModel,
    pub diagnostics: Vec<ParseError>,
}
