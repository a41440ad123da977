//! Sealed collection event records.
//!
//! One variant per record kind the reader produces. An event reaches the
//! model only once every field it carries has been parsed.

use super::gc_type::{Concurrency, GcType};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Heap occupancy around a collection, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryUsage {
    pub before: u64,
    pub after: u64,
    /// Committed capacity (the parenthesized value)
    pub total: u64,
}

/// Phase running alongside the application
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcurrentEvent {
    pub timestamp: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datestamp: Option<DateTime<FixedOffset>>,
    pub gc_type: GcType,
    /// Absent for `*-start` markers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// One-line stop-the-world pause without memory figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PauseEvent {
    pub timestamp: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datestamp: Option<DateTime<FixedOffset>>,
    pub gc_type: GcType,
    pub pause: f64,
}

/// Stop-the-world pause with memory figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedPauseEvent {
    pub timestamp: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datestamp: Option<DateTime<FixedOffset>>,
    pub gc_type: GcType,
    pub pause: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryUsage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GcEvent {
    Concurrent(ConcurrentEvent),
    Pause(PauseEvent),
    Detailed(DetailedPauseEvent),
}

impl GcEvent {
    pub fn timestamp(&self) -> f64 {
        match self {
            GcEvent::Concurrent(e) => e.timestamp,
            GcEvent::Pause(e) => e.timestamp,
            GcEvent::Detailed(e) => e.timestamp,
        }
    }

    pub fn datestamp(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            GcEvent::Concurrent(e) => e.datestamp,
            GcEvent::Pause(e) => e.datestamp,
            GcEvent::Detailed(e) => e.datestamp,
        }
    }

    pub fn gc_type(&self) -> GcType {
        match self {
            GcEvent::Concurrent(e) => e.gc_type,
            GcEvent::Pause(e) => e.gc_type,
            GcEvent::Detailed(e) => e.gc_type,
        }
    }

    pub fn concurrency(&self) -> Concurrency {
        self.gc_type().concurrency()
    }

    /// Stop-the-world pause, or the reported duration of a concurrent phase
    pub fn pause(&self) -> Option<f64> {
        match self {
            GcEvent::Concurrent(e) => e.duration,
            GcEvent::Pause(e) => Some(e.pause),
            GcEvent::Detailed(e) => Some(e.pause),
        }
    }

    pub fn memory(&self) -> Option<MemoryUsage> {
        match self {
            GcEvent::Detailed(e) => e.memory,
            _ => None,
        }
    }
}
