//! Catalog of collector phases known to the G1 details dialect.
//!
//! Every label is statically tied to whether the phase stops the
//! application and to which fields its log record carries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a phase pauses application threads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concurrency {
    StopTheWorld,
    Concurrent,
}

/// Fields a phase's record carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GcShape {
    /// timestamp and type only
    Simple,
    /// timestamp, type and duration
    Pause,
    /// timestamp, type, duration and before/after/total memory
    MemoryPause,
}

/// Collector phase label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GcType {
    YoungPause,
    PartialPause,
    MixedPause,
    YoungInitialMark,
    PartialInitialMark,
    YoungToSpaceOverflow,
    PartialToSpaceOverflow,
    YoungToSpaceExhausted,
    FullGc,
    Remark,
    Cleanup,
    ConcurrentMarkStart,
    ConcurrentMarkEnd,
    ConcurrentMarkAbort,
    ConcurrentMarkResetForOverflow,
    ConcurrentCountStart,
    ConcurrentCountEnd,
    ConcurrentCleanupStart,
    ConcurrentCleanupEnd,
    ConcurrentRootRegionScanStart,
    ConcurrentRootRegionScanEnd,
}

impl GcType {
    pub const ALL: &'static [GcType] = &[
        GcType::YoungPause,
        GcType::PartialPause,
        GcType::MixedPause,
        GcType::YoungInitialMark,
        GcType::PartialInitialMark,
        GcType::YoungToSpaceOverflow,
        GcType::PartialToSpaceOverflow,
        GcType::YoungToSpaceExhausted,
        GcType::FullGc,
        GcType::Remark,
        GcType::Cleanup,
        GcType::ConcurrentMarkStart,
        GcType::ConcurrentMarkEnd,
        GcType::ConcurrentMarkAbort,
        GcType::ConcurrentMarkResetForOverflow,
        GcType::ConcurrentCountStart,
        GcType::ConcurrentCountEnd,
        GcType::ConcurrentCleanupStart,
        GcType::ConcurrentCleanupEnd,
        GcType::ConcurrentRootRegionScanStart,
        GcType::ConcurrentRootRegionScanEnd,
    ];

    /// Label as written in the log
    pub fn label(self) -> &'static str {
        match self {
            GcType::YoungPause => "GC pause (young)",
            GcType::PartialPause => "GC pause (partial)",
            GcType::MixedPause => "GC pause (mixed)",
            GcType::YoungInitialMark => "GC pause (young) (initial-mark)",
            GcType::PartialInitialMark => "GC pause (partial) (initial-mark)",
            GcType::YoungToSpaceOverflow => "GC pause (young) (to-space overflow)",
            GcType::PartialToSpaceOverflow => "GC pause (partial) (to-space overflow)",
            GcType::YoungToSpaceExhausted => "GC pause (young) (to-space exhausted)",
            GcType::FullGc => "Full GC",
            GcType::Remark => "GC remark",
            GcType::Cleanup => "GC cleanup",
            GcType::ConcurrentMarkStart => "GC concurrent-mark-start",
            GcType::ConcurrentMarkEnd => "GC concurrent-mark-end",
            GcType::ConcurrentMarkAbort => "GC concurrent-mark-abort",
            GcType::ConcurrentMarkResetForOverflow => "GC concurrent-mark-reset-for-overflow",
            GcType::ConcurrentCountStart => "GC concurrent-count-start",
            GcType::ConcurrentCountEnd => "GC concurrent-count-end",
            GcType::ConcurrentCleanupStart => "GC concurrent-cleanup-start",
            GcType::ConcurrentCleanupEnd => "GC concurrent-cleanup-end",
            GcType::ConcurrentRootRegionScanStart => "GC concurrent-root-region-scan-start",
            GcType::ConcurrentRootRegionScanEnd => "GC concurrent-root-region-scan-end",
        }
    }

    pub fn concurrency(self) -> Concurrency {
        match self {
            GcType::ConcurrentMarkStart
            | GcType::ConcurrentMarkEnd
            | GcType::ConcurrentMarkAbort
            | GcType::ConcurrentMarkResetForOverflow
            | GcType::ConcurrentCountStart
            | GcType::ConcurrentCountEnd
            | GcType::ConcurrentCleanupStart
            | GcType::ConcurrentCleanupEnd
            | GcType::ConcurrentRootRegionScanStart
            | GcType::ConcurrentRootRegionScanEnd => Concurrency::Concurrent,
            _ => Concurrency::StopTheWorld,
        }
    }

    pub fn shape(self) -> GcShape {
        match self {
            GcType::Remark
            | GcType::ConcurrentMarkEnd
            | GcType::ConcurrentCountEnd
            | GcType::ConcurrentCleanupEnd
            | GcType::ConcurrentRootRegionScanEnd => GcShape::Pause,
            GcType::ConcurrentMarkStart
            | GcType::ConcurrentMarkAbort
            | GcType::ConcurrentMarkResetForOverflow
            | GcType::ConcurrentCountStart
            | GcType::ConcurrentCleanupStart
            | GcType::ConcurrentRootRegionScanStart => GcShape::Simple,
            _ => GcShape::MemoryPause,
        }
    }

    /// Exact lookup of a trimmed label
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.iter().copied().find(|t| t.label() == label)
    }

    /// Longest catalog label that `text` starts with, ending on a word boundary
    pub fn parse_prefix(text: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .filter(|t| {
                text.strip_prefix(t.label()).is_some_and(|rest| {
                    !rest
                        .chars()
                        .next()
                        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-')
                })
            })
            .max_by_key(|t| t.label().len())
    }
}

impl fmt::Display for GcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
