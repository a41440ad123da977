//! Configuration and constants for the G1 details dialect.

/// Current JSON output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Closes a detailed event: " [Times: user=0.01 sys=0.00, real=0.01 secs]"
pub const TIMES_MARKER: &str = "[Times";

/// Starts a heap configuration dump ("Heap", "{Heap before GC ...")
pub const HEAP_SIZING_START: &str = "Heap";

/// Fragments that belong to a heap configuration dump
pub const HEAP_SUMMARY_MARKERS: &[&str] = &[
    "garbage-first heap",
    "region size",
    "compacting perm gen",
    "the space",
    "No shared spaces configured.",
    "}",
];

// Memory literals are 1024-based
pub const KILOBYTE: u64 = 1024;
pub const MEGABYTE: u64 = 1024 * KILOBYTE;
pub const GIGABYTE: u64 = 1024 * MEGABYTE;
