//! G1 log parsing and model definitions.
//!
//! This module handles:
//! - Repairing lines the JVM wrote into each other
//! - Classifying logical lines and extracting their fields
//! - Accumulating multi-line detailed pause records
//! - Skipping heap configuration dumps
//! - Assembling the ordered event model

pub mod accumulator;
pub mod classifier;
pub mod event;
pub mod extract;
pub mod g1_reader;
pub mod gc_type;
pub mod heap_summary;
pub mod reassembler;
pub mod schema;

// Re-export main types
pub use event::{ConcurrentEvent, DetailedPauseEvent, GcEvent, MemoryUsage, PauseEvent};
pub use g1_reader::{parse_str, read_file, G1DetailsReader};
pub use gc_type::{Concurrency, GcShape, GcType};
pub use schema::{GcModel, LogFormat, ParsedGcLog};
