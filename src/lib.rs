//! GC Trace Studio
//!
//! Turns HotSpot G1 garbage collection logs written with
//! `-XX:+PrintGCDetails` into an ordered sequence of typed collection
//! events, ready for aggregation and charting.
//!
//! This crate provides the core implementation for the
//! `gc-trace` CLI tool.
//!
//! ## Getting Started
//!
//! ```no_run
//! let parsed = gc_trace_studio::parser::read_file("gc.log")?;
//! for event in parsed.model.events() {
//!     println!("{} {}", event.timestamp(), event.gc_type());
//! }
//! # Ok::<(), gc_trace_studio::utils::ReadError>(())
//! ```

pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
