//! Repair lines where the JVM started a new record mid-line.
//!
//! The G1 writer in 1.6.0 sometimes interleaves a concurrent record into a
//! pause record that is still being written:
//!
//! - `"...)<ts>: [GC concurrent-..."`: the whole remainder is a complete
//!   concurrent record; the prefix continues on the next physical line.
//! - `"...)<ts>:  (initial-mark)..."` or `"...)<ts>: ,..."`: only the
//!   timestamp belongs to the concurrent record.
//! - `"...)<ts> (initial-mark)..."`: same, without the colon.
//!
//! The prefix may also end in `"Full GC"` instead of `')'`.

use log::{debug, trace};
use regex::Regex;
use std::sync::LazyLock;

static LINES_MIXED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(.*\)|.*Full GC)",
        r"([0-9.]+: \[.*|",
        r"([0-9.]+[: ]{2})( ?[(,].*)|",
        r"([0-9.]+)( \(.*))$",
    ))
    .expect("valid mixed line regex")
});

const PREFIX: usize = 1;
const INJECTED_RECORD: usize = 2;
const TS_WITH_COLON: usize = 3;
const REST_AFTER_COLON: usize = 4;
const TS_ONLY: usize = 5;
const REST_AFTER_TS: usize = 6;

/// Outcome of one reassembly cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reassembled {
    /// Complete logical line, ready for classification
    Line(String),
    /// Self-contained concurrent record found mid-line. The line's prefix
    /// is carried; nothing else is emitted this cycle.
    Injected(String),
}

/// Holds the fragment deferred to the next physical line
#[derive(Debug, Default)]
pub struct LineReassembler {
    carried: Option<String>,
}

impl LineReassembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn carried(&self) -> Option<&str> {
        self.carried.as_deref()
    }

    /// Turn a physical line into a logical one
    pub fn reassemble(&mut self, line: String) -> Reassembled {
        let Some(caps) = LINES_MIXED.captures(&line) else {
            return match self.carried.take() {
                Some(carried) => {
                    trace!("Prepending carried fragment '{}'", carried);
                    Reassembled::Line(carried + &line)
                }
                None => Reassembled::Line(line),
            };
        };

        let prefix = &caps[PREFIX];
        if let Some(carried) = &self.carried {
            debug!("Dropping carried fragment '{}' for a new mixed line", carried);
        }

        if let (Some(ts), Some(rest)) = (caps.get(TS_WITH_COLON), caps.get(REST_AFTER_COLON)) {
            trace!("Mixed line, timestamp '{}' belongs to next line", ts.as_str());
            self.carried = Some(ts.as_str().to_string());
            return Reassembled::Line(format!("{}{}", prefix, rest.as_str()));
        }

        if let (Some(ts), Some(rest)) = (caps.get(TS_ONLY), caps.get(REST_AFTER_TS)) {
            trace!("Mixed line, timestamp '{}' belongs to next line", ts.as_str());
            self.carried = Some(ts.as_str().to_string());
            return Reassembled::Line(format!("{}{}", prefix, rest.as_str()));
        }

        trace!("Mixed line, carrying '{}'", prefix);
        self.carried = Some(prefix.to_string());
        Reassembled::Injected(caps[INJECTED_RECORD].to_string())
    }

    /// Complete the carried fragment with `line` while a detailed event is
    /// being accumulated. Returns `None` when nothing was carried.
    pub fn complete_carried(&mut self, line: &str) -> Option<String> {
        self.carried.take().map(|carried| carried + line)
    }
}
