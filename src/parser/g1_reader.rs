//! Stream driver for Sun 1.6.x G1 logs written with -XX:+PrintGCDetails.
//!
//! Reads one physical line at a time, repairs mixed lines, classifies the
//! result or feeds it to the open detailed record, and isolates per-line
//! failures so a malformed line never ends the run.

use super::accumulator::{AccumulatorState, DetailedEventAccumulator};
use super::classifier::{classify, parse_line, LineKind};
use super::heap_summary::skip_heap_summary;
use super::reassembler::{LineReassembler, Reassembled};
use super::schema::{GcModel, LogFormat, ParsedGcLog};
use crate::utils::error::{ParseError, ParsePosition, ReadError};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::iter::Peekable;
use std::path::Path;

/// Physical lines, decoded lossily and stripped of `"\n"` / `"\r\n"`
pub struct LossyLines<R> {
    inner: io::Split<R>,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: reader.split(b'\n'),
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|bytes| {
            bytes.map(|mut bytes| {
                if bytes.last() == Some(&b'\r') {
                    bytes.pop();
                }
                String::from_utf8_lossy(&bytes).into_owned()
            })
        })
    }
}

/// What the driver must do after a line was handled
enum LineOutcome {
    Done,
    SkipHeapSummary,
}

/// Reader session: line source plus all state carried between lines
pub struct G1DetailsReader<R: BufRead> {
    lines: Peekable<LossyLines<R>>,
    pos: ParsePosition,
    reassembler: LineReassembler,
    accumulator: DetailedEventAccumulator,
    model: GcModel,
    diagnostics: Vec<ParseError>,
}

impl<R: BufRead> G1DetailsReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: LossyLines::new(reader).peekable(),
            pos: ParsePosition::default(),
            reassembler: LineReassembler::new(),
            accumulator: DetailedEventAccumulator::new(),
            model: GcModel::new(LogFormat::SunXLogGc),
            diagnostics: Vec::new(),
        }
    }

    /// Read the whole stream
    ///
    /// # Errors
    /// * `ReadError::Io` - the line source failed; carries everything read so far
    pub fn read(mut self) -> Result<ParsedGcLog, ReadError> {
        info!("Reading Sun 1.6.x G1 format...");

        while let Some(next) = self.lines.next() {
            self.pos.line_number += 1;
            self.pos.index = 0;

            let line = match next {
                Ok(line) => line,
                Err(source) => return Err(self.io_failure(source)),
            };
            if line.trim().is_empty() {
                continue;
            }

            match self.process_line(line) {
                Ok(LineOutcome::Done) => {}
                Ok(LineOutcome::SkipHeapSummary) => {
                    match skip_heap_summary(&mut self.lines, &mut self.pos) {
                        Ok(skipped) => debug!(
                            "Skipped heap summary ({} lines) ending at line {}",
                            skipped, self.pos.line_number
                        ),
                        Err(source) => return Err(self.io_failure(source)),
                    }
                }
                Err(e) => {
                    warn!("{}", e);
                    debug!("{:?}", e);
                    self.diagnostics.push(e);
                }
            }
        }

        Ok(self.finish())
    }

    fn process_line(&mut self, line: String) -> Result<LineOutcome, ParseError> {
        let line = if self.accumulator.state() == AccumulatorState::Idle {
            let line = match self.reassembler.reassemble(line) {
                Reassembled::Injected(record) => {
                    // rest of the interrupted record follows on the next line
                    let event = parse_line(&record, &mut self.pos)?;
                    self.model.add(event);
                    return Ok(LineOutcome::Done);
                }
                Reassembled::Line(line) => line,
            };

            match classify(&line, &mut self.pos)? {
                LineKind::DetailedHeader(header) => {
                    debug!(
                        "Line {}: {} at {} opens a detailed event",
                        self.pos.line_number, header.gc_type, header.timestamp
                    );
                    self.accumulator.begin(header);
                }
                LineKind::Event(event) => self.model.add(event),
                LineKind::HeapSummaryStart => return Ok(LineOutcome::SkipHeapSummary),
                LineKind::Trailer => {}
            }
            line
        } else if let Some(joined) = self.reassembler.complete_carried(&line) {
            // concurrent record split around the detailed event's header
            let event = parse_line(&joined, &mut self.pos)?;
            self.model.add(event);
            joined
        } else {
            self.accumulator.accept(&line, &mut self.pos)?;
            line
        };

        if let Some(event) = self.accumulator.seal_on_trailer(&line) {
            self.model.add(event);
        }

        Ok(LineOutcome::Done)
    }

    fn io_failure(self, source: io::Error) -> ReadError {
        let line_number = self.pos.line_number;
        warn!("Read failed at line {}: {}", line_number, source);
        ReadError::Io {
            line_number,
            source,
            partial: Box::new(self.finish()),
        }
    }

    fn finish(mut self) -> ParsedGcLog {
        if let Some(open) = self.accumulator.abandon() {
            debug!(
                "Dropping unterminated {} at {} at end of stream",
                open.gc_type, open.timestamp
            );
        }
        info!("Done reading.");

        ParsedGcLog {
            model: self.model,
            diagnostics: self.diagnostics,
        }
    }
}

/// Read a log file. The file is closed on every exit path.
///
/// # Errors
/// * `ReadError::Open` - file cannot be opened
/// * `ReadError::Io` - reading failed part-way
pub fn read_file(path: impl AsRef<Path>) -> Result<ParsedGcLog, ReadError> {
    let path = path.as_ref();
    debug!("Opening GC log: {}", path.display());

    let file = File::open(path).map_err(|source| ReadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    G1DetailsReader::new(BufReader::new(file)).read()
}

/// Read a log held in memory
pub fn parse_str(text: &str) -> Result<ParsedGcLog, ReadError> {
    G1DetailsReader::new(text.as_bytes()).read()
}
