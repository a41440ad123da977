//! Field extractors for a single logical line.
//!
//! Each extractor starts at `pos.index`, advances it past what it consumed
//! and fails with a [`ParseError`] carrying the position it reached.

use super::event::MemoryUsage;
use super::gc_type::GcType;
use crate::utils::config::{GIGABYTE, KILOBYTE, MEGABYTE};
use crate::utils::error::{ParseError, ParseErrorKind, ParsePosition};
use chrono::{DateTime, FixedOffset};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// "2012-04-18T14:23:59.890+0200" from -XX:+PrintGCDateStamps
static DATESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}[+-]\d{4}").expect("valid datestamp regex")
});

/// "0.00219944 secs" / "0.0011 sec"
static PAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?(?:[eE][-+]?[0-9]+)?)\s*secs?\b").expect("valid pause regex")
});

/// "4096K->3936K(16M)"
static MEMORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([0-9]+(?:\.[0-9]+)?)([BKMG])->([0-9]+(?:\.[0-9]+)?)([BKMG])\(([0-9]+(?:\.[0-9]+)?)([BKMG])\)",
    )
    .expect("valid memory regex")
});

const DATESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

fn rest<'a>(line: &'a str, pos: &ParsePosition) -> &'a str {
    line.get(pos.index..).unwrap_or("")
}

/// Advance past whitespace and the given separator characters
fn skip_chars(line: &str, pos: &mut ParsePosition, chars: &[char]) {
    let skipped: usize = rest(line, pos)
        .chars()
        .take_while(|c| c.is_whitespace() || chars.contains(c))
        .map(char::len_utf8)
        .sum();
    pos.index += skipped;
}

/// Parse an optional leading datestamp and the `": "` after it
pub fn parse_datestamp(
    line: &str,
    pos: &mut ParsePosition,
) -> Result<Option<DateTime<FixedOffset>>, ParseError> {
    skip_chars(line, pos, &[]);
    let Some(m) = DATESTAMP.find(rest(line, pos)) else {
        return Ok(None);
    };

    let datestamp = DateTime::parse_from_str(m.as_str(), DATESTAMP_FORMAT)
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidTimestamp, line, pos))?;
    pos.index += m.end();
    skip_chars(line, pos, &[':']);

    Ok(Some(datestamp))
}

/// Parse the uptime timestamp in seconds and the `':'` after it
pub fn parse_timestamp(line: &str, pos: &mut ParsePosition) -> Result<f64, ParseError> {
    skip_chars(line, pos, &[]);
    let literal: &str = {
        let text = rest(line, pos);
        let len = text
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(text.len());
        &text[..len]
    };

    let timestamp = literal
        .parse::<f64>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidTimestamp, line, pos))?;
    pos.index += literal.len();

    if rest(line, pos).starts_with(':') {
        pos.index += 1;
    }

    Ok(timestamp)
}

/// Parse the collector phase label, skipping a leading `'['`
pub fn parse_type(line: &str, pos: &mut ParsePosition) -> Result<GcType, ParseError> {
    skip_chars(line, pos, &['[']);
    let text = rest(line, pos);

    if let Some(gc_type) = GcType::parse_prefix(text) {
        pos.index += gc_type.label().len();
        return Ok(gc_type);
    }

    let token = text
        .split([',', ']'])
        .next()
        .unwrap_or_default()
        .trim();
    let kind = if token.is_empty() {
        ParseErrorKind::Unrecognized
    } else {
        ParseErrorKind::UnknownType(token.to_string())
    };

    Err(ParseError::new(kind, line, pos))
}

/// Parse the next `"<seconds> secs"` literal
pub fn parse_pause(line: &str, pos: &mut ParsePosition) -> Result<f64, ParseError> {
    let caps = PAUSE
        .captures(rest(line, pos))
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingPause, line, pos))?;
    let literal = &caps[1];

    let pause = literal.parse::<f64>().map_err(|_| {
        ParseError::new(ParseErrorKind::InvalidNumber(literal.to_string()), line, pos)
    })?;
    if let Some(m) = caps.get(0) {
        pos.index += m.end();
    }

    Ok(pause)
}

/// Normalize `<value><unit>` to bytes
pub fn memory_size(value: &str, unit: &str) -> Result<u64, ParseErrorKind> {
    let multiplier = match unit {
        "B" => 1,
        "K" => KILOBYTE,
        "M" => MEGABYTE,
        "G" => GIGABYTE,
        _ => return Err(ParseErrorKind::InvalidMemory(format!("{value}{unit}"))),
    };

    if let Ok(whole) = value.parse::<u64>() {
        return whole
            .checked_mul(multiplier)
            .ok_or_else(|| ParseErrorKind::InvalidMemory(format!("{value}{unit}")));
    }

    match value.parse::<f64>() {
        Ok(fraction) if fraction.is_finite() && fraction >= 0.0 => {
            Ok((fraction * multiplier as f64).round() as u64)
        }
        _ => Err(ParseErrorKind::InvalidMemory(format!("{value}{unit}"))),
    }
}

fn usage_from(caps: &Captures<'_>) -> Result<MemoryUsage, ParseErrorKind> {
    Ok(MemoryUsage {
        before: memory_size(&caps[1], &caps[2])?,
        after: memory_size(&caps[3], &caps[4])?,
        total: memory_size(&caps[5], &caps[6])?,
    })
}

/// Parse the next `before->after(total)` triple, if there is one
pub fn parse_memory(
    line: &str,
    pos: &mut ParsePosition,
) -> Result<Option<MemoryUsage>, ParseError> {
    let Some(caps) = MEMORY.captures(rest(line, pos)) else {
        return Ok(None);
    };

    let usage = usage_from(&caps).map_err(|kind| ParseError::new(kind, line, pos))?;
    if let Some(m) = caps.get(0) {
        pos.index += m.end();
    }

    Ok(Some(usage))
}

/// Parse the last `before->after(total)` triple on a region line.
///
/// Region lines may report a sub-region first and the whole heap last.
pub fn parse_region_memory(
    line: &str,
    pos: &mut ParsePosition,
) -> Result<Option<MemoryUsage>, ParseError> {
    let Some(caps) = MEMORY.captures_iter(rest(line, pos)).last() else {
        return Ok(None);
    };

    let usage = usage_from(&caps).map_err(|kind| ParseError::new(kind, line, pos))?;
    if let Some(m) = caps.get(0) {
        pos.index += m.end();
    }

    Ok(Some(usage))
}
