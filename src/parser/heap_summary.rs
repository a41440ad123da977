//! Skip heap configuration dumps.
//!
//! ```text
//! Heap
//!  garbage-first heap   total 16384K, used 5462K [0x..., 0x..., 0x...)
//!   region size 1024K, 2 young (2048K), 0 survivors (0K)
//!  compacting perm gen  total 20480K, used 3042K [0x..., 0x..., 0x...)
//!    the space 20480K,  14% used [0x..., 0x..., 0x..., 0x...)
//! No shared spaces configured.
//! ```

use crate::utils::config::HEAP_SUMMARY_MARKERS;
use crate::utils::error::ParsePosition;
use std::io;
use std::iter::Peekable;

pub fn is_heap_summary_line(line: &str) -> bool {
    HEAP_SUMMARY_MARKERS.iter().any(|marker| line.contains(marker))
}

/// Discard the lines following a heap dump start line.
///
/// Lines are dropped for as long as they carry a heap marker or are blank.
/// The first other line is left in `lines` and parsed normally. End of
/// stream ends the skip. Returns the number of lines dropped.
pub fn skip_heap_summary<I>(lines: &mut Peekable<I>, pos: &mut ParsePosition) -> io::Result<usize>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut skipped = 0;

    while let Some(next) = lines.peek() {
        if let Ok(line) = next {
            if !(line.trim().is_empty() || is_heap_summary_line(line)) {
                break;
            }
        }
        lines.next().transpose()?;
        pos.line_number += 1;
        skipped += 1;
    }

    Ok(skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(text: &str) -> Peekable<impl Iterator<Item = io::Result<String>> + '_> {
        text.lines().map(|l| Ok(l.to_string())).peekable()
    }

    #[test]
    fn test_skips_whole_block() {
        let mut lines = source(
            " garbage-first heap   total 16384K, used 5462K [0x1, 0x2, 0x3)\n  region size 1024K, 2 young (2048K), 0 survivors (0K)\n compacting perm gen  total 20480K, used 3042K [0x1, 0x2, 0x3)\n   the space 20480K,  14% used [0x1, 0x2, 0x3, 0x4)\nNo shared spaces configured.\n0.5: [GC remark, 0.001 secs]",
        );
        let mut pos = ParsePosition::new(1);

        assert_eq!(skip_heap_summary(&mut lines, &mut pos).unwrap(), 5);
        assert_eq!(pos.line_number, 6);
        assert_eq!(
            lines.next().unwrap().unwrap(),
            "0.5: [GC remark, 0.001 secs]"
        );
    }

    #[test]
    fn test_stops_at_first_unrelated_line() {
        let mut lines = source("0.5: [GC remark, 0.001 secs]\n}\n0.6: [GC remark, 0.001 secs]");
        let mut pos = ParsePosition::new(1);

        assert_eq!(skip_heap_summary(&mut lines, &mut pos).unwrap(), 0);
        assert_eq!(pos.line_number, 1);
        assert_eq!(
            lines.next().unwrap().unwrap(),
            "0.5: [GC remark, 0.001 secs]"
        );
    }

    #[test]
    fn test_blank_lines_inside_block_skipped() {
        let mut lines = source(" garbage-first heap   total 16384K\n\n  region size 1024K\n0.5: [GC remark, 0.001 secs]");
        let mut pos = ParsePosition::new(1);

        assert_eq!(skip_heap_summary(&mut lines, &mut pos).unwrap(), 3);
        assert_eq!(
            lines.next().unwrap().unwrap(),
            "0.5: [GC remark, 0.001 secs]"
        );
    }

    #[test]
    fn test_end_of_stream_ends_skip() {
        let mut lines = source(" garbage-first heap   total 16384K\nNo shared spaces configured.");
        let mut pos = ParsePosition::new(1);

        assert_eq!(skip_heap_summary(&mut lines, &mut pos).unwrap(), 2);
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_io_error_propagates() {
        let mut lines = vec![Err::<String, _>(io::Error::new(io::ErrorKind::Other, "boom"))]
            .into_iter()
            .peekable();
        let mut pos = ParsePosition::new(1);

        assert!(skip_heap_summary(&mut lines, &mut pos).is_err());
    }
}
