use gc_trace_studio::parser::{
    parse_str, read_file, GcEvent, GcShape, GcType, MemoryUsage, ParsedGcLog,
};
use gc_trace_studio::utils::ParseErrorKind;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

const FIXTURE: &str = include_str!("data/g1_details.log");

const K: u64 = 1024;
const M: u64 = 1024 * 1024;

fn parse(text: &str) -> ParsedGcLog {
    parse_str(text).unwrap()
}

fn types(parsed: &ParsedGcLog) -> Vec<GcType> {
    parsed.model.events().iter().map(GcEvent::gc_type).collect()
}

fn timestamps(parsed: &ParsedGcLog) -> Vec<f64> {
    parsed.model.events().iter().map(GcEvent::timestamp).collect()
}

#[test]
fn test_fixture_events() {
    let parsed = parse(FIXTURE);

    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    assert_eq!(
        types(&parsed),
        vec![
            GcType::YoungPause,
            GcType::YoungInitialMark,
            GcType::ConcurrentMarkStart,
            GcType::ConcurrentMarkEnd,
            GcType::Remark,
            GcType::Cleanup,
            GcType::PartialPause,
            GcType::ConcurrentCountStart,
            GcType::ConcurrentCountEnd,
            GcType::FullGc,
        ]
    );
    assert_eq!(
        timestamps(&parsed),
        vec![0.295, 0.356, 0.359, 0.361, 0.362, 0.363, 0.401, 0.402, 0.410, 1.020]
    );

    let events = parsed.model.events();
    assert_eq!(events[0].pause(), Some(0.00594747));
    assert_eq!(
        events[0].memory(),
        Some(MemoryUsage {
            before: 4096 * K,
            after: 3936 * K,
            total: 16 * M,
        })
    );
    assert_eq!(events[2].pause(), None);
    assert_eq!(events[3].pause(), Some(0.0021345));
    assert_eq!(events[6].pause(), Some(0.0047));
    assert_eq!(events[6].memory().map(|m| m.after), Some(3072 * K));
    assert_eq!(events[9].memory().map(|m| m.total), Some(24 * M));
}

#[test]
fn test_read_file_matches_parse_str() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(FIXTURE.as_bytes()).unwrap();

    let from_file = read_file(file.path()).unwrap();
    assert_eq!(from_file.model, parse(FIXTURE).model);
}

#[test]
fn test_simple_pause_lines() {
    let pause_types = GcType::ALL
        .iter()
        .copied()
        .filter(|t| t.shape() == GcShape::Pause);

    for (i, gc_type) in pause_types.enumerate() {
        let t = 1.5 + i as f64;
        let d = 0.0125 * (i + 1) as f64;
        let parsed = parse(&format!("{t}: [{}, {d} secs]\n", gc_type.label()));

        assert!(parsed.diagnostics.is_empty());
        let events = parsed.model.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].timestamp(), t);
        assert_eq!(events[0].pause(), Some(d));
        assert_eq!(events[0].gc_type(), gc_type);
    }
}

#[test]
fn test_detailed_header_waits_for_trailer() {
    for gc_type in GcType::ALL.iter().copied() {
        if gc_type.shape() != GcShape::MemoryPause {
            continue;
        }
        let header = format!("3.25: [{}, 0.0175 secs]\n", gc_type.label());

        assert!(parse(&header).model.is_empty(), "{gc_type}");

        let parsed = parse(&format!(
            "{header}   [Other:   0.3 ms]\n [Times: user=0.01 sys=0.00, real=0.02 secs]\n"
        ));
        let events = parsed.model.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].gc_type(), gc_type);
        assert_eq!(events[0].timestamp(), 3.25);
        assert_eq!(events[0].pause(), Some(0.0175));
        assert_eq!(events[0].memory(), None);
    }
}

#[test]
fn test_memory_normalization() {
    let parsed = parse(
        "0.5: [GC pause (young), 0.01 secs]\n   [ 4096K->3936K(16M)]\n [Times: user=0.01 sys=0.00, real=0.01 secs]\n",
    );

    assert_eq!(
        parsed.model.events()[0].memory(),
        Some(MemoryUsage {
            before: 4096 * 1024,
            after: 3936 * 1024,
            total: 16 * 1024 * 1024,
        })
    );
}

#[test]
fn test_mid_line_timestamp_injection() {
    let parsed = parse(concat!(
        "0.398: [GC pause (young)0.402: [GC pause (young), 0.0021 secs]\n",
        ", 0.0035 secs]\n",
        "   [ 4096K->3936K(16M)]\n",
        " [Times: user=0.00 sys=0.00, real=0.00 secs]\n",
    ));

    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    let events = parsed.model.events();
    assert_eq!(events.len(), 2);

    assert_eq!(events[0].timestamp(), 0.398);
    assert_eq!(events[0].pause(), Some(0.0035));
    assert_eq!(events[0].memory().map(|m| m.before), Some(4096 * K));

    assert_eq!(events[1].timestamp(), 0.402);
    assert_eq!(events[1].pause(), Some(0.0021));
    assert_eq!(events[1].memory(), None);
}

#[test]
fn test_carried_timestamp_completed_inside_detailed_event() {
    let parsed = parse(concat!(
        "0.5: [GC pause (young)0.51:  (initial-mark), 0.003 secs]\n",
        "[GC concurrent-root-region-scan-start]\n",
        "   [ 4096K->3936K(16M)]\n",
        " [Times: user=0.00 sys=0.00, real=0.00 secs]\n",
    ));

    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    assert_eq!(
        types(&parsed),
        vec![
            GcType::YoungInitialMark,
            GcType::ConcurrentRootRegionScanStart
        ]
    );
    assert_eq!(timestamps(&parsed), vec![0.5, 0.51]);
    assert_eq!(parsed.model.events()[0].memory().map(|m| m.total), Some(16 * M));
}

#[test]
fn test_bare_timestamp_completed_inside_detailed_event() {
    let parsed = parse(concat!(
        "0.5: [GC pause (young)0.51 (initial-mark), 0.003 secs]\n",
        ": [GC concurrent-mark-start]\n",
        "   [ 4096K->3936K(16M)]\n",
        " [Times: user=0.00 sys=0.00, real=0.00 secs]\n",
    ));

    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    assert_eq!(
        types(&parsed),
        vec![GcType::YoungInitialMark, GcType::ConcurrentMarkStart]
    );
    assert_eq!(timestamps(&parsed), vec![0.5, 0.51]);

    let events = parsed.model.events();
    assert_eq!(events[0].pause(), Some(0.003));
    assert_eq!(events[0].memory().map(|m| m.after), Some(3936 * K));
    assert_eq!(events[1].pause(), None);
}

#[test]
fn test_heap_summary_skipped() {
    let parsed = parse(concat!(
        "0.4: [GC concurrent-mark-start]\n",
        "{Heap before GC invocations=3 (full 0):\n",
        " garbage-first heap   total 16384K, used 5462K [0x1, 0x2, 0x3)\n",
        "  region size 1024K, 2 young (2048K), 0 survivors (0K)\n",
        "}\n",
        "0.5: [GC remark, 0.0011 secs]\n",
        "Heap\n",
        "No shared spaces configured.\n",
    ));

    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    assert_eq!(
        types(&parsed),
        vec![GcType::ConcurrentMarkStart, GcType::Remark]
    );
}

#[test]
fn test_stray_heap_line_keeps_following_events() {
    let parsed = parse(concat!(
        "Heap\n",
        "0.5: [GC remark, 0.0011 secs]\n",
        "0.6: [GC concurrent-mark-start]\n",
        "0.7: [GC remark, 0.0011 secs]\n",
        "}\n",
        "0.8: [GC remark, 0.0011 secs]\n",
    ));

    assert_eq!(
        types(&parsed),
        vec![
            GcType::Remark,
            GcType::ConcurrentMarkStart,
            GcType::Remark,
            GcType::Remark
        ]
    );
    assert_eq!(timestamps(&parsed), vec![0.5, 0.6, 0.7, 0.8]);

    assert_eq!(parsed.diagnostics.len(), 1);
    assert_eq!(parsed.diagnostics[0].line_number, 5);
    assert_eq!(parsed.diagnostics[0].kind, ParseErrorKind::InvalidTimestamp);
}

#[test]
fn test_blank_lines_do_not_change_model() {
    let baseline = parse(FIXTURE).model;
    let lines: Vec<&str> = FIXTURE.lines().collect();

    for at in 0..=lines.len() {
        let mut with_blank = lines.clone();
        with_blank.insert(at, "");
        let parsed = parse(&with_blank.join("\n"));

        assert_eq!(parsed.model, baseline, "blank line at {at}");
        assert!(parsed.diagnostics.is_empty(), "blank line at {at}");
    }
}

#[test]
fn test_unknown_label_is_isolated() {
    let mut lines: Vec<&str> = FIXTURE.lines().collect();
    lines.insert(11, "0.3595: [GC mystery phase, 0.1 secs]");
    let parsed = parse(&lines.join("\n"));

    assert_eq!(parsed.model, parse(FIXTURE).model);
    assert_eq!(parsed.diagnostics.len(), 1);

    let diagnostic = &parsed.diagnostics[0];
    assert_eq!(
        diagnostic.kind,
        ParseErrorKind::UnknownType("GC mystery phase".to_string())
    );
    assert_eq!(diagnostic.line_number, 12);
    assert_eq!(diagnostic.line, "0.3595: [GC mystery phase, 0.1 secs]");
}

#[test]
fn test_unterminated_detailed_event_dropped() {
    let parsed = parse(concat!(
        "0.2: [GC concurrent-mark-start]\n",
        "0.5: [GC pause (young), 0.01 secs]\n",
        "   [ 4096K->3936K(16M)]\n",
    ));

    assert!(parsed.diagnostics.is_empty());
    assert_eq!(types(&parsed), vec![GcType::ConcurrentMarkStart]);
}

#[test]
fn test_datestamped_lines() {
    let parsed = parse(concat!(
        "2012-04-18T14:23:59.890+0200: 0.295: [GC pause (young), 0.00594747 secs]\n",
        "   [ 4096K->3936K(16M)]\n",
        " [Times: user=0.01 sys=0.00, real=0.01 secs]\n",
        "2012-04-18T14:23:59.990+0200: 0.395: [GC concurrent-mark-start]\n",
    ));

    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    let events = parsed.model.events();
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0].datestamp().map(|d| d.to_rfc3339()),
        Some("2012-04-18T14:23:59.890+02:00".to_string())
    );
    assert_eq!(events[1].timestamp(), 0.395);
    assert!(events[1].datestamp().is_some());
}

#[test]
fn test_crlf_input() {
    let parsed = parse(&FIXTURE.replace('\n', "\r\n"));

    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    assert_eq!(parsed.model, parse(FIXTURE).model);
}

#[test]
fn test_output_is_time_ordered() {
    let parsed = parse(FIXTURE);
    let ts = timestamps(&parsed);

    assert!(ts.windows(2).all(|w| w[0] <= w[1]), "{ts:?}");
}
