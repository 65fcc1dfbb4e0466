//! Trace output/input tests
//!
//! The on-disk trace must read back into the same blocks the population
//! flushed, up to the six printed decimals.

use cell_lineage_sim_core::{
    read_trace, MemorySink, Population, SimulationConfig, TraceParseError, TraceReader,
    TraceRecord, TraceWriter,
};
use std::io::Cursor;

fn config() -> SimulationConfig {
    SimulationConfig {
        rng_seed: 5,
        mean_division_age: 5.0,
        mean_death_age: 20.0,
        ..Default::default()
    }
}

fn memory_blocks(steps: usize) -> Vec<Vec<TraceRecord>> {
    let mut population = Population::new(config(), MemorySink::new()).unwrap();
    population.seed(2).unwrap();
    population.run(steps).unwrap();
    population.shutdown().unwrap().into_blocks()
}

fn text_trace(steps: usize) -> String {
    let mut population = Population::new(config(), TraceWriter::new(Vec::new())).unwrap();
    population.seed(2).unwrap();
    population.run(steps).unwrap();
    let writer = population.shutdown().unwrap();
    String::from_utf8(writer.into_inner()).unwrap()
}

#[test]
fn test_written_trace_reads_back() {
    let expected = memory_blocks(30);
    let text = text_trace(30);
    let parsed = read_trace(Cursor::new(text)).unwrap();

    assert_eq!(parsed.len(), expected.len());
    for (read, flushed) in parsed.iter().zip(expected.iter()) {
        assert_eq!(read.len(), flushed.len());
        for (a, b) in read.iter().zip(flushed.iter()) {
            assert_eq!(a.time, b.time);
            assert_eq!(a.id, b.id);
            assert_eq!(a.parent_id, b.parent_id);
            assert_eq!(a.label, b.label);
            assert!(a.position.distance(&b.position) < 1e-5);
        }
    }
}

#[test]
fn test_blocks_end_with_blank_line() {
    let text = text_trace(5);
    assert!(text.ends_with("\n\n"));

    let blank_lines = text.lines().filter(|l| l.is_empty()).count();
    assert_eq!(blank_lines, read_trace(Cursor::new(text.clone())).unwrap().len());
    assert!(!text.contains("\n\n\n"));
}

#[test]
fn test_lines_have_seven_fields() {
    let text = text_trace(10);
    for line in text.lines().filter(|l| !l.is_empty()) {
        assert_eq!(line.split('\t').count(), 7, "bad line {:?}", line);
    }
}

#[test]
fn test_reader_skips_repeated_blank_lines() {
    let text = "\n0\t0\t0\t0\t1\t0\t1\n1\t0.5\t0\t0\t1\t0\t1\n\n\n\n2\t3\t0\t0\t2\t0\t2\n";
    let blocks: Vec<_> = TraceReader::new(Cursor::new(text))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].len(), 2);
    assert_eq!(blocks[1][0].id, 2);
}

#[test]
fn test_reader_reports_malformed_line_number() {
    let text = "0\t0\t0\t0\t1\t0\t1\nnot a record\n";
    match read_trace(Cursor::new(text)) {
        Err(TraceParseError::MalformedLine { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected malformed line error, got {:?}", other),
    }
}

#[test]
fn test_file_writer_roundtrip() {
    let path = std::env::temp_dir().join(format!("cell_trace_{}.txt", std::process::id()));

    let mut population = Population::new(config(), TraceWriter::create(&path).unwrap()).unwrap();
    population.seed(1).unwrap();
    population.run(3).unwrap();
    let writer = population.shutdown().unwrap();
    assert_eq!(writer.blocks_written(), 1);
    drop(writer);

    let file = std::io::BufReader::new(std::fs::File::open(&path).unwrap());
    let blocks = read_trace(file).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(blocks.len(), 1);
    let times: Vec<usize> = blocks[0].iter().map(|r| r.time).collect();
    assert_eq!(times, vec![0, 1, 2, 3]);
}
