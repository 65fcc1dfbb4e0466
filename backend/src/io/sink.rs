//! Trace sinks

use crate::models::trace::TraceRecord;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Destination of flushed agent histories
pub trait TraceSink {
    /// Write one agent's complete history as a block
    fn write_block(&mut self, records: &[TraceRecord]) -> io::Result<()>;

    /// Flush and release the underlying resource
    fn finish(&mut self) -> io::Result<()>;
}

/// Writes the tab-separated trace format to any `Write`
#[derive(Debug)]
pub struct TraceWriter<W: Write> {
    inner: W,
    blocks_written: usize,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            blocks_written: 0,
        }
    }

    pub fn blocks_written(&self) -> usize {
        self.blocks_written
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl TraceWriter<BufWriter<File>> {
    /// Create (truncate) a trace file
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> TraceSink for TraceWriter<W> {
    fn write_block(&mut self, records: &[TraceRecord]) -> io::Result<()> {
        for record in records {
            writeln!(self.inner, "{}", record)?;
        }
        writeln!(self.inner)?;
        self.blocks_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Keeps flushed blocks in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    blocks: Vec<Vec<TraceRecord>>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[Vec<TraceRecord>] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Vec<TraceRecord>> {
        self.blocks
    }

    /// Block flushed for a given agent, if any
    pub fn block_for(&self, id: u64) -> Option<&[TraceRecord]> {
        self.blocks
            .iter()
            .find(|b| b.first().is_some_and(|r| r.id == id))
            .map(|b| b.as_slice())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl TraceSink for MemorySink {
    fn write_block(&mut self, records: &[TraceRecord]) -> io::Result<()> {
        self.blocks.push(records.to_vec());
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::position::Position;

    fn record(time: usize) -> TraceRecord {
        TraceRecord {
            time,
            position: Position::new(time as f64, 0.0, 0.0),
            id: 1,
            parent_id: 0,
            label: "1".to_string(),
        }
    }

    #[test]
    fn test_writer_emits_blank_line_after_block() {
        let mut writer = TraceWriter::new(Vec::new());
        writer.write_block(&[record(0), record(1)]).unwrap();
        writer.finish().unwrap();

        assert_eq!(writer.blocks_written(), 1);
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            text,
            "0\t0.000000\t0.000000\t0.000000\t1\t0\t1\n\
             1\t1.000000\t0.000000\t0.000000\t1\t0\t1\n\
             \n"
        );
    }

    #[test]
    fn test_memory_sink_keeps_blocks() {
        let mut sink = MemorySink::new();
        sink.write_block(&[record(0)]).unwrap();
        sink.write_block(&[]).unwrap();
        sink.finish().unwrap();

        assert_eq!(sink.blocks().len(), 2);
        assert!(sink.block_for(1).is_some());
        assert!(sink.is_finished());
    }
}
