//! Trace parsing
//!
//! Reads the block format written by [`TraceWriter`](super::TraceWriter)
//! back into per-agent record blocks. Runs of blank lines are treated as a
//! single separator.

use crate::models::trace::{RecordFormatError, TraceRecord};
use std::io::{self, BufRead};
use thiserror::Error;

/// Errors reading a trace
#[derive(Debug, Error)]
pub enum TraceParseError {
    #[error("line {line}: {source}")]
    MalformedLine {
        line: usize,
        #[source]
        source: RecordFormatError,
    },

    #[error("I/O error reading trace: {0}")]
    Io(#[from] io::Error),
}

/// Iterator over the agent blocks of a trace
pub struct TraceReader<R: BufRead> {
    lines: io::Lines<R>,
    line_number: usize,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<Vec<TraceRecord>, TraceParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut block = Vec::new();

        for line in self.lines.by_ref() {
            self.line_number += 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };

            if line.trim().is_empty() {
                if block.is_empty() {
                    continue;
                }
                return Some(Ok(block));
            }

            match line.parse::<TraceRecord>() {
                Ok(record) => block.push(record),
                Err(source) => {
                    return Some(Err(TraceParseError::MalformedLine {
                        line: self.line_number,
                        source,
                    }))
                }
            }
        }

        if block.is_empty() {
            None
        } else {
            Some(Ok(block))
        }
    }
}

/// Read a whole trace into blocks
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<Vec<TraceRecord>>, TraceParseError> {
    TraceReader::new(reader).collect()
}
