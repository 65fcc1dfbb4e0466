//! Trace records: one line of an agent's history
//!
//! Each record is written as tab-separated fields in the order
//! `time, x, y, z, id, parent_id, label`. An agent's history is a block of
//! such lines followed by one blank separator line.

use crate::core::time::Time;
use crate::models::agent::AgentId;
use crate::models::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of tab-separated fields in a trace line
pub const TRACE_FIELD_COUNT: usize = 7;

/// Errors parsing a single trace line
#[derive(Debug, Error, PartialEq)]
pub enum RecordFormatError {
    #[error("expected 7 tab-separated fields, found {0}")]
    FieldCount(usize),

    #[error("invalid {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },
}

/// Snapshot of one agent at one time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub time: Time,
    pub position: Position,
    pub id: AgentId,
    /// 0 for lineage roots
    pub parent_id: AgentId,
    pub label: String,
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{:.6}\t{:.6}\t{:.6}\t{}\t{}\t{}",
            self.time,
            self.position.x,
            self.position.y,
            self.position.z,
            self.id,
            self.parent_id,
            self.label
        )
    }
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, RecordFormatError> {
    value.trim().parse().map_err(|_| RecordFormatError::InvalidField {
        field,
        value: value.to_string(),
    })
}

impl FromStr for TraceRecord {
    type Err = RecordFormatError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.trim_end_matches(&['\r', '\n'][..]).split('\t').collect();
        if fields.len() != TRACE_FIELD_COUNT {
            return Err(RecordFormatError::FieldCount(fields.len()));
        }

        Ok(TraceRecord {
            time: parse_field("time", fields[0])?,
            position: Position::new(
                parse_field("x", fields[1])?,
                parse_field("y", fields[2])?,
                parse_field("z", fields[3])?,
            ),
            id: parse_field("id", fields[4])?,
            parent_id: parse_field("parent_id", fields[5])?,
            label: fields[6].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TraceRecord {
        TraceRecord {
            time: 4,
            position: Position::new(1.5, -2.0, 0.0),
            id: 7,
            parent_id: 3,
            label: "1ab".to_string(),
        }
    }

    #[test]
    fn test_display_is_tab_separated() {
        assert_eq!(
            record().to_string(),
            "4\t1.500000\t-2.000000\t0.000000\t7\t3\t1ab"
        );
    }

    #[test]
    fn test_parse_line() {
        let parsed: TraceRecord = "4\t1.5\t-2\t0\t7\t3\t1ab".parse().unwrap();
        assert_eq!(parsed, record());
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        let err = "4\t1.5\t-2\t0\t7\t3".parse::<TraceRecord>().unwrap_err();
        assert_eq!(err, RecordFormatError::FieldCount(6));
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        let err = "four\t1.5\t-2\t0\t7\t3\tx".parse::<TraceRecord>().unwrap_err();
        assert!(matches!(
            err,
            RecordFormatError::InvalidField { field: "time", .. }
        ));
    }
}
