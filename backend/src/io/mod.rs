//! Trace output and input
//!
//! The trace is the simulation's only durable output: one block of
//! [`TraceRecord`](crate::models::TraceRecord) lines per agent, each block
//! followed by a blank line.

mod reader;
mod sink;

pub use reader::{read_trace, TraceParseError, TraceReader};
pub use sink::{MemorySink, TraceSink, TraceWriter};
