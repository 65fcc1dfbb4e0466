//! Domain models for the lineage simulator

pub mod agent;
pub mod event;
pub mod naming;
pub mod position;
pub mod trace;

// Re-exports
pub use agent::{Agent, AgentId, AgentParams, ChildSpec, LifecycleTimers, Outcome, ROOT_PARENT_ID};
pub use event::{Event, EventLog};
pub use naming::{NamingPolicy, StatusHint, FIXED_SYMBOL};
pub use position::Position;
pub use trace::{RecordFormatError, TraceRecord, TRACE_FIELD_COUNT};
