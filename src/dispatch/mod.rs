//! Delivery of knowledge records to the memory store
//!
//! - [`protocol`]: the request envelope
//! - [`sink`]: the [`KnowledgeSink`] seam and the advisory [`dispatch`] adapter
//! - [`process`]: the production sink that spawns the store executable

pub mod process;
pub mod protocol;
pub mod sink;

pub use process::{resolve_executable, ProcessSink};
pub use protocol::{Envelope, ToolCall};
pub use sink::{dispatch, KnowledgeSink, NoopSink, RecordingSink};
