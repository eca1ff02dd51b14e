//! Host event handling
//!
//! - [`payload`]: typed stdin payloads for each event
//! - [`runner`]: [`HookRunner`] and the advisory [`run_advisory`] boundary

pub mod payload;
pub mod runner;

pub use payload::{parse_payload, read_payload, AssistantResponse};
pub use runner::{run_advisory, HookContext, HookOutcome, HookRunner};
