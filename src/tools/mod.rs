//! Tool-completion event handling
//!
//! - [`significance`]: filters out routine shell commands
//! - [`classifier`]: maps completed tool calls to knowledge records

pub mod classifier;
pub mod significance;

pub use classifier::{CommandCategory, ToolClassifier, ToolEvent, ToolKind};
pub use significance::is_significant;
