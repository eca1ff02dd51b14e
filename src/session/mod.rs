//! Session lifecycle handling
//!
//! - [`aggregator`]: summarizes a finished session
//! - [`project`]: detects project settings when a session starts

pub mod aggregator;
pub mod project;

pub use aggregator::{SessionAggregator, SessionEvent};
pub use project::{session_started, ProjectDetector};
