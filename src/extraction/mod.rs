//! Insight extraction from assistant responses
//!
//! - [`patterns`]: the declarative pattern table
//! - [`extractor`]: compiles the table and scans text for insights
//! - [`emitter`]: groups insights and decides which records to emit

pub mod emitter;
pub mod extractor;
pub mod patterns;

pub use emitter::{InsightEmitter, InsightGroups};
pub use extractor::{Extractor, Insight, InsightType};
pub use patterns::{default_pattern_table, PatternRule};
