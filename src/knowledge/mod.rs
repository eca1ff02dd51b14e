//! Knowledge records and their store operations

pub mod record;

pub use record::{
    truncate_chars, ArchitectureKnowledge, Deployment, ImpactLevel, Knowledge, KnowledgeRecord,
    Lesson, Operation, Setting,
};
