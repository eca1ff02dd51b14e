//! Knowledge record types sent to the memory store
//!
//! Each record variant carries exactly the argument fields of one store
//! operation, so building a record is the same as building the request
//! arguments for it.

use crate::error::Result;
use serde::{Serialize, Serializer};
use std::fmt;

/// Memory store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Record a lesson (decision or consideration with an impact level)
    RecordLesson,
    /// Record architecture knowledge about a component
    LearnArchitecture,
    /// Add a generic knowledge entry
    AddKnowledge,
    /// Record a discovered project setting
    LearnSetting,
    /// Record a deployment procedure
    LearnDeployment,
}

impl Operation {
    /// Operation name without any store-specific prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::RecordLesson => "record_lesson",
            Operation::LearnArchitecture => "learn_architecture",
            Operation::AddKnowledge => "add_knowledge",
            Operation::LearnSetting => "learn_setting",
            Operation::LearnDeployment => "learn_deployment",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Impact level attached to lessons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Medium,
    High,
}

/// The store takes tags as a single comma-separated string.
fn join_tags<S: Serializer>(tags: &[String], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&tags.join(","))
}

fn to_tags(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

/// A decision or consideration worth remembering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lesson {
    pub title: String,
    pub description: String,
    pub category: String,
    pub impact_level: ImpactLevel,
    #[serde(serialize_with = "join_tags")]
    pub tags: Vec<String>,
}

impl Lesson {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        impact_level: ImpactLevel,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            impact_level,
            tags: Vec::new(),
        }
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = to_tags(tags);
        self
    }
}

/// Architecture knowledge about one component of the project
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchitectureKnowledge {
    pub component: String,
    pub description: String,
    pub tech_stack: String,
    pub patterns: String,
}

/// A generic knowledge entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Knowledge {
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(serialize_with = "join_tags")]
    pub tags: Vec<String>,
}

impl Knowledge {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: category.into(),
            tags: Vec::new(),
        }
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = to_tags(tags);
        self
    }

    /// Append a tag that is only known at runtime (file names, tool kinds)
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// A discovered project convention, such as the build command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Setting {
    pub category: String,
    pub key: String,
    pub value: String,
    pub description: String,
}

impl Setting {
    pub fn new(
        category: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            key: key.into(),
            value: value.into(),
            description: description.into(),
        }
    }
}

/// A deployment procedure observed in the session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deployment {
    pub environment: String,
    pub deployment_steps: String,
    pub test_verification: String,
}

/// One unit sent to the memory store; one record is one store call.
#[derive(Debug, Clone, PartialEq)]
pub enum KnowledgeRecord {
    Lesson(Lesson),
    Architecture(ArchitectureKnowledge),
    Knowledge(Knowledge),
    Setting(Setting),
    Deployment(Deployment),
}

impl KnowledgeRecord {
    /// The store operation this record is sent with
    pub fn operation(&self) -> Operation {
        match self {
            KnowledgeRecord::Lesson(_) => Operation::RecordLesson,
            KnowledgeRecord::Architecture(_) => Operation::LearnArchitecture,
            KnowledgeRecord::Knowledge(_) => Operation::AddKnowledge,
            KnowledgeRecord::Setting(_) => Operation::LearnSetting,
            KnowledgeRecord::Deployment(_) => Operation::LearnDeployment,
        }
    }

    /// Operation arguments as a JSON object
    pub fn arguments(&self) -> Result<serde_json::Value> {
        let value = match self {
            KnowledgeRecord::Lesson(r) => serde_json::to_value(r)?,
            KnowledgeRecord::Architecture(r) => serde_json::to_value(r)?,
            KnowledgeRecord::Knowledge(r) => serde_json::to_value(r)?,
            KnowledgeRecord::Setting(r) => serde_json::to_value(r)?,
            KnowledgeRecord::Deployment(r) => serde_json::to_value(r)?,
        };
        Ok(value)
    }

    /// Short human-readable label, used in logs
    pub fn label(&self) -> &str {
        match self {
            KnowledgeRecord::Lesson(r) => &r.title,
            KnowledgeRecord::Architecture(r) => &r.component,
            KnowledgeRecord::Knowledge(r) => &r.title,
            KnowledgeRecord::Setting(r) => &r.key,
            KnowledgeRecord::Deployment(r) => &r.environment,
        }
    }

    /// Impact level, present on lessons only
    pub fn impact_level(&self) -> Option<ImpactLevel> {
        match self {
            KnowledgeRecord::Lesson(r) => Some(r.impact_level),
            _ => None,
        }
    }
}

impl From<Lesson> for KnowledgeRecord {
    fn from(r: Lesson) -> Self {
        KnowledgeRecord::Lesson(r)
    }
}

impl From<ArchitectureKnowledge> for KnowledgeRecord {
    fn from(r: ArchitectureKnowledge) -> Self {
        KnowledgeRecord::Architecture(r)
    }
}

impl From<Knowledge> for KnowledgeRecord {
    fn from(r: Knowledge) -> Self {
        KnowledgeRecord::Knowledge(r)
    }
}

impl From<Setting> for KnowledgeRecord {
    fn from(r: Setting) -> Self {
        KnowledgeRecord::Setting(r)
    }
}

impl From<Deployment> for KnowledgeRecord {
    fn from(r: Deployment) -> Self {
        KnowledgeRecord::Deployment(r)
    }
}

/// Truncate to at most `max` characters without splitting a UTF-8 sequence.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
