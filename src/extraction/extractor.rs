//! Pattern extraction engine
//!
//! Scans free text against the compiled pattern table and returns every
//! match as an [`Insight`]. Matches are never deduplicated: a phrase that
//! satisfies two patterns yields two insights.

use super::patterns::{default_pattern_table, PatternRule};
use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::fmt;

/// Category of an extracted insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    Architecture,
    Technology,
    Security,
    Performance,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::Architecture => "architecture",
            InsightType::Technology => "technology",
            InsightType::Security => "security",
            InsightType::Performance => "performance",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified observation extracted from free text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    /// Pattern family that matched
    pub insight_type: InsightType,
    /// The full matched text
    pub content: String,
    /// Captured concept, for patterns that define one
    pub key_concept: Option<String>,
}

struct CompiledPattern {
    insight_type: InsightType,
    regex: Regex,
    has_capture: bool,
}

/// Compiled pattern table
pub struct Extractor {
    patterns: Vec<CompiledPattern>,
}

impl Extractor {
    /// Compile the built-in pattern table
    pub fn new() -> Result<Self> {
        Self::with_table(default_pattern_table())
    }

    /// Compile a custom table; family order and pattern order are preserved.
    pub fn with_table(table: Vec<(InsightType, &[PatternRule])>) -> Result<Self> {
        let mut patterns = Vec::new();

        for (insight_type, rules) in table {
            for rule in rules {
                let regex = RegexBuilder::new(rule.pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| {
                        Error::Pattern(format!(
                            "Invalid {} pattern '{}': {}",
                            insight_type, rule.pattern, e
                        ))
                    })?;

                patterns.push(CompiledPattern {
                    insight_type,
                    regex,
                    has_capture: rule.has_capture,
                });
            }
        }

        Ok(Self { patterns })
    }

    /// Extract insights in family order, then pattern order, then position.
    pub fn extract(&self, text: &str) -> Vec<Insight> {
        let mut insights = Vec::new();

        for pattern in &self.patterns {
            for caps in pattern.regex.captures_iter(text) {
                let content = caps
                    .get(0)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                let key_concept = if pattern.has_capture {
                    caps.get(1).map(|m| m.as_str().to_string())
                } else {
                    None
                };

                insights.push(Insight {
                    insight_type: pattern.insight_type,
                    content,
                    key_concept,
                });
            }
        }

        insights
    }

    /// Number of compiled patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
