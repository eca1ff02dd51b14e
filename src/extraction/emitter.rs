//! Insight classification and knowledge emission
//!
//! Groups extracted insights by type and applies one emission rule per
//! group, plus a global "Development Insights" rule for long responses.
//! Rules are independent: a single response can yield up to five records.

use super::extractor::{Extractor, Insight, InsightType};
use crate::config::ExtractionConfig;
use crate::knowledge::{ArchitectureKnowledge, ImpactLevel, Knowledge, KnowledgeRecord, Lesson};

/// Insights grouped by type, in order of each type's first appearance.
#[derive(Debug, Default)]
pub struct InsightGroups<'a> {
    groups: Vec<(InsightType, Vec<&'a Insight>)>,
}

impl<'a> InsightGroups<'a> {
    pub fn from_insights(insights: &'a [Insight]) -> Self {
        let mut groups: Vec<(InsightType, Vec<&'a Insight>)> = Vec::new();

        for insight in insights {
            match groups.iter_mut().find(|(t, _)| *t == insight.insight_type) {
                Some((_, members)) => members.push(insight),
                None => groups.push((insight.insight_type, vec![insight])),
            }
        }

        Self { groups }
    }

    pub fn get(&self, insight_type: InsightType) -> Option<&[&'a Insight]> {
        self.groups
            .iter()
            .find(|(t, _)| *t == insight_type)
            .map(|(_, members)| members.as_slice())
    }

    /// Number of distinct types present
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn types(&self) -> impl Iterator<Item = InsightType> + '_ {
        self.groups.iter().map(|(t, _)| *t)
    }
}

fn key_concepts<'a>(insights: &[&'a Insight]) -> Vec<&'a str> {
    insights
        .iter()
        .copied()
        .filter_map(|i| i.key_concept.as_deref())
        .filter(|c| !c.is_empty())
        .collect()
}

fn first_contents(insights: &[&Insight], limit: usize) -> String {
    insights
        .iter()
        .take(limit)
        .map(|i| i.content.as_str())
        .collect::<Vec<_>>()
        .join(". ")
}

/// Applies the per-type emission rules
#[derive(Debug, Clone, Default)]
pub struct InsightEmitter {
    config: ExtractionConfig,
}

impl InsightEmitter {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Extract and classify an assistant response.
    ///
    /// Responses shorter than `min_text_len` characters produce nothing,
    /// without running extraction at all.
    pub fn analyze_response(&self, extractor: &Extractor, text: &str) -> Vec<KnowledgeRecord> {
        let text_len = text.chars().count();
        if text_len < self.config.min_text_len {
            return Vec::new();
        }

        let insights = extractor.extract(text);
        if insights.is_empty() {
            return Vec::new();
        }

        tracing::debug!(
            insights = insights.len(),
            text_len,
            "Extracted insights from assistant response"
        );

        self.classify_and_emit(&insights, text_len)
    }

    /// Turn insights into records. Each rule runs independently.
    pub fn classify_and_emit(&self, insights: &[Insight], text_len: usize) -> Vec<KnowledgeRecord> {
        let groups = InsightGroups::from_insights(insights);
        let mut records = Vec::new();

        if let Some(arch) = groups.get(InsightType::Architecture) {
            records.extend(Self::architecture_lesson(arch));
        }
        if let Some(tech) = groups.get(InsightType::Technology) {
            records.extend(Self::technology_stack(tech));
        }
        if let Some(security) = groups.get(InsightType::Security) {
            records.push(
                Lesson::new(
                    "Security Considerations",
                    format!(
                        "Security considerations identified: {}",
                        first_contents(security, 3)
                    ),
                    "security",
                    ImpactLevel::High,
                )
                .tags(&["security", "best-practices", "protection"])
                .into(),
            );
        }
        if let Some(perf) = groups.get(InsightType::Performance) {
            records.push(
                Lesson::new(
                    "Performance Optimization",
                    format!("Performance considerations: {}", first_contents(perf, 3)),
                    "performance",
                    ImpactLevel::Medium,
                )
                .tags(&["performance", "optimization", "efficiency"])
                .into(),
            );
        }

        if text_len > self.config.detailed_text_len
            && insights.len() >= self.config.min_detailed_insights
        {
            records.push(
                Knowledge::new(
                    "Development Insights",
                    format!(
                        "Claude provided detailed technical guidance with {} insights across {} categories. \
                         This indicates significant architectural or implementation decisions being made.",
                        insights.len(),
                        groups.len()
                    ),
                    "development",
                )
                .tags(&["insights", "technical-guidance", "development"])
                .into(),
            );
        }

        records
    }

    fn architecture_lesson(arch: &[&Insight]) -> Option<KnowledgeRecord> {
        let concepts = key_concepts(arch);
        if concepts.is_empty() {
            return None;
        }

        let mut distinct: Vec<&str> = Vec::new();
        for concept in &concepts {
            if distinct.len() == 3 {
                break;
            }
            if !distinct.contains(concept) {
                distinct.push(*concept);
            }
        }

        Some(
            Lesson::new(
                format!("Architectural Decision: {}", distinct.join(", ")),
                format!(
                    "Claude made architectural decisions involving: {}. {}",
                    concepts.join(", "),
                    first_contents(arch, 2)
                ),
                "architecture",
                ImpactLevel::Medium,
            )
            .tags(&["architecture", "decision", "pattern"])
            .into(),
        )
    }

    fn technology_stack(tech: &[&Insight]) -> Option<KnowledgeRecord> {
        let technologies = key_concepts(tech);
        if technologies.is_empty() {
            return None;
        }

        let stack = technologies.join(", ");
        Some(
            ArchitectureKnowledge {
                component: "Technology Stack".to_string(),
                description: format!("Technologies being used in this project: {}", stack),
                tech_stack: stack,
                patterns: "Technology integration patterns discovered from Claude's decisions"
                    .to_string(),
            }
            .into(),
        )
    }
}
