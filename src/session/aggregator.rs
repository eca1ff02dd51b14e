//! End-of-session summary

use crate::knowledge::{ImpactLevel, Knowledge, KnowledgeRecord, Lesson};
use chrono::{DateTime, TimeZone};
use serde::Deserialize;

/// Tool names that count as hands-on development work (substring match)
const SIGNIFICANT_TOOLS: &[&str] = &["Edit", "Write", "MultiEdit", "Bash"];

/// A productive session needs at least this many significant tool uses
const PRODUCTIVE_THRESHOLD: usize = 3;

const LISTED_TOOLS: usize = 5;

fn default_duration() -> serde_json::Value {
    serde_json::Value::String("unknown".to_string())
}

/// Session metrics reported by the host when a session ends
#[derive(Debug, Clone, Deserialize)]
pub struct SessionEvent {
    /// Host-formatted duration; any JSON value is accepted
    #[serde(default = "default_duration")]
    pub duration: serde_json::Value,
    #[serde(default)]
    pub message_count: u64,
    #[serde(default)]
    pub tools_used: Vec<String>,
}

impl Default for SessionEvent {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            message_count: 0,
            tools_used: Vec::new(),
        }
    }
}

impl SessionEvent {
    pub fn duration_label(&self) -> String {
        match &self.duration {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => "unknown".to_string(),
            other => other.to_string(),
        }
    }

    /// Tool uses that count as development work, in order
    pub fn significant_tools(&self) -> Vec<&str> {
        self.tools_used
            .iter()
            .map(String::as_str)
            .filter(|tool| SIGNIFICANT_TOOLS.iter().any(|sig| tool.contains(sig)))
            .collect()
    }
}

fn first_joined(items: &[&str], limit: usize) -> String {
    items
        .iter()
        .take(limit)
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

/// Summarizes a finished session
pub struct SessionAggregator;

impl SessionAggregator {
    /// Always one "Session End" record, plus a productivity lesson when the
    /// session had enough hands-on work.
    pub fn summarize<Tz>(event: &SessionEvent, now: &DateTime<Tz>) -> Vec<KnowledgeRecord>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut parts = vec![
            "Claude Code session completed".to_string(),
            format!("Duration: {}", event.duration_label()),
            format!("Messages: {}", event.message_count),
        ];
        if !event.tools_used.is_empty() {
            let tools: Vec<&str> = event.tools_used.iter().map(String::as_str).collect();
            parts.push(format!("Tools used: {}", first_joined(&tools, LISTED_TOOLS)));
        }

        let mut records: Vec<KnowledgeRecord> = vec![Knowledge::new(
            format!("Session End - {}", now.format("%Y-%m-%d %H:%M")),
            parts.join(". "),
            "process",
        )
        .tags(&["session", "milestone", "claude-code"])
        .into()];

        let significant = event.significant_tools();
        if significant.len() >= PRODUCTIVE_THRESHOLD {
            tracing::debug!(
                significant = significant.len(),
                "Session had significant development activity"
            );
            records.push(
                Lesson::new(
                    "Development Session Insights",
                    format!(
                        "Productive development session with {} significant actions. Tools: {}. \
                         Consider documenting any architectural decisions or patterns discovered.",
                        significant.len(),
                        first_joined(&significant, LISTED_TOOLS)
                    ),
                    "process",
                    ImpactLevel::Medium,
                )
                .tags(&["session", "development", "productivity"])
                .into(),
            );
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::Operation;
    use chrono::Utc;

    fn session(tools: &[&str]) -> SessionEvent {
        SessionEvent {
            duration: serde_json::json!("42m"),
            message_count: 17,
            tools_used: tools.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_productive_session_emits_two() {
        let records = SessionAggregator::summarize(&session(&["Edit", "Edit", "Bash"]), &fixed_now());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].operation(), Operation::AddKnowledge);
        assert_eq!(records[1].operation(), Operation::RecordLesson);

        let KnowledgeRecord::Lesson(lesson) = &records[1] else {
            panic!("expected lesson");
        };
        assert_eq!(lesson.category, "process");
        assert_eq!(lesson.impact_level, ImpactLevel::Medium);
        assert!(lesson.description.contains("with 3 significant actions"));
        assert!(lesson.description.contains("Tools: Edit, Edit, Bash."));
    }

    #[test]
    fn test_read_only_session_emits_one() {
        let records = SessionAggregator::summarize(&session(&["Read", "Read"]), &fixed_now());
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_session_end_content() {
        let records = SessionAggregator::summarize(
            &session(&["Read", "Grep", "Edit", "Bash", "Write", "WebFetch", "Glob"]),
            &fixed_now(),
        );

        let KnowledgeRecord::Knowledge(k) = &records[0] else {
            panic!("expected knowledge");
        };
        assert_eq!(k.title, "Session End - 2025-03-14 09:26");
        assert_eq!(
            k.content,
            "Claude Code session completed. Duration: 42m. Messages: 17. \
             Tools used: Read, Grep, Edit, Bash, Write"
        );
        assert_eq!(k.category, "process");
    }

    #[test]
    fn test_default_event() {
        let records = SessionAggregator::summarize(&SessionEvent::default(), &fixed_now());

        assert_eq!(records.len(), 1);
        let KnowledgeRecord::Knowledge(k) = &records[0] else {
            panic!("expected knowledge");
        };
        assert_eq!(
            k.content,
            "Claude Code session completed. Duration: unknown. Messages: 0"
        );
    }

    #[test]
    fn test_substring_match_for_significant_tools() {
        let event = session(&["NotebookEdit", "MultiEdit", "BashOutput", "Read"]);
        assert_eq!(
            event.significant_tools(),
            vec!["NotebookEdit", "MultiEdit", "BashOutput"]
        );
    }

    #[test]
    fn test_lesson_lists_at_most_five_tools() {
        let tools = ["Edit", "Write", "Bash", "Edit", "Write", "Bash", "MultiEdit"];
        let records = SessionAggregator::summarize(&session(&tools), &fixed_now());

        let KnowledgeRecord::Lesson(lesson) = &records[1] else {
            panic!("expected lesson");
        };
        assert!(lesson.description.contains("with 7 significant actions"));
        assert!(lesson
            .description
            .contains("Tools: Edit, Write, Bash, Edit, Write."));
    }

    #[test]
    fn test_numeric_duration() {
        let event: SessionEvent =
            serde_json::from_str(r#"{"duration": 125, "tools_used": ["Bash"]}"#).unwrap();
        assert_eq!(event.duration_label(), "125");
        assert_eq!(event.message_count, 0);
    }
}
