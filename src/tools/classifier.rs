//! Tool-completion event classification
//!
//! Maps a single completed tool call to zero or more knowledge records.
//! Failed tool calls are ignored entirely.

use super::significance::is_significant;
use crate::knowledge::{truncate_chars, Deployment, Knowledge, KnowledgeRecord, Setting};
use serde::Deserialize;
use std::fmt;

/// File names whose modification is recorded as a configuration change
const CONFIG_FILES: &[&str] = &[
    "package.json",
    "go.mod",
    "requirements.txt",
    "Dockerfile",
    "docker-compose.yml",
    ".env",
];

const BUILD_MARKERS: &[&str] = &["npm run build", "go build", "make build"];
const TEST_MARKERS: &[&str] = &["npm test", "go test", "pytest"];
const START_MARKERS: &[&str] = &["npm start", "go run"];
const DEPLOY_MARKERS: &[&str] = &["deploy", "scp", "rsync", "docker push", "git push"];

const TITLE_CHARS: usize = 50;

/// Tool kinds the classifier understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolKind {
    Edit,
    Write,
    MultiEdit,
    Bash,
    WebFetch,
    WebSearch,
    Other(String),
}

impl ToolKind {
    pub fn parse(name: &str) -> Self {
        match name {
            "Edit" => ToolKind::Edit,
            "Write" => ToolKind::Write,
            "MultiEdit" => ToolKind::MultiEdit,
            "Bash" => ToolKind::Bash,
            "WebFetch" => ToolKind::WebFetch,
            "WebSearch" => ToolKind::WebSearch,
            other => ToolKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ToolKind::Edit => "Edit",
            ToolKind::Write => "Write",
            ToolKind::MultiEdit => "MultiEdit",
            ToolKind::Bash => "Bash",
            ToolKind::WebFetch => "WebFetch",
            ToolKind::WebSearch => "WebSearch",
            ToolKind::Other(name) => name,
        }
    }

    pub fn is_file_mutation(&self) -> bool {
        matches!(self, ToolKind::Edit | ToolKind::Write | ToolKind::MultiEdit)
    }

    pub fn is_research(&self) -> bool {
        matches!(self, ToolKind::WebFetch | ToolKind::WebSearch)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_success() -> bool {
    true
}

/// A completed tool invocation reported by the host
#[derive(Debug, Clone, Deserialize)]
pub struct ToolEvent {
    #[serde(default)]
    pub tool_name: String,
    #[serde(default)]
    pub parameters: serde_json::Map<String, serde_json::Value>,
    #[serde(default = "default_success")]
    pub success: bool,
}

impl Default for ToolEvent {
    fn default() -> Self {
        Self {
            tool_name: String::new(),
            parameters: serde_json::Map::new(),
            success: true,
        }
    }
}

impl ToolEvent {
    pub fn new(tool_name: impl Into<String>, parameters: serde_json::Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            parameters: match parameters {
                serde_json::Value::Object(map) => map,
                _ => serde_json::Map::new(),
            },
            success: true,
        }
    }

    pub fn kind(&self) -> ToolKind {
        ToolKind::parse(&self.tool_name)
    }

    /// A non-empty string parameter
    pub fn param(&self, key: &str) -> Option<&str> {
        self.parameters
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
    }
}

/// Text after the last `/`; empty for paths ending in a separator
fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn contains_any_lowercase(command: &str, markers: &[&str]) -> bool {
    let lowered = command.to_lowercase();
    markers.iter().any(|m| lowered.contains(m))
}

/// Which rule a significant shell command falls under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandCategory {
    Build,
    Test,
    Start,
    Deployment,
    General,
}

impl CommandCategory {
    /// First matching rule wins: build, test, start, deployment.
    pub fn of(command: &str) -> Self {
        let contains_any = |markers: &[&str]| markers.iter().any(|m| command.contains(m));

        if contains_any(BUILD_MARKERS) {
            CommandCategory::Build
        } else if contains_any(TEST_MARKERS) {
            CommandCategory::Test
        } else if contains_any(START_MARKERS)
            || (command.contains("python") && command.contains("main"))
        {
            CommandCategory::Start
        } else if contains_any_lowercase(command, DEPLOY_MARKERS) {
            CommandCategory::Deployment
        } else {
            CommandCategory::General
        }
    }
}

/// Rule-based classifier for tool-completion events
pub struct ToolClassifier;

impl ToolClassifier {
    /// Classify one tool event into records.
    pub fn classify(event: &ToolEvent) -> Vec<KnowledgeRecord> {
        if !event.success {
            return Vec::new();
        }

        let kind = event.kind();
        if kind.is_file_mutation() {
            Self::file_mutation(&kind, event)
        } else if kind == ToolKind::Bash {
            Self::shell_command(event)
        } else if kind.is_research() {
            Self::research(event)
        } else {
            Vec::new()
        }
    }

    fn file_mutation(kind: &ToolKind, event: &ToolEvent) -> Vec<KnowledgeRecord> {
        let Some(file_path) = event.param("file_path") else {
            return Vec::new();
        };

        let filename = basename(file_path).to_string();

        let mut records: Vec<KnowledgeRecord> = vec![Knowledge::new(
            format!("File Modified: {}", filename),
            format!(
                "Claude modified {} using {} tool. This indicates active development on this component.",
                file_path, kind
            ),
            "development",
        )
        .tags(&["file-modification"])
        .tag(kind.as_str().to_lowercase())
        .tag(filename.clone())
        .into()];

        if CONFIG_FILES.contains(&filename.as_str()) {
            records.push(
                Setting::new(
                    "config",
                    format!("{}_modified", filename),
                    "true",
                    format!("Configuration file {} was recently modified", filename),
                )
                .into(),
            );
        }

        records
    }

    fn shell_command(event: &ToolEvent) -> Vec<KnowledgeRecord> {
        let Some(command) = event.param("command") else {
            return Vec::new();
        };
        if !is_significant(command) {
            return Vec::new();
        }

        let record: KnowledgeRecord = match CommandCategory::of(command) {
            CommandCategory::Build => Self::command_setting("build", "Build", command),
            CommandCategory::Test => Self::command_setting("test", "Test", command),
            CommandCategory::Start => Self::command_setting("start", "Start", command),
            CommandCategory::Deployment => Deployment {
                environment: "discovered".to_string(),
                deployment_steps: format!("Command used: {}", command),
                test_verification: "Verify deployment manually".to_string(),
            }
            .into(),
            CommandCategory::General => Knowledge::new(
                format!("Command Executed: {}", truncate_chars(command, TITLE_CHARS)),
                format!(
                    "Claude executed: {}. This may indicate a development workflow step.",
                    command
                ),
                "development",
            )
            .tags(&["command", "bash", "workflow"])
            .into(),
        };

        vec![record]
    }

    fn command_setting(category: &str, label: &str, command: &str) -> KnowledgeRecord {
        Setting::new(
            category,
            "command",
            command.trim(),
            format!("{} command discovered from Claude's actions", label),
        )
        .into()
    }

    fn research(event: &ToolEvent) -> Vec<KnowledgeRecord> {
        let Some(target) = event.param("url").or_else(|| event.param("query")) else {
            return Vec::new();
        };

        vec![Knowledge::new(
            format!("Research: {}", truncate_chars(target, TITLE_CHARS)),
            format!(
                "Claude researched: {}. This indicates learning about external resources or documentation.",
                target
            ),
            "research",
        )
        .tags(&["research", "external", "documentation"])
        .into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::Operation;
    use serde_json::json;

    fn bash(command: &str) -> Vec<KnowledgeRecord> {
        ToolClassifier::classify(&ToolEvent::new("Bash", json!({ "command": command })))
    }

    fn setting(record: &KnowledgeRecord) -> &Setting {
        match record {
            KnowledgeRecord::Setting(s) => s,
            other => panic!("expected setting, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_event_dropped() {
        let mut event = ToolEvent::new("Bash", json!({ "command": "go build ./..." }));
        event.success = false;
        assert!(ToolClassifier::classify(&event).is_empty());
    }

    #[test]
    fn test_event_deserialize_defaults() {
        let event: ToolEvent = serde_json::from_str(r#"{"tool_name": "Edit"}"#).unwrap();
        assert!(event.success);
        assert!(event.parameters.is_empty());
        assert_eq!(event.kind(), ToolKind::Edit);
    }

    #[test]
    fn test_build_command() {
        let records = bash("go build ./...");
        assert_eq!(records.len(), 1);

        let s = setting(&records[0]);
        assert_eq!(s.category, "build");
        assert_eq!(s.key, "command");
        assert_eq!(s.value, "go build ./...");
    }

    #[test]
    fn test_build_checked_before_test() {
        let records = bash("npm test && go build");
        assert_eq!(setting(&records[0]).category, "build");
    }

    #[test]
    fn test_test_command_trimmed() {
        let records = bash("  pytest -q tests/  ");
        let s = setting(&records[0]);
        assert_eq!(s.category, "test");
        assert_eq!(s.value, "pytest -q tests/");
    }

    #[test]
    fn test_start_commands() {
        assert_eq!(CommandCategory::of("npm start"), CommandCategory::Start);
        assert_eq!(CommandCategory::of("go run ./cmd/api"), CommandCategory::Start);
        assert_eq!(CommandCategory::of("python main.py"), CommandCategory::Start);
        assert_eq!(CommandCategory::of("python manage.py migrate"), CommandCategory::General);
    }

    #[test]
    fn test_deployment_case_insensitive() {
        let records = bash("./scripts/DEPLOY.sh production");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].operation(), Operation::LearnDeployment);

        let KnowledgeRecord::Deployment(d) = &records[0] else {
            panic!("expected deployment");
        };
        assert_eq!(d.environment, "discovered");
        assert_eq!(d.deployment_steps, "Command used: ./scripts/DEPLOY.sh production");
    }

    #[test]
    fn test_git_push_is_deployment() {
        assert_eq!(
            CommandCategory::of("git push origin main"),
            CommandCategory::Deployment
        );
    }

    #[test]
    fn test_general_command_truncated_title() {
        let command = format!("cargo clippy --all-targets {}", "x".repeat(80));
        let records = bash(&command);

        let KnowledgeRecord::Knowledge(k) = &records[0] else {
            panic!("expected knowledge");
        };
        assert_eq!(k.title, format!("Command Executed: {}", &command[..50]));
        assert!(k.content.contains(&command));
        assert_eq!(k.category, "development");
    }

    #[test]
    fn test_insignificant_command_ignored() {
        assert!(bash("git status").is_empty());
        assert!(bash("ls -la").is_empty());
        assert!(bash("").is_empty());
    }

    #[test]
    fn test_file_mutation_config_file() {
        let event = ToolEvent::new("Write", json!({ "file_path": "/work/app/package.json" }));
        let records = ToolClassifier::classify(&event);

        assert_eq!(records.len(), 2);
        let KnowledgeRecord::Knowledge(k) = &records[0] else {
            panic!("expected knowledge");
        };
        assert_eq!(k.title, "File Modified: package.json");
        assert_eq!(k.tags, vec!["file-modification", "write", "package.json"]);
        assert!(k.content.contains("/work/app/package.json using Write tool"));

        let s = setting(&records[1]);
        assert_eq!(s.category, "config");
        assert_eq!(s.key, "package.json_modified");
        assert_eq!(s.value, "true");
    }

    #[test]
    fn test_file_mutation_regular_file() {
        let event = ToolEvent::new("MultiEdit", json!({ "file_path": "src/lib.rs" }));
        let records = ToolClassifier::classify(&event);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].operation(), Operation::AddKnowledge);
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("/work/app/package.json"), "package.json");
        assert_eq!(basename("Cargo.toml"), "Cargo.toml");
        assert_eq!(basename("src/"), "");
        assert_eq!(basename("/"), "");
    }

    #[test]
    fn test_file_mutation_directory_path() {
        let event = ToolEvent::new("Edit", json!({ "file_path": "config/package.json/" }));
        let records = ToolClassifier::classify(&event);

        assert_eq!(records.len(), 1);
        let KnowledgeRecord::Knowledge(k) = &records[0] else {
            panic!("expected knowledge");
        };
        assert_eq!(k.title, "File Modified: ");
    }

    #[test]
    fn test_file_mutation_requires_path() {
        let event = ToolEvent::new("Edit", json!({ "file_path": "" }));
        assert!(ToolClassifier::classify(&event).is_empty());
    }

    #[test]
    fn test_research_prefers_url() {
        let event = ToolEvent::new(
            "WebFetch",
            json!({ "url": "https://docs.rs/regex", "query": "regex docs" }),
        );
        let records = ToolClassifier::classify(&event);

        let KnowledgeRecord::Knowledge(k) = &records[0] else {
            panic!("expected knowledge");
        };
        assert_eq!(k.title, "Research: https://docs.rs/regex");
        assert_eq!(k.category, "research");
    }

    #[test]
    fn test_research_query_truncated() {
        let query = "how to ".repeat(20);
        let event = ToolEvent::new("WebSearch", json!({ "query": query.clone() }));
        let records = ToolClassifier::classify(&event);

        let KnowledgeRecord::Knowledge(k) = &records[0] else {
            panic!("expected knowledge");
        };
        assert_eq!(k.title.chars().count(), "Research: ".len() + 50);
        assert!(k.content.contains(query.as_str()));
    }

    #[test]
    fn test_unknown_tool_ignored() {
        let event = ToolEvent::new("Read", json!({ "file_path": "src/main.rs" }));
        assert!(ToolClassifier::classify(&event).is_empty());
        assert_eq!(event.kind(), ToolKind::Other("Read".to_string()));
    }
}
