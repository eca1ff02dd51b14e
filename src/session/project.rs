//! Session-start project detection
//!
//! Looks for well-known project manifests and records the conventional
//! start/test/build commands they imply.

use crate::error::Result;
use crate::knowledge::{Knowledge, KnowledgeRecord, Setting};
use std::path::Path;

/// The record announcing a new session
pub fn session_started() -> KnowledgeRecord {
    Knowledge::new(
        "Claude Code Session Started",
        "New development session started in project. Ready to assist with development tasks.",
        "process",
    )
    .tags(&["session", "claude-code"])
    .into()
}

fn command_setting(category: &str, value: &str, description: String) -> KnowledgeRecord {
    Setting::new(category, "command", value, description).into()
}

/// Detects project settings from files in the project directory
pub struct ProjectDetector;

impl ProjectDetector {
    /// Settings for every recognized manifest, in a fixed order: npm, Go,
    /// Python. A manifest that cannot be read contributes nothing.
    pub fn detect(project_dir: &Path) -> Vec<KnowledgeRecord> {
        let mut records = Vec::new();

        let package_json = project_dir.join("package.json");
        if package_json.exists() {
            match Self::npm_settings(&package_json) {
                Ok(settings) => records.extend(settings),
                Err(e) => {
                    tracing::debug!(path = %package_json.display(), error = %e, "Skipping package.json");
                }
            }
        }

        if project_dir.join("go.mod").exists() {
            records.push(command_setting(
                "start",
                "go run .",
                "Go project - run main package".to_string(),
            ));
            records.push(command_setting(
                "test",
                "go test ./...",
                "Go project - run all tests".to_string(),
            ));
        }

        if project_dir.join("requirements.txt").exists()
            || project_dir.join("pyproject.toml").exists()
        {
            records.push(command_setting(
                "start",
                "python main.py",
                "Python project - run main script".to_string(),
            ));
            records.push(command_setting(
                "test",
                "pytest",
                "Python project - run tests with pytest".to_string(),
            ));
        }

        records
    }

    fn npm_settings(path: &Path) -> Result<Vec<KnowledgeRecord>> {
        let content = std::fs::read_to_string(path)?;
        let package: serde_json::Value = serde_json::from_str(&content)?;

        let Some(scripts) = package.get("scripts").and_then(|s| s.as_object()) else {
            return Ok(Vec::new());
        };

        let script = |name: &str| {
            scripts.get(name).map(|body| match body {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        };

        let mut records = Vec::new();
        if let Some(body) = script("start") {
            records.push(command_setting(
                "start",
                "npm start",
                format!("Start command: {}", body),
            ));
        }
        if let Some(body) = script("test") {
            records.push(command_setting("test", "npm test", format!("Test command: {}", body)));
        }
        if let Some(body) = script("build") {
            records.push(command_setting(
                "build",
                "npm run build",
                format!("Build command: {}", body),
            ));
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings(records: &[KnowledgeRecord]) -> Vec<(String, String)> {
        records
            .iter()
            .map(|r| match r {
                KnowledgeRecord::Setting(s) => (s.category.clone(), s.value.clone()),
                other => panic!("expected setting, got {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_empty_project() {
        let dir = TempDir::new().unwrap();
        assert!(ProjectDetector::detect(dir.path()).is_empty());
    }

    #[test]
    fn test_npm_scripts() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"name": "app", "scripts": {"build": "vite build", "test": "vitest"}}"#,
        )
        .unwrap();

        let records = ProjectDetector::detect(dir.path());
        assert_eq!(
            settings(&records),
            vec![
                ("test".to_string(), "npm test".to_string()),
                ("build".to_string(), "npm run build".to_string()),
            ]
        );

        let KnowledgeRecord::Setting(build) = &records[1] else {
            panic!("expected setting");
        };
        assert_eq!(build.description, "Build command: vite build");
    }

    #[test]
    fn test_invalid_package_json_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("package.json"), "{ not json").unwrap();
        std::fs::write(dir.path().join("go.mod"), "module example.com/app\n").unwrap();

        let records = ProjectDetector::detect(dir.path());
        assert_eq!(
            settings(&records),
            vec![
                ("start".to_string(), "go run .".to_string()),
                ("test".to_string(), "go test ./...".to_string()),
            ]
        );
    }

    #[test]
    fn test_python_project() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pyproject.toml"), "[project]\nname = \"app\"\n").unwrap();

        let records = ProjectDetector::detect(dir.path());
        assert_eq!(
            settings(&records),
            vec![
                ("start".to_string(), "python main.py".to_string()),
                ("test".to_string(), "pytest".to_string()),
            ]
        );
    }

    #[test]
    fn test_session_started_record() {
        let KnowledgeRecord::Knowledge(k) = session_started() else {
            panic!("expected knowledge");
        };
        assert_eq!(k.title, "Claude Code Session Started");
        assert_eq!(k.category, "process");
        assert_eq!(k.tags, vec!["session", "claude-code"]);
    }
}
