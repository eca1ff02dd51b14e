//! Process-backed knowledge sink
//!
//! Each record is one invocation of the store executable: the envelope goes
//! to its stdin, one JSON response comes back on stdout. The call blocks
//! until the process exits; there is no timeout.

use super::protocol::Envelope;
use super::sink::KnowledgeSink;
use crate::config::DispatchConfig;
use crate::error::{Error, Result};
use crate::knowledge::KnowledgeRecord;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Sink that shells out to the memory store executable
#[derive(Debug, Clone)]
pub struct ProcessSink {
    config: DispatchConfig,
    project_dir: PathBuf,
}

impl ProcessSink {
    pub fn new(config: DispatchConfig, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            project_dir: project_dir.into(),
        }
    }

    /// Absolute location of the marker file for this project
    pub fn marker_path(&self) -> PathBuf {
        self.project_dir.join(&self.config.marker_path)
    }

    /// Wire name for an operation
    pub fn tool_name(&self, operation: &str) -> String {
        format!("{}{}", self.config.tool_prefix, operation)
    }

    /// Call one store operation.
    ///
    /// Short-circuits before spawning anything when the marker file is
    /// absent or the executable cannot be found.
    pub fn call(&self, operation_name: &str, arguments: serde_json::Value) -> Result<serde_json::Value> {
        let marker = self.marker_path();
        if !marker.exists() {
            return Err(Error::Uninitialized(marker.display().to_string()));
        }

        let executable = resolve_executable(&self.config.executable)?;
        let envelope = Envelope::call_tool(operation_name, arguments);
        let payload = serde_json::to_vec(&envelope)?;

        tracing::debug!(
            executable = %executable.display(),
            operation = operation_name,
            cwd = %self.project_dir.display(),
            "Invoking memory store"
        );

        let mut child = Command::new(&executable)
            .args(&self.config.args)
            .current_dir(&self.project_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // A store may answer and exit before draining stdin; only its exit
        // status and stdout decide the outcome.
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&payload) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    tracing::debug!("Memory store closed stdin before reading the full request");
                }
                Err(e) => {
                    drop(stdin);
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(e.into());
                }
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            tracing::debug!(
                code = ?output.status.code(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "Memory store rejected request"
            );
            return Err(Error::Rejected {
                code: output.status.code(),
            });
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

impl KnowledgeSink for ProcessSink {
    fn submit(&self, record: &KnowledgeRecord) -> Result<serde_json::Value> {
        let name = self.tool_name(record.operation().as_str());
        self.call(&name, record.arguments()?)
    }

    fn name(&self) -> &str {
        "process"
    }
}

/// Locate the store executable.
///
/// Names containing a path separator are taken as-is. Bare names are looked
/// up with `which`, then in common install locations.
pub fn resolve_executable(name: &str) -> Result<PathBuf> {
    if name.contains(std::path::MAIN_SEPARATOR) || name.contains('/') {
        let path = PathBuf::from(name);
        return if path.is_file() {
            Ok(path)
        } else {
            Err(Error::ExecutableNotFound(name.to_string()))
        };
    }

    if let Ok(output) = Command::new("which")
        .arg(name)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
    {
        if output.status.success() {
            let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
    }

    let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let candidates = [
        home.join(".local").join("bin").join(name),
        home.join(".cargo").join("bin").join(name),
        PathBuf::from("/usr/local/bin").join(name),
        PathBuf::from("/opt/homebrew/bin").join(name),
    ];

    candidates
        .iter()
        .find(|candidate| candidate.is_file())
        .cloned()
        .ok_or_else(|| Error::ExecutableNotFound(name.to_string()))
}
