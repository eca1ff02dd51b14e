//! Knowledge sink abstraction
//!
//! Classifiers never talk to the store directly. They hand records to a
//! [`KnowledgeSink`]; the process-backed sink is used in production and the
//! in-memory sinks in tests.

use crate::error::{Error, Result};
use crate::knowledge::KnowledgeRecord;
use std::sync::Mutex;

/// Destination for knowledge records.
pub trait KnowledgeSink: Send + Sync {
    /// Submit one record, returning the store's parsed response.
    fn submit(&self, record: &KnowledgeRecord) -> Result<serde_json::Value>;

    /// Human-readable name for this sink (used in logs).
    fn name(&self) -> &str;
}

/// Submit a record and absorb any failure.
///
/// This is the advisory boundary: every error is logged at debug level and
/// turned into `None`.
pub fn dispatch(sink: &dyn KnowledgeSink, record: &KnowledgeRecord) -> Option<serde_json::Value> {
    match sink.submit(record) {
        Ok(response) => {
            tracing::debug!(
                sink = sink.name(),
                operation = %record.operation(),
                record = record.label(),
                "Record accepted"
            );
            Some(response)
        }
        Err(e) if e.is_advisory_skip() => {
            tracing::debug!(sink = sink.name(), reason = %e, "Memory store unavailable, record skipped");
            None
        }
        Err(e) => {
            tracing::debug!(
                sink = sink.name(),
                operation = %record.operation(),
                error = %e,
                "Record dispatch failed"
            );
            None
        }
    }
}

/// Discards every record.
#[derive(Debug, Default)]
pub struct NoopSink;

impl KnowledgeSink for NoopSink {
    fn submit(&self, _record: &KnowledgeRecord) -> Result<serde_json::Value> {
        Ok(serde_json::Value::Null)
    }

    fn name(&self) -> &str {
        "noop"
    }
}

/// Keeps every submitted record in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<KnowledgeRecord>>,
    reject: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that records submissions but fails every one of them
    pub fn rejecting() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            reject: true,
        }
    }

    /// Records submitted so far, in order
    pub fn records(&self) -> Vec<KnowledgeRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KnowledgeSink for RecordingSink {
    fn submit(&self, record: &KnowledgeRecord) -> Result<serde_json::Value> {
        self.records
            .lock()
            .map_err(|_| Error::Internal("recording sink lock poisoned".to_string()))?
            .push(record.clone());

        if self.reject {
            return Err(Error::Rejected { code: Some(1) });
        }
        Ok(serde_json::json!({ "ok": true }))
    }

    fn name(&self) -> &str {
        "recording"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::Setting;

    fn record() -> KnowledgeRecord {
        Setting::new("test", "command", "cargo test", "Test command").into()
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        dispatch(&sink, &record());
        dispatch(
            &sink,
            &Setting::new("build", "command", "cargo build", "Build command").into(),
        );

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], record());
    }

    #[test]
    fn test_dispatch_returns_response() {
        let sink = RecordingSink::new();
        let response = dispatch(&sink, &record());
        assert_eq!(response, Some(serde_json::json!({ "ok": true })));
    }

    #[test]
    fn test_dispatch_absorbs_failure() {
        let sink = RecordingSink::rejecting();
        assert!(dispatch(&sink, &record()).is_none());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_noop_sink() {
        assert_eq!(dispatch(&NoopSink, &record()), Some(serde_json::Value::Null));
    }
}
