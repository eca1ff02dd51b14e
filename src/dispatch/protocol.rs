//! Memory store request envelope
//!
//! A single JSON-RPC style message per call:
//!
//! ```text
//! {"jsonrpc": "2.0", "id": 1, "method": "call_tool",
//!  "params": {"name": "<operation>", "arguments": {...}}}
//! ```

use serde::Serialize;

/// Protocol version marker
pub const PROTOCOL_VERSION: &str = "2.0";

/// The only method the store is called with
pub const CALL_TOOL: &str = "call_tool";

/// Request wrapper written to the store's stdin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub jsonrpc: String,
    /// Always 1: every process handles exactly one request
    pub id: u64,
    pub method: String,
    pub params: ToolCall,
}

/// Named operation and its arguments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCall {
    pub name: String,
    pub arguments: serde_json::Value,
}

impl Envelope {
    pub fn call_tool(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            jsonrpc: PROTOCOL_VERSION.to_string(),
            id: 1,
            method: CALL_TOOL.to_string(),
            params: ToolCall {
                name: name.into(),
                arguments,
            },
        }
    }
}
