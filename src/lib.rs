//! Knowledge Hooks - Advisory knowledge capture for coding-assistant sessions
//!
//! Knowledge Hooks runs as a short-lived process for every host event
//! (assistant response, tool completion, session start/end), turns what it
//! sees into structured knowledge records, and hands them to an external
//! memory store executable.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Host session (stdin)                      │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ one JSON payload per event
//! ┌──────────────────────────────▼───────────────────────────────┐
//! │                         HookRunner                            │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────────────┐  │
//! │  │  Extraction  │ │    Tools     │ │       Session        │  │
//! │  │  (insights)  │ │ (classifier) │ │ (start / summarize)  │  │
//! │  └──────┬───────┘ └──────┬───────┘ └──────────┬───────────┘  │
//! │         └────────────────┴────────────────────┘              │
//! │                          │ KnowledgeRecord                    │
//! │  ┌───────────────────────▼───────────────────────────────┐   │
//! │  │                  KnowledgeSink                         │   │
//! │  │  - Marker file check                                   │   │
//! │  │  - One process per record, envelope on stdin           │   │
//! │  └───────────────────────┬───────────────────────────────┘   │
//! └──────────────────────────┼───────────────────────────────────┘
//!                            │
//!                 ┌──────────▼──────────┐
//!                 │ memory store (ccmem) │
//!                 └─────────────────────┘
//! ```
//!
//! Every failure is advisory: it is logged at debug level and swallowed, and
//! the host session never sees it.
//!
//! ## Modules
//!
//! - [`hooks`]: Event payloads and the hook runner
//! - [`extraction`]: Pattern-based insight extraction from free text
//! - [`tools`]: Tool-completion classification
//! - [`session`]: Session start detection and end-of-session summary
//! - [`knowledge`]: Knowledge records and store operations
//! - [`dispatch`]: Delivery of records to the memory store
//! - [`config`]: Configuration management

pub mod config;
pub mod dispatch;
pub mod error;
pub mod extraction;
pub mod hooks;
pub mod knowledge;
pub mod session;
pub mod tools;

pub use config::HooksConfig;
pub use error::{Error, Result};
pub use hooks::{HookContext, HookOutcome, HookRunner};
pub use knowledge::KnowledgeRecord;
