//! # triage_core
//!
//! Core domain logic for the support triage relay.
//!
//! - [`webhook`]: outbound payload and single-shot forwarding to the n8n workflow
//! - [`session`]: client session identifiers
//! - [`storage`]: file-backed key-value store standing in for browser storage
//! - [`chat`]: chat client state machine with persisted history
//! - [`triage`]: lenient view over the opaque triage response
//! - [`analysis`]: classification and response generation behind the workflow

pub mod analysis;
pub mod chat;
pub mod models;
pub mod session;
pub mod storage;
pub mod triage;
pub mod webhook;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
