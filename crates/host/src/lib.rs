//! Host integration for replygate.
//!
//! The host application owns message composition; this crate supplies the one
//! callback it needs to invoke before finalizing a reply, plus the machinery
//! to pull identity out of whatever payload shape the host's pipeline
//! carries. The policy itself never depends on any of this — the hook is an
//! observer around it.

pub mod extract;
pub mod hook;

pub use hook::{ComposeHook, ComposeRequest, ContextTracker, HostBridge, install};
