//! # Replygate Core
//!
//! Domain types, the rule aggregate, and error definitions for the replygate
//! mention policy. This crate has **zero framework dependencies** — it defines
//! the data model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The persisted configuration is a single owned [`RuleSet`] aggregate that is
//! loaded once, mutated explicitly, and written back whole. Persistence is
//! abstracted behind the [`RuleStore`] trait so the policy layer never knows
//! where the record lives. Evaluation inputs travel as an ephemeral
//! [`ReplyContext`] — created per decision, never stored.

pub mod context;
pub mod error;
pub mod rules;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use context::ReplyContext;
pub use error::{Error, HostError, Result, StoreError};
pub use rules::{RuleList, RuleSet};
pub use store::RuleStore;
