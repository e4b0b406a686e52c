//! Mention policy — decides whether a reply should ping its target.
//!
//! Layered, mutable rule sets (per-user allow/deny, per-server allow/deny,
//! and a DM default) are evaluated under a fixed precedence order. The user
//! blacklist is absolute; a blacklisted server suppresses mentions unless the
//! whitelist-override flag lets a whitelisted user through; everything else
//! falls back to a conservative "do not ping".
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌───────────────┐    ┌────────────┐
//! │ Host compose │───▶│ MentionPolicy │───▶│ RuleStore  │
//! │ hook         │    │ (RuleSet)     │    │ (persisted │
//! └──────────────┘    └───────┬───────┘    │  slot)     │
//!                             │            └────────────┘
//!                       ┌─────┴─────┐
//!                       │  Outcome  │
//!                       │ mention / │
//!                       │ suppress  │
//!                       └───────────┘
//! ```
//!
//! [`engine::evaluate`] is the pure core: `(ReplyContext, RuleSet) -> bool`,
//! deterministic and total. [`MentionPolicy`] wraps it with the owned rule
//! state, write-through persistence, and gated decision logging.

pub mod engine;
pub mod parser;
mod policy;

pub use engine::{Outcome, evaluate, explain};
pub use parser::parse_id_list;
pub use policy::{DecisionLogEntry, MentionPolicy};
