//! RuleStore trait — the abstraction over rule persistence.
//!
//! Implementations live in `replygate-store`. The policy layer only ever sees
//! this trait, so the persisted slot can be a file on disk, an in-process
//! value for tests, or whatever the embedding application provides.

use crate::error::StoreError;
use crate::rules::RuleSet;

/// Persistence for the [`RuleSet`] aggregate.
///
/// The slot holds at most one record. `save` always writes the full
/// aggregate, replacing any previous value (last write wins); there are no
/// partial updates. All operations are synchronous — each call completes or
/// fails within the caller's control-flow turn.
pub trait RuleStore: Send + Sync {
    /// Human-readable store name (e.g. "file", "memory").
    fn name(&self) -> &str;

    /// Read the persisted aggregate.
    ///
    /// An empty slot yields the default `RuleSet`. An unreadable or malformed
    /// record is an error; callers substitute defaults and log.
    fn load(&self) -> Result<RuleSet, StoreError>;

    /// Write the full aggregate, replacing any previous record.
    fn save(&self, rules: &RuleSet) -> Result<(), StoreError>;
}
