//! In-memory rule store — an in-process slot with no durability.
//!
//! Useful for tests and for embedding the policy without touching disk.

use replygate_core::{RuleSet, RuleStore, StoreError};
use std::sync::Mutex;

/// A store whose slot lives in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    slot: Mutex<Option<RuleSet>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a record already in the slot.
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            slot: Mutex::new(Some(rules)),
        }
    }

    /// Is there a record in the slot?
    pub fn is_empty(&self) -> bool {
        self.slot.lock().unwrap().is_none()
    }
}

impl RuleStore for InMemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self) -> Result<RuleSet, StoreError> {
        Ok(self.slot.lock().unwrap().clone().unwrap_or_default())
    }

    fn save(&self, rules: &RuleSet) -> Result<(), StoreError> {
        *self.slot.lock().unwrap() = Some(rules.clone());
        Ok(())
    }
}
