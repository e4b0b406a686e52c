//! The stateful policy handle — owned rules, write-through persistence, and
//! gated decision logging around the pure engine.

use chrono::{DateTime, Utc};
use replygate_core::{ReplyContext, RuleList, RuleSet, RuleStore};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tracing::{debug, info, warn};

use crate::engine::{self, Outcome};

/// An entry in the bounded in-memory decision log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionLogEntry {
    pub timestamp: DateTime<Utc>,
    pub target_user_id: Option<String>,
    pub server_id: Option<String>,
    pub is_dm: bool,
    pub outcome: Outcome,
    pub mention: bool,
}

/// Maximum decision log entries kept in memory.
const MAX_DECISION_LOG: usize = 1_000;

/// The mention policy.
///
/// Owns the [`RuleSet`] for the process lifetime and writes the full
/// aggregate through to the store after every mutation. The engine itself
/// never mutates anything — each evaluation reads an immutable snapshot.
///
/// A single lock guards the rules; the design assumes serialized access, and
/// one guard is all a multi-threaded embedding needs.
pub struct MentionPolicy {
    rules: RwLock<RuleSet>,
    store: Box<dyn RuleStore>,
    log: RwLock<Vec<DecisionLogEntry>>,
}

impl MentionPolicy {
    /// Construct by merging the persisted record over defaults.
    ///
    /// A failed read logs a warning and starts from defaults; the store stays
    /// attached so later mutations still persist.
    pub fn load(store: Box<dyn RuleStore>) -> Self {
        let rules = match store.load() {
            Ok(rules) => rules,
            Err(e) => {
                warn!(
                    store = store.name(),
                    error = %e,
                    "Failed to load rules, starting from defaults"
                );
                RuleSet::default()
            }
        };
        Self {
            rules: RwLock::new(rules),
            store,
            log: RwLock::new(Vec::new()),
        }
    }

    // ── Evaluation boundary ────────────────────────────────────────

    /// Decide whether the reply described by `ctx` should mention its target.
    ///
    /// The hot path: one snapshot read, one pure evaluation, no persistence.
    pub fn should_mention(&self, ctx: &ReplyContext) -> bool {
        // Snapshot: the rules are immutable for the duration of this call.
        let rules = self.rules.read().unwrap().clone();
        let outcome = engine::explain(ctx, &rules);
        let mention = outcome.mention();

        if rules.enable_logging {
            info!(
                target_user = ?ctx.target_user(),
                server = ?ctx.server(),
                is_dm = ctx.is_dm,
                mention,
                "Decision: {}",
                outcome.reason()
            );
            if rules.verbose_logging {
                debug!(
                    whitelist = rules.whitelist.len(),
                    blacklist = rules.blacklist.len(),
                    ping_servers = rules.ping_servers.len(),
                    blacklist_servers = rules.blacklist_servers.len(),
                    ping_in_dms = rules.ping_in_dms,
                    whitelist_override = rules.server_blacklist_respects_whitelist,
                    "Rule snapshot at decision time"
                );
            }
        }

        let entry = DecisionLogEntry {
            timestamp: Utc::now(),
            target_user_id: ctx.target_user().map(String::from),
            server_id: ctx.server().map(String::from),
            is_dm: ctx.is_dm,
            outcome,
            mention,
        };
        {
            let mut log = self.log.write().unwrap();
            if log.len() >= MAX_DECISION_LOG {
                log.drain(..MAX_DECISION_LOG / 10);
            }
            log.push(entry);
        }

        mention
    }

    // ── Mutation boundary ──────────────────────────────────────────

    /// Add an identifier to the named list. Idempotent; empty ids are a
    /// no-op; persists only when the set actually changed.
    pub fn add(&self, list: RuleList, id: &str) {
        let changed = self.rules.write().unwrap().insert(list, id);
        if changed {
            self.persist();
        }
    }

    /// Remove an identifier from the named list. No-op if absent.
    pub fn remove(&self, list: RuleList, id: &str) {
        let changed = self.rules.write().unwrap().remove(list, id);
        if changed {
            self.persist();
        }
    }

    /// Replace a list wholesale from parsed free text.
    pub fn replace_list<I>(&self, list: RuleList, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.rules.write().unwrap().replace(list, ids);
        self.persist();
    }

    /// Whether replies in DMs mention by default.
    pub fn set_ping_in_dms(&self, value: bool) {
        self.mutate(|rules| rules.ping_in_dms = value);
    }

    /// Whether a whitelisted user bypasses a blacklisted server.
    pub fn set_server_blacklist_respects_whitelist(&self, value: bool) {
        self.mutate(|rules| rules.server_blacklist_respects_whitelist = value);
    }

    /// Decision-log gating flags.
    pub fn set_logging(&self, enable: bool, verbose: bool) {
        self.mutate(|rules| {
            rules.enable_logging = enable;
            rules.verbose_logging = verbose;
        });
    }

    fn mutate(&self, f: impl FnOnce(&mut RuleSet)) {
        f(&mut self.rules.write().unwrap());
        self.persist();
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Membership query for toggle/checkbox state.
    pub fn contains(&self, list: RuleList, id: &str) -> bool {
        self.rules.read().unwrap().contains(list, id)
    }

    /// A snapshot of the current rules.
    pub fn rules(&self) -> RuleSet {
        self.rules.read().unwrap().clone()
    }

    /// The recorded decisions, oldest first.
    pub fn decision_log(&self) -> Vec<DecisionLogEntry> {
        self.log.read().unwrap().clone()
    }

    /// Write the full aggregate through to the store.
    ///
    /// A failed write is logged and otherwise ignored: the in-memory rules
    /// remain authoritative until the next successful write or restart.
    fn persist(&self) {
        let snapshot = self.rules.read().unwrap().clone();
        if let Err(e) = self.store.save(&snapshot) {
            warn!(
                store = self.store.name(),
                error = %e,
                "Failed to persist rules; in-memory rules remain authoritative"
            );
        }
    }
}
