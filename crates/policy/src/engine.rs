//! The decision engine — pure precedence evaluation.
//!
//! [`evaluate`] maps one context snapshot plus one rule snapshot to a
//! boolean. It is deterministic, side-effect-free, and total: any well-formed
//! input produces a decision, and a missing identity field simply never
//! matches the rules that need it.

use replygate_core::{ReplyContext, RuleSet};
use serde::{Deserialize, Serialize};

/// Which precedence rule decided the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The target user is blacklisted. Absolute — nothing overrides it.
    UserBlacklisted,
    /// The server is blacklisted and no whitelist override applies.
    ServerBlacklisted,
    /// The target user is whitelisted.
    UserWhitelisted,
    /// The server pings by default.
    ServerPings,
    /// DM context with the DM default enabled.
    DmDefault,
    /// No rule matched — conservative default, no mention.
    NoRule,
}

impl Outcome {
    /// Collapse to the mention decision.
    pub fn mention(&self) -> bool {
        matches!(
            self,
            Outcome::UserWhitelisted | Outcome::ServerPings | Outcome::DmDefault
        )
    }

    /// Short reason string for logs and the CLI dry run.
    pub fn reason(&self) -> &'static str {
        match self {
            Outcome::UserBlacklisted => "user is blacklisted",
            Outcome::ServerBlacklisted => "server is blacklisted",
            Outcome::UserWhitelisted => "user is whitelisted",
            Outcome::ServerPings => "server pings by default",
            Outcome::DmDefault => "DM with pingInDMs enabled",
            Outcome::NoRule => "no rule matched",
        }
    }
}

/// Evaluate the precedence chain and say which rule fired.
///
/// Order, first match wins:
/// 1. target user blacklisted → suppress, unconditionally
/// 2. server blacklisted → suppress, unless the override flag is set and the
///    user is whitelisted (then keep going)
/// 3. target user whitelisted → mention
/// 4. server on the ping list → mention
/// 5. serverless DM with `pingInDMs` → mention
/// 6. nothing matched → suppress
pub fn explain(ctx: &ReplyContext, rules: &RuleSet) -> Outcome {
    let user = ctx.target_user();
    let server = ctx.server();

    let in_whitelist = user.is_some_and(|u| rules.whitelist.contains(u));

    if user.is_some_and(|u| rules.blacklist.contains(u)) {
        return Outcome::UserBlacklisted;
    }

    if server.is_some_and(|s| rules.blacklist_servers.contains(s))
        && !(rules.server_blacklist_respects_whitelist && in_whitelist)
    {
        return Outcome::ServerBlacklisted;
    }

    if in_whitelist {
        return Outcome::UserWhitelisted;
    }

    if server.is_some_and(|s| rules.ping_servers.contains(s)) {
        return Outcome::ServerPings;
    }

    if server.is_none() && ctx.is_dm && rules.ping_in_dms {
        return Outcome::DmDefault;
    }

    Outcome::NoRule
}

/// The mention decision: `true` = include the mention, `false` = suppress it.
pub fn evaluate(ctx: &ReplyContext, rules: &RuleSet) -> bool {
    explain(ctx, rules).mention()
}
