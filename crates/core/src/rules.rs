//! The rule aggregate — the persisted configuration controlling reply
//! mentions.
//!
//! A [`RuleSet`] holds four identifier sets and four booleans. It is the
//! single source of truth for mention decisions: loaded once at startup,
//! mutated only through the policy handle, and written back whole after every
//! change. Field names on the wire match the persisted record layout
//! (`pingServers`, `pingInDMs`, ...), so a record written by any prior
//! installation deserializes field-by-field over the defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Names the four identifier lists inside a [`RuleSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleList {
    /// Users always mentioned on reply.
    Whitelist,
    /// Users never mentioned on reply (wins over the whitelist).
    Blacklist,
    /// Servers where replies mention by default.
    PingServers,
    /// Servers where replies never mention by default.
    BlacklistServers,
}

impl RuleList {
    pub const ALL: [RuleList; 4] = [
        RuleList::Whitelist,
        RuleList::Blacklist,
        RuleList::PingServers,
        RuleList::BlacklistServers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleList::Whitelist => "whitelist",
            RuleList::Blacklist => "blacklist",
            RuleList::PingServers => "ping-servers",
            RuleList::BlacklistServers => "blacklist-servers",
        }
    }
}

impl std::fmt::Display for RuleList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whitelist" => Ok(RuleList::Whitelist),
            "blacklist" => Ok(RuleList::Blacklist),
            "ping-servers" | "ping_servers" | "pingServers" => Ok(RuleList::PingServers),
            "blacklist-servers" | "blacklist_servers" | "blacklistServers" => {
                Ok(RuleList::BlacklistServers)
            }
            other => Err(format!(
                "unknown rule list '{other}' (expected whitelist, blacklist, \
                 ping-servers, or blacklist-servers)"
            )),
        }
    }
}

/// The persisted rule aggregate.
///
/// Defaults are conservative: all lists empty, all flags off — nobody gets
/// mentioned until a rule says so. Missing fields in a persisted record fall
/// back to these defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleSet {
    /// Users always mentioned on reply.
    pub whitelist: BTreeSet<String>,

    /// Users never mentioned on reply. Absolute: overrides everything else.
    pub blacklist: BTreeSet<String>,

    /// Server IDs where replies mention by default.
    pub ping_servers: BTreeSet<String>,

    /// Server IDs where replies never mention by default.
    pub blacklist_servers: BTreeSet<String>,

    /// Whether replies in DMs mention by default.
    #[serde(rename = "pingInDMs")]
    pub ping_in_dms: bool,

    /// If true, a whitelisted user is still mentioned in a blacklisted server.
    pub server_blacklist_respects_whitelist: bool,

    /// Gates decision logging entirely.
    pub enable_logging: bool,

    /// Adds rule-state detail to decision logs. Only meaningful when
    /// `enable_logging` is set.
    pub verbose_logging: bool,
}

impl RuleSet {
    /// Borrow the named identifier set.
    pub fn list(&self, list: RuleList) -> &BTreeSet<String> {
        match list {
            RuleList::Whitelist => &self.whitelist,
            RuleList::Blacklist => &self.blacklist,
            RuleList::PingServers => &self.ping_servers,
            RuleList::BlacklistServers => &self.blacklist_servers,
        }
    }

    fn list_mut(&mut self, list: RuleList) -> &mut BTreeSet<String> {
        match list {
            RuleList::Whitelist => &mut self.whitelist,
            RuleList::Blacklist => &mut self.blacklist,
            RuleList::PingServers => &mut self.ping_servers,
            RuleList::BlacklistServers => &mut self.blacklist_servers,
        }
    }

    /// Insert an identifier into the named list.
    ///
    /// Empty identifiers are invalid and never stored. Returns `true` if the
    /// set changed; inserting a present id is a no-op.
    pub fn insert(&mut self, list: RuleList, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }
        self.list_mut(list).insert(id.to_string())
    }

    /// Remove an identifier from the named list.
    ///
    /// Returns `true` if the set changed; removing an absent id is a no-op.
    pub fn remove(&mut self, list: RuleList, id: &str) -> bool {
        self.list_mut(list).remove(id)
    }

    /// Is the identifier a member of the named list?
    pub fn contains(&self, list: RuleList, id: &str) -> bool {
        self.list(list).contains(id)
    }

    /// Replace the named list wholesale.
    ///
    /// Duplicates collapse under set semantics; empty identifiers are dropped.
    pub fn replace<I>(&mut self, list: RuleList, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        *self.list_mut(list) = ids.into_iter().filter(|id| !id.is_empty()).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut rules = RuleSet::default();
        assert!(rules.insert(RuleList::Whitelist, "U1"));
        assert!(!rules.insert(RuleList::Whitelist, "U1"));
        assert_eq!(rules.whitelist.len(), 1);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut rules = RuleSet::default();
        rules.insert(RuleList::Blacklist, "U1");
        let before = rules.clone();
        assert!(!rules.remove(RuleList::Blacklist, "U2"));
        assert_eq!(rules, before);
    }

    #[test]
    fn empty_id_is_never_stored() {
        let mut rules = RuleSet::default();
        assert!(!rules.insert(RuleList::Whitelist, ""));
        assert!(rules.whitelist.is_empty());

        rules.replace(
            RuleList::PingServers,
            vec![String::new(), "G1".into(), String::new()],
        );
        assert_eq!(rules.ping_servers.len(), 1);
        assert!(rules.contains(RuleList::PingServers, "G1"));
    }

    #[test]
    fn replace_collapses_duplicates() {
        let mut rules = RuleSet::default();
        rules.replace(
            RuleList::Whitelist,
            vec!["a".to_string(), "b".into(), "a".into()],
        );
        assert_eq!(rules.whitelist.len(), 2);
    }

    #[test]
    fn persisted_field_names_are_stable() {
        let mut rules = RuleSet::default();
        rules.insert(RuleList::PingServers, "G1");
        rules.ping_in_dms = true;
        let json = serde_json::to_string(&rules).unwrap();
        assert!(json.contains("\"whitelist\""));
        assert!(json.contains("\"blacklist\""));
        assert!(json.contains("\"pingServers\""));
        assert!(json.contains("\"blacklistServers\""));
        assert!(json.contains("\"pingInDMs\""));
        assert!(json.contains("\"serverBlacklistRespectsWhitelist\""));
        assert!(json.contains("\"enableLogging\""));
        assert!(json.contains("\"verboseLogging\""));
    }

    #[test]
    fn partial_record_merges_over_defaults() {
        let rules: RuleSet =
            serde_json::from_str(r#"{"whitelist":["U1"],"pingInDMs":true}"#).unwrap();
        assert!(rules.contains(RuleList::Whitelist, "U1"));
        assert!(rules.ping_in_dms);
        // Everything absent from the record stays at its default.
        assert!(rules.blacklist.is_empty());
        assert!(rules.ping_servers.is_empty());
        assert!(!rules.server_blacklist_respects_whitelist);
        assert!(!rules.enable_logging);
    }

    #[test]
    fn duplicate_ids_in_record_collapse() {
        let rules: RuleSet = serde_json::from_str(r#"{"blacklist":["U1","U1","U2"]}"#).unwrap();
        assert_eq!(rules.blacklist.len(), 2);
    }

    #[test]
    fn rule_list_round_trips_through_names() {
        for list in RuleList::ALL {
            assert_eq!(list.as_str().parse::<RuleList>().unwrap(), list);
        }
        assert_eq!(
            "pingServers".parse::<RuleList>().unwrap(),
            RuleList::PingServers
        );
        assert!("mystery".parse::<RuleList>().is_err());
    }
}
