//! Write-through persistence: the policy handle and the file store together.

use replygate_core::{ReplyContext, RuleList};
use replygate_policy::MentionPolicy;
use replygate_store::FileStore;
use tempfile::tempdir;

#[test]
fn mutations_survive_a_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.json");

    let policy = MentionPolicy::load(Box::new(FileStore::new(path.clone())));
    policy.add(RuleList::Whitelist, "U1");
    policy.add(RuleList::BlacklistServers, "G1");
    policy.set_server_blacklist_respects_whitelist(true);
    policy.set_ping_in_dms(true);
    drop(policy);

    let reloaded = MentionPolicy::load(Box::new(FileStore::new(path)));
    assert!(reloaded.contains(RuleList::Whitelist, "U1"));
    // Whitelisted user bypasses the blacklisted server (override persisted).
    assert!(reloaded.should_mention(&ReplyContext::in_server("U1", "G1")));
    // DM default persisted too.
    assert!(reloaded.should_mention(&ReplyContext::dm("U2")));
}

#[test]
fn bulk_replace_survives_a_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.json");

    let policy = MentionPolicy::load(Box::new(FileStore::new(path.clone())));
    policy.replace_list(
        RuleList::Blacklist,
        replygate_policy::parse_id_list("U1, U2\nU3 U1"),
    );
    drop(policy);

    let reloaded = MentionPolicy::load(Box::new(FileStore::new(path)));
    let rules = reloaded.rules();
    assert_eq!(rules.blacklist.len(), 3);
    assert!(!reloaded.should_mention(&ReplyContext::in_server("U2", "G1")));
}

#[test]
fn corrupted_slot_falls_back_to_defaults_then_heals_on_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.json");
    std::fs::write(&path, "{ definitely not a rule set").unwrap();

    let policy = MentionPolicy::load(Box::new(FileStore::new(path.clone())));
    assert!(policy.rules().whitelist.is_empty());

    // The first mutation rewrites a valid record.
    policy.add(RuleList::Whitelist, "U1");
    drop(policy);

    let reloaded = MentionPolicy::load(Box::new(FileStore::new(path)));
    assert!(reloaded.contains(RuleList::Whitelist, "U1"));
}

#[test]
fn unwritable_slot_keeps_memory_authoritative() {
    let dir = tempdir().unwrap();
    // The slot's parent is a regular file, so every save fails.
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").unwrap();
    let path = blocker.join("rules.json");

    let policy = MentionPolicy::load(Box::new(FileStore::new(path)));
    policy.add(RuleList::Blacklist, "U1");

    // No panic, no rollback: the in-memory rules still apply.
    assert!(policy.contains(RuleList::Blacklist, "U1"));
    assert!(!policy.should_mention(&ReplyContext::dm("U1")));
}
