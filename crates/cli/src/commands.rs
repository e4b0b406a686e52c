//! Subcommand implementations over a loaded [`MentionPolicy`].

use replygate_core::{ReplyContext, RuleList};
use replygate_policy::{MentionPolicy, Outcome, explain, parse_id_list};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub fn show(policy: &MentionPolicy) {
    let rules = policy.rules();
    for list in RuleList::ALL {
        let ids = rules.list(list);
        if ids.is_empty() {
            println!("{list}: (empty)");
        } else {
            println!(
                "{list}: {}",
                ids.iter().cloned().collect::<Vec<_>>().join(", ")
            );
        }
    }
    println!("ping in DMs: {}", rules.ping_in_dms);
    println!(
        "whitelist overrides blocked servers: {}",
        rules.server_blacklist_respects_whitelist
    );
    println!(
        "logging: {} (verbose: {})",
        rules.enable_logging, rules.verbose_logging
    );
}

/// Exclusive toggle: whitelisting a user pulls them off the blacklist.
pub fn allow(policy: &MentionPolicy, user_id: &str) {
    policy.add(RuleList::Whitelist, user_id);
    policy.remove(RuleList::Blacklist, user_id);
    println!("Always mentioning {user_id} on reply");
}

/// Exclusive toggle: blacklisting a user pulls them off the whitelist.
pub fn deny(policy: &MentionPolicy, user_id: &str) {
    policy.add(RuleList::Blacklist, user_id);
    policy.remove(RuleList::Whitelist, user_id);
    println!("Never mentioning {user_id} on reply");
}

pub fn add(policy: &MentionPolicy, list: &str, id: &str) -> CmdResult {
    let list: RuleList = list.parse()?;
    policy.add(list, id);
    println!("Added {id} to {list}");
    Ok(())
}

pub fn remove(policy: &MentionPolicy, list: &str, id: &str) -> CmdResult {
    let list: RuleList = list.parse()?;
    policy.remove(list, id);
    println!("Removed {id} from {list}");
    Ok(())
}

pub fn set_list(policy: &MentionPolicy, list: &str, text: &str) -> CmdResult {
    let list: RuleList = list.parse()?;
    policy.replace_list(list, parse_id_list(text));
    println!("{list} now holds {} id(s)", policy.rules().list(list).len());
    Ok(())
}

pub fn ping_server(policy: &MentionPolicy, server_id: &str) {
    policy.add(RuleList::PingServers, server_id);
    println!("Replies in server {server_id} mention by default");
}

pub fn block_server(policy: &MentionPolicy, server_id: &str) {
    policy.add(RuleList::BlacklistServers, server_id);
    println!("Replies in server {server_id} never mention by default");
}

pub fn set_flags(
    policy: &MentionPolicy,
    ping_in_dms: Option<bool>,
    whitelist_overrides_block: Option<bool>,
    logging: Option<bool>,
    verbose_logging: Option<bool>,
) {
    if let Some(value) = ping_in_dms {
        policy.set_ping_in_dms(value);
    }
    if let Some(value) = whitelist_overrides_block {
        policy.set_server_blacklist_respects_whitelist(value);
    }
    if logging.is_some() || verbose_logging.is_some() {
        let current = policy.rules();
        policy.set_logging(
            logging.unwrap_or(current.enable_logging),
            verbose_logging.unwrap_or(current.verbose_logging),
        );
    }
    show(policy);
}

/// Dry-run one decision and say which rule fired.
///
/// A missing `--server` means a DM context, same as the live hook.
pub fn check(policy: &MentionPolicy, user: Option<String>, server: Option<String>) -> Outcome {
    let is_dm = server.is_none();
    let ctx = ReplyContext {
        target_user_id: user,
        server_id: server,
        is_dm,
    };
    let outcome = explain(&ctx, &policy.rules());
    println!(
        "{} — {}",
        if outcome.mention() {
            "MENTION"
        } else {
            "no mention"
        },
        outcome.reason()
    );
    outcome
}
