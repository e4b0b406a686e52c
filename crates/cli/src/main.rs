//! replygate CLI — the mutation and inspection boundary.
//!
//! Commands:
//! - `show`         — Print the current rule set
//! - `allow`/`deny` — Exclusive per-user toggles
//! - `add`/`remove` — Raw list mutation
//! - `set-list`     — Bulk replace a list from free text
//! - `ping-server`/`block-server` — Per-server defaults
//! - `set`          — Policy flags
//! - `check`        — Dry-run one mention decision

use clap::{Parser, Subcommand};
use replygate_policy::MentionPolicy;
use replygate_store::FileStore;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "replygate",
    about = "replygate — reply mention rules and dry runs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the rule file location
    #[arg(long, global = true, env = "REPLYGATE_STORE")]
    store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current rule set
    Show,

    /// Always mention this user on reply (drops them from the blacklist)
    Allow { user_id: String },

    /// Never mention this user on reply (drops them from the whitelist)
    Deny { user_id: String },

    /// Add an id to a rule list
    Add { list: String, id: String },

    /// Remove an id from a rule list
    Remove { list: String, id: String },

    /// Replace a rule list from free text (ids separated by commas,
    /// spaces, or newlines)
    SetList { list: String, text: String },

    /// Mention by default when replying in this server
    PingServer { server_id: String },

    /// Never mention by default when replying in this server
    BlockServer { server_id: String },

    /// Flip policy flags
    Set {
        /// Mention by default when replying in DMs
        #[arg(long)]
        ping_in_dms: Option<bool>,

        /// Let whitelisted users bypass blocked servers
        #[arg(long)]
        whitelist_overrides_block: Option<bool>,

        /// Log every decision
        #[arg(long)]
        logging: Option<bool>,

        /// Add rule-state detail to decision logs
        #[arg(long)]
        verbose_logging: Option<bool>,
    },

    /// Dry-run one mention decision
    Check {
        /// The replied-to user id
        #[arg(long)]
        user: Option<String>,

        /// The server the reply is composed in; omit for a DM
        #[arg(long)]
        server: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let path = cli.store.unwrap_or_else(FileStore::default_path);
    let policy = MentionPolicy::load(Box::new(FileStore::new(path)));

    match cli.command {
        Commands::Show => commands::show(&policy),
        Commands::Allow { user_id } => commands::allow(&policy, &user_id),
        Commands::Deny { user_id } => commands::deny(&policy, &user_id),
        Commands::Add { list, id } => commands::add(&policy, &list, &id)?,
        Commands::Remove { list, id } => commands::remove(&policy, &list, &id)?,
        Commands::SetList { list, text } => commands::set_list(&policy, &list, &text)?,
        Commands::PingServer { server_id } => commands::ping_server(&policy, &server_id),
        Commands::BlockServer { server_id } => commands::block_server(&policy, &server_id),
        Commands::Set {
            ping_in_dms,
            whitelist_overrides_block,
            logging,
            verbose_logging,
        } => commands::set_flags(
            &policy,
            ping_in_dms,
            whitelist_overrides_block,
            logging,
            verbose_logging,
        ),
        Commands::Check { user, server } => {
            commands::check(&policy, user, server);
        }
    }

    Ok(())
}
