//! File-backed rule store — one JSON record per installation.
//!
//! Storage location: `~/.replygate/rules.json` (overridable).
//!
//! The record is always written whole: serialize the full aggregate to a
//! temporary file, then rename it into place. Last write wins and readers
//! never observe a half-written record.

use replygate_core::{RuleSet, RuleStore, StoreError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A file-backed store holding a single JSON-encoded [`RuleSet`].
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the given file path.
    ///
    /// The file (and its parent directories) are created on first save.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The default slot: `~/.replygate/rules.json`.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".replygate").join("rules.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn slot(&self) -> String {
        self.path.display().to_string()
    }
}

impl RuleStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    fn load(&self) -> Result<RuleSet, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No rule file yet, starting from defaults");
                return Ok(RuleSet::default());
            }
            Err(e) => {
                return Err(StoreError::Read {
                    slot: self.slot(),
                    reason: e.to_string(),
                });
            }
        };

        serde_json::from_str(&content).map_err(|e| StoreError::Parse {
            slot: self.slot(),
            reason: e.to_string(),
        })
    }

    fn save(&self, rules: &RuleSet) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Write {
                slot: self.slot(),
                reason: format!("failed to create rule directory: {e}"),
            })?;
        }

        let content = serde_json::to_string_pretty(rules).map_err(|e| StoreError::Write {
            slot: self.slot(),
            reason: format!("failed to serialize rules: {e}"),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &content).map_err(|e| StoreError::Write {
            slot: self.slot(),
            reason: e.to_string(),
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| StoreError::Write {
            slot: self.slot(),
            reason: format!("failed to replace rule file: {e}"),
        })?;

        debug!(path = %self.path.display(), "Rules saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replygate_core::RuleList;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("rules.json"));
        assert_eq!(store.load().unwrap(), RuleSet::default());
    }

    #[test]
    fn save_and_reload_round_trips() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("rules.json"));

        let mut rules = RuleSet::default();
        rules.insert(RuleList::Whitelist, "U1");
        rules.insert(RuleList::BlacklistServers, "G9");
        rules.ping_in_dms = true;
        store.save(&rules).unwrap();

        let reloaded = FileStore::new(store.path().to_path_buf()).load().unwrap();
        assert_eq!(reloaded, rules);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("deep").join("rules.json"));
        store.save(&RuleSet::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn malformed_record_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(&path, "not json at all").unwrap();

        let err = FileStore::new(path).load().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn partial_record_merges_over_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(&path, r#"{"blacklist":["U1"]}"#).unwrap();

        let rules = FileStore::new(path).load().unwrap();
        assert!(rules.contains(RuleList::Blacklist, "U1"));
        assert!(rules.whitelist.is_empty());
        assert!(!rules.ping_in_dms);
    }

    #[test]
    fn last_write_wins_and_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("rules.json"));

        let mut first = RuleSet::default();
        first.insert(RuleList::Whitelist, "U1");
        store.save(&first).unwrap();

        let mut second = RuleSet::default();
        second.insert(RuleList::Whitelist, "U2");
        store.save(&second).unwrap();

        let reloaded = store.load().unwrap();
        assert!(!reloaded.contains(RuleList::Whitelist, "U1"));
        assert!(reloaded.contains(RuleList::Whitelist, "U2"));
        assert!(!store.path().with_extension("json.tmp").exists());
    }
}
