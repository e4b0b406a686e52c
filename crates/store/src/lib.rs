//! Rule persistence backends for replygate.
//!
//! Implements the [`RuleStore`](replygate_core::RuleStore) trait:
//! - [`FileStore`]: one JSON record on disk, written atomically
//! - [`InMemoryStore`]: an in-process slot for tests and embedding

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::InMemoryStore;
