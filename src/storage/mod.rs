//! Durable key-value backends for persisted history.
//!
//! The history store only needs `get`/`set`/`remove` on string values, which
//! is the same surface browser local storage offered the web widget.

use anyhow::Result;

pub mod file;
pub mod memory;
pub mod sqlite;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a key that is not present is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
