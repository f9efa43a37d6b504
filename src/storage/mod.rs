//! Durable key-value slots that survive restarts.

pub mod json_backend;
pub mod memory;

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

use crate::errors::Result;

/// Abstraction over a string-keyed persistence medium.
///
/// There is no locking: two processes sharing a slot race and the last
/// writer wins.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
