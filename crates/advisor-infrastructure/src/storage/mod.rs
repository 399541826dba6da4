//! Durable local storage.

mod atomic_json;
mod key_value;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use key_value::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
