pub(crate) mod atomic_io;
pub mod kv;
pub mod saves;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use saves::{SaveError, SaveManager};
