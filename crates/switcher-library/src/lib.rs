mod cache;
mod host;

pub use cache::{LibraryCache, StorageKeys, DEFAULT_NAMESPACE};
pub use host::{ClientStorage, MemoryStorage, StyleImporter};
