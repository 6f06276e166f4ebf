pub mod handlers;
pub mod kv;
pub mod store;

pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore};
pub use store::{StoreError, TemplateStore};
