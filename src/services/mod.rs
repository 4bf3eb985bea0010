// Service exports
pub mod store;

pub use store::{MemoryStore, StoreError, StoreStats};
