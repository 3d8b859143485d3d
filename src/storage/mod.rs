//! Storage module: host store interface, invocation atomicity and persistence

pub mod invocation;
pub mod persistence;
pub mod store;

pub use invocation::Invocation;
pub use persistence::{Storage, StorageConfig, StorageError, StorageStats};
pub use store::{
    address_from_key, balance_key, decode_integer, encode_integer, Counter, MemoryStore, Store,
    BALANCE_PREFIX, COUNTER_PREFIX,
};
