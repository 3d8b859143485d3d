//! Core identity types
//!
//! - Addresses (20-byte account identifiers)
//! - Owner configuration (the administrator identity)

pub mod address;
pub mod owner;

pub use address::{Address, AddressError, ADDRESS_LENGTH, ADDRESS_VERSION};
pub use owner::{OwnerConfig, OwnerError, PUBLIC_KEY_LENGTH};
