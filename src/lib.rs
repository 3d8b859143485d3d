//! Point Ledger: a fungible loyalty-point ledger in Rust
//!
//! This crate provides:
//! - A ledger core with transfer, mint, burn and use operations
//! - Balance and supply queries (total supply, used, burned)
//! - Owner configuration by address or secp256k1 public key
//! - Witness-based authorization and signature verification
//! - Invocation-scoped atomic writes over a pluggable key/value store
//! - JSON persistence with backups
//!
//! # Example
//!
//! ```rust
//! use num::BigInt;
//! use point_ledger::{Ledger, MemoryStore, OwnerConfig, KeyPair, WitnessSet, EventLog};
//!
//! let admin = KeyPair::generate();
//! let alice = KeyPair::generate();
//! let bob = KeyPair::generate();
//!
//! let ledger = Ledger::new(OwnerConfig::Address(admin.address()));
//! let mut store = MemoryStore::new();
//! let mut events = EventLog::new();
//!
//! let as_admin = WitnessSet::from_keys([&admin]);
//! ledger.mint(&mut store, &as_admin, &mut events, &alice.address(), &BigInt::from(100));
//!
//! let as_alice = WitnessSet::from_keys([&alice]);
//! ledger.transfer(&mut store, &as_alice, &mut events, &alice.address(), &bob.address(), &BigInt::from(40));
//!
//! assert_eq!(ledger.balance_of(&store, &bob.address()), BigInt::from(40));
//! assert_eq!(ledger.total_supply(&store), BigInt::from(100));
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod crypto;
pub mod storage;
pub mod token;

// Re-export commonly used types
pub use crate::auth::{Authorizer, WitnessSet};
pub use crate::config::LedgerConfig;
pub use crate::core::{Address, OwnerConfig};
pub use crate::crypto::KeyPair;
pub use crate::storage::{Invocation, MemoryStore, Storage, StorageConfig, Store};
pub use crate::token::{Command, EventLog, EventSink, Ledger, Outcome, TokenError, TransferEvent};
