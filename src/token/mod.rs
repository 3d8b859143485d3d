//! Open Point loyalty token
//!
//! A single fungible point balance per account plus three counters:
//! - total supply (points outstanding)
//! - total used (points consumed by their holders)
//! - total burned (points destroyed by the administrator)
//!
//! # Example
//!
//! ```rust
//! use num::BigInt;
//! use point_ledger::auth::WitnessSet;
//! use point_ledger::core::OwnerConfig;
//! use point_ledger::crypto::KeyPair;
//! use point_ledger::storage::MemoryStore;
//! use point_ledger::token::{EventLog, Ledger};
//!
//! let admin = KeyPair::generate();
//! let customer = KeyPair::generate();
//! let ledger = Ledger::new(OwnerConfig::Address(admin.address()));
//! let mut store = MemoryStore::new();
//! let mut events = EventLog::new();
//!
//! // Issue points as the administrator
//! let as_admin = WitnessSet::from_keys([&admin]);
//! assert!(ledger.mint(&mut store, &as_admin, &mut events, &customer.address(), &BigInt::from(100)));
//!
//! // Redeem some of them as the customer
//! let as_customer = WitnessSet::from_keys([&customer]);
//! assert!(ledger.use_tokens(&mut store, &as_customer, &mut events, &customer.address(), &BigInt::from(30)));
//!
//! assert_eq!(ledger.balance_of(&store, &customer.address()), BigInt::from(70));
//! assert_eq!(ledger.total_used(&store), BigInt::from(30));
//! ```

pub mod command;
pub mod event;
pub mod ledger;
pub mod token;

pub use command::{Arg, Command, DecodeError, Outcome};
pub use event::{EventLog, EventSink, LogSink, TransferEvent};
pub use ledger::Ledger;
pub use token::{TokenError, TokenMetadata, DECIMALS, NAME, SYMBOL};
