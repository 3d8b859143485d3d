//! Ledger core
//!
//! Owns the accounting rules for balances and the three supply counters.
//! Every mutation follows the same shape: validate everything, then write,
//! then notify. The ledger keeps no state of its own between calls; the
//! store, the authorizer and the event sink are passed in on every call.

use crate::auth::{is_owner_authorized, Authorizer};
use crate::core::{Address, OwnerConfig};
use crate::storage::{balance_key, decode_integer, encode_integer, Counter, Invocation, Store};
use crate::token::command::{Arg, Command, Outcome};
use crate::token::event::{EventSink, TransferEvent};
use crate::token::token::{TokenError, TokenMetadata, DECIMALS, NAME, SYMBOL};
use num::{BigInt, Signed, Zero};

/// The Open Point ledger
#[derive(Clone, Debug)]
pub struct Ledger {
    owner: OwnerConfig,
}

impl Ledger {
    /// Create a ledger administered by `owner`
    pub fn new(owner: OwnerConfig) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> &OwnerConfig {
        &self.owner
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn name(&self) -> &'static str {
        NAME
    }

    pub fn symbol(&self) -> &'static str {
        SYMBOL
    }

    pub fn decimals(&self) -> u8 {
        DECIMALS
    }

    /// Name, symbol and decimals bundled for display
    pub fn metadata(&self) -> TokenMetadata {
        TokenMetadata::default()
    }

    /// Balance of an account, zero if it was never credited
    pub fn balance_of<S: Store>(&self, store: &S, address: &Address) -> BigInt {
        read_balance(store, address)
    }

    pub fn total_supply<S: Store>(&self, store: &S) -> BigInt {
        read_counter(store, Counter::TotalSupply)
    }

    pub fn total_used<S: Store>(&self, store: &S) -> BigInt {
        read_counter(store, Counter::TotalUsed)
    }

    pub fn total_burned<S: Store>(&self, store: &S) -> BigInt {
        read_counter(store, Counter::TotalBurned)
    }

    // =========================================================================
    // Mutations (boolean boundary)
    // =========================================================================

    /// Move `amount` from `from` to `to`; requires a witness for `from`
    pub fn transfer<S: Store>(
        &self,
        store: &mut S,
        auth: &dyn Authorizer,
        sink: &mut dyn EventSink,
        from: &Address,
        to: &Address,
        amount: &BigInt,
    ) -> bool {
        self.invoke(store, sink, "transfer", |tx| {
            self.try_transfer(tx, auth, from, to, amount)
        })
    }

    /// Issue `amount` new points to `to`; requires the owner
    pub fn mint<S: Store>(
        &self,
        store: &mut S,
        auth: &dyn Authorizer,
        sink: &mut dyn EventSink,
        to: &Address,
        amount: &BigInt,
    ) -> bool {
        self.invoke(store, sink, "mint", |tx| self.try_mint(tx, auth, to, amount))
    }

    /// Destroy `amount` points held by `from`; requires the owner
    pub fn burn<S: Store>(
        &self,
        store: &mut S,
        auth: &dyn Authorizer,
        sink: &mut dyn EventSink,
        from: &Address,
        amount: &BigInt,
    ) -> bool {
        self.invoke(store, sink, "burn", |tx| self.try_burn(tx, auth, from, amount))
    }

    /// Consume `amount` points held by `from`; requires a witness for `from`
    pub fn use_tokens<S: Store>(
        &self,
        store: &mut S,
        auth: &dyn Authorizer,
        sink: &mut dyn EventSink,
        from: &Address,
        amount: &BigInt,
    ) -> bool {
        self.invoke(store, sink, "use", |tx| self.try_use(tx, auth, from, amount))
    }

    /// Run one validated operation as an atomic invocation
    fn invoke<S, F>(&self, store: &mut S, sink: &mut dyn EventSink, operation: &str, op: F) -> bool
    where
        S: Store,
        F: FnOnce(&mut Invocation<'_, S>) -> Result<Option<TransferEvent>, TokenError>,
    {
        let mut invocation = Invocation::begin(store);

        match op(&mut invocation) {
            Ok(event) => {
                let writes = invocation.commit();
                log::info!("{} succeeded ({} writes)", operation, writes);
                // Only after commit
                if let Some(event) = event {
                    sink.emit(event);
                }
                true
            }
            Err(e) => {
                log::debug!("{} rejected: {}", operation, e);
                false
            }
        }
    }

    // =========================================================================
    // Mutations (typed errors)
    // =========================================================================

    /// Transfer with a typed error
    ///
    /// A self-transfer succeeds without touching state or emitting an event,
    /// and is decided before the balance is looked at.
    pub fn try_transfer<S: Store>(
        &self,
        store: &mut S,
        auth: &dyn Authorizer,
        from: &Address,
        to: &Address,
        amount: &BigInt,
    ) -> Result<Option<TransferEvent>, TokenError> {
        check_amount(amount)?;
        if !auth.check_witness(from) {
            return Err(TokenError::Unauthorized);
        }
        if from == to {
            return Ok(None);
        }

        debit(store, from, amount)?;
        let to_balance = read_balance(store, to);
        write_balance(store, to, &(to_balance + amount));

        Ok(Some(TransferEvent::new(
            Some(*from),
            *to,
            amount.clone(),
        )))
    }

    /// Mint with a typed error
    pub fn try_mint<S: Store>(
        &self,
        store: &mut S,
        auth: &dyn Authorizer,
        to: &Address,
        amount: &BigInt,
    ) -> Result<Option<TransferEvent>, TokenError> {
        check_amount(amount)?;
        self.check_owner(auth)?;

        let balance = read_balance(store, to);
        write_balance(store, to, &(balance + amount));
        add_counter(store, Counter::TotalSupply, amount);

        Ok(Some(TransferEvent::new(None, *to, amount.clone())))
    }

    /// Burn with a typed error
    ///
    /// The burned counter is decremented, not incremented, so it runs
    /// negative as points are destroyed. This is probably an inverted sign,
    /// but stored counters already carry it, so it is kept as-is.
    pub fn try_burn<S: Store>(
        &self,
        store: &mut S,
        auth: &dyn Authorizer,
        from: &Address,
        amount: &BigInt,
    ) -> Result<Option<TransferEvent>, TokenError> {
        check_amount(amount)?;
        self.check_owner(auth)?;

        debit(store, from, amount)?;
        add_counter(store, Counter::TotalSupply, &-amount);
        add_counter(store, Counter::TotalBurned, &-amount);

        Ok(None)
    }

    /// Use with a typed error
    pub fn try_use<S: Store>(
        &self,
        store: &mut S,
        auth: &dyn Authorizer,
        from: &Address,
        amount: &BigInt,
    ) -> Result<Option<TransferEvent>, TokenError> {
        check_amount(amount)?;
        if !auth.check_witness(from) {
            return Err(TokenError::Unauthorized);
        }

        debit(store, from, amount)?;
        add_counter(store, Counter::TotalSupply, &-amount);
        add_counter(store, Counter::TotalUsed, amount);

        Ok(None)
    }

    fn check_owner(&self, auth: &dyn Authorizer) -> Result<(), TokenError> {
        if is_owner_authorized(&self.owner, auth) {
            Ok(())
        } else {
            Err(TokenError::Unauthorized)
        }
    }

    // =========================================================================
    // Verification and dispatch
    // =========================================================================

    /// Verification path: may a transaction spend from the ledger's account?
    ///
    /// An address owner must have witnessed the transaction; a public-key
    /// owner must have signed `data`.
    pub fn verify(&self, auth: &dyn Authorizer, data: &[u8], signature: &[u8]) -> bool {
        match &self.owner {
            OwnerConfig::Address(address) => auth.check_witness(address),
            OwnerConfig::PublicKey(key) => auth.verify_signature(data, signature, key),
        }
    }

    /// Execute a decoded command
    pub fn execute<S: Store>(
        &self,
        store: &mut S,
        auth: &dyn Authorizer,
        sink: &mut dyn EventSink,
        command: &Command,
    ) -> Outcome {
        if !command.is_mutation() {
            log::debug!("Query {}", command.operation());
        }

        match command {
            Command::Transfer { from, to, amount } => {
                Outcome::Bool(self.transfer(store, auth, sink, from, to, amount))
            }
            Command::Mint { to, amount } => {
                Outcome::Bool(self.mint(store, auth, sink, to, amount))
            }
            Command::Burn { from, amount } => {
                Outcome::Bool(self.burn(store, auth, sink, from, amount))
            }
            Command::Use { from, amount } => {
                Outcome::Bool(self.use_tokens(store, auth, sink, from, amount))
            }
            Command::BalanceOf { account } => Outcome::Integer(self.balance_of(store, account)),
            Command::TotalSupply => Outcome::Integer(self.total_supply(store)),
            Command::TotalUsed => Outcome::Integer(self.total_used(store)),
            Command::TotalBurned => Outcome::Integer(self.total_burned(store)),
            Command::Name => Outcome::Text(self.name()),
            Command::Symbol => Outcome::Text(self.symbol()),
            Command::Decimals => Outcome::Integer(BigInt::from(self.decimals())),
        }
    }

    /// Decode an operation name and positional arguments, then execute
    ///
    /// Malformed calls never reach the core; they get the operation's falsy
    /// value instead.
    pub fn dispatch<S: Store>(
        &self,
        store: &mut S,
        auth: &dyn Authorizer,
        sink: &mut dyn EventSink,
        operation: &str,
        args: &[Arg],
    ) -> Outcome {
        match Command::decode(operation, args) {
            Ok(command) => self.execute(store, auth, sink, &command),
            Err(e) => {
                log::debug!("Rejected call to {:?}: {}", operation, e);
                Outcome::failure_for(operation)
            }
        }
    }
}

fn check_amount(amount: &BigInt) -> Result<(), TokenError> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(TokenError::InvalidAmount)
    }
}

fn read_balance<S: Store>(store: &S, address: &Address) -> BigInt {
    decode_integer(store.get(&balance_key(address)).as_deref())
}

/// Store a balance; zero balances are removed, never stored
fn write_balance<S: Store>(store: &mut S, address: &Address, balance: &BigInt) {
    let key = balance_key(address);
    if balance.is_zero() {
        store.delete(&key);
    } else {
        store.put(&key, &encode_integer(balance));
    }
}

/// Subtract `amount` from an account, failing before any write if short
fn debit<S: Store>(store: &mut S, from: &Address, amount: &BigInt) -> Result<(), TokenError> {
    let have = read_balance(store, from);
    if &have < amount {
        return Err(TokenError::InsufficientFunds {
            have,
            need: amount.clone(),
        });
    }
    write_balance(store, from, &(have - amount));
    Ok(())
}

fn read_counter<S: Store>(store: &S, counter: Counter) -> BigInt {
    decode_integer(store.get(&counter.key()).as_deref())
}

fn add_counter<S: Store>(store: &mut S, counter: Counter, delta: &BigInt) {
    let value = read_counter(store, counter) + delta;
    store.put(&counter.key(), &encode_integer(&value));
}
