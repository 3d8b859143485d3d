//! CLI commands for the ledger
//!
//! Implements all command handlers for the CLI interface. Each mutating
//! command is one invocation: load the store, run the ledger operation,
//! save only if it succeeded.

use crate::auth::WitnessSet;
use crate::config::LedgerConfig;
use crate::core::{Address, OwnerConfig};
use crate::crypto::KeyPair;
use crate::storage::{MemoryStore, Storage, StorageConfig};
use crate::token::{Arg, EventLog, EventSink, Ledger, LogSink, Outcome, TokenMetadata, NAME, SYMBOL};
use num::BigInt;
use std::path::{Path, PathBuf};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
///
/// One process owns the data directory at a time; concurrent CLI runs
/// against the same directory are not locked and can lose updates.
pub struct AppState {
    pub ledger: Ledger,
    pub config: LedgerConfig,
    pub store: MemoryStore,
    pub storage: Storage,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load an initialized ledger from its data directory
    pub fn new(data_dir: PathBuf) -> CliResult<Self> {
        let config = LedgerConfig::load(&data_dir)?;
        let storage = Storage::new(StorageConfig {
            data_dir: data_dir.clone(),
            ..Default::default()
        })?;
        let store = storage.load()?;
        log::debug!("Loaded {} store entries from {:?}", store.len(), data_dir);

        Ok(Self {
            ledger: Ledger::new(config.owner),
            config,
            store,
            storage,
            data_dir,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.store)?;
        Ok(())
    }

    /// Persist and report the result of a mutation
    fn finish(&self, ok: bool, events: &EventLog) -> CliResult<()> {
        if ok {
            self.save()?;
            println!("✅ Success");
            for event in events.events() {
                LogSink.emit(event.clone());
                println!("   📣 {}", event);
            }
        } else {
            println!("❌ Rejected (run with RUST_LOG=debug for the reason)");
        }
        Ok(())
    }
}

/// Parse witness keys given on the command line
fn witnesses(keys: &[String]) -> CliResult<(WitnessSet, Vec<KeyPair>)> {
    let pairs = keys
        .iter()
        .map(|k| KeyPair::from_private_key_hex(k))
        .collect::<Result<Vec<_>, _>>()?;
    let auth = WitnessSet::from_keys(&pairs);
    if auth.is_empty() {
        log::debug!("Unsigned invocation");
    } else {
        log::debug!("Invocation witnessed by {} key(s)", auth.len());
    }
    Ok((auth, pairs))
}

/// Initialize a new ledger
pub fn cmd_init(data_dir: &Path, owner: &str) -> CliResult<()> {
    let owner: OwnerConfig = owner.parse()?;

    if LedgerConfig::exists(data_dir) {
        println!("⚠️  Ledger already exists at {:?}", data_dir);
        println!("   The owner is fixed at creation and cannot be changed.");
        return Ok(());
    }

    let config = LedgerConfig::new(owner);
    config.create(data_dir)?;

    let storage = Storage::new(StorageConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    })?;
    storage.save(&MemoryStore::new())?;

    println!("✅ Ledger initialized!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!("   🪙 Token: {} ({})", NAME, SYMBOL);
    println!("   👑 Owner: {}", config.owner);

    Ok(())
}

/// Generate a key pair
pub fn cmd_keygen() -> CliResult<()> {
    let kp = KeyPair::generate();

    println!("🔐 New key pair");
    println!("   📍 Address: {}", kp.address());
    println!("   🔑 Public key: {}", kp.public_key_hex());
    println!("   🗝️  Private key: {}", kp.private_key_hex());
    println!("\n   ⚠️  Keep the private key secret; it authorizes spending.");

    Ok(())
}

/// Transfer points
pub fn cmd_transfer(
    state: &mut AppState,
    keys: &[String],
    from: Option<Address>,
    to: &Address,
    amount: &BigInt,
) -> CliResult<()> {
    let (auth, pairs) = witnesses(keys)?;
    let from = match from.or_else(|| pairs.first().map(KeyPair::address)) {
        Some(from) => from,
        None => return Err("transfer needs --from or a --key".into()),
    };

    println!("📤 Transfer {} {} from {} to {}", amount, state.ledger.symbol(), from, to);

    let mut events = EventLog::new();
    let ok = state
        .ledger
        .transfer(&mut state.store, &auth, &mut events, &from, to, amount);
    state.finish(ok, &events)
}

/// Mint points (administrator)
pub fn cmd_mint(
    state: &mut AppState,
    keys: &[String],
    to: &Address,
    amount: &BigInt,
) -> CliResult<()> {
    let (auth, _) = witnesses(keys)?;

    println!("🏭 Mint {} {} to {}", amount, state.ledger.symbol(), to);

    let mut events = EventLog::new();
    let ok = state
        .ledger
        .mint(&mut state.store, &auth, &mut events, to, amount);
    state.finish(ok, &events)
}

/// Burn points (administrator)
pub fn cmd_burn(
    state: &mut AppState,
    keys: &[String],
    from: &Address,
    amount: &BigInt,
) -> CliResult<()> {
    let (auth, _) = witnesses(keys)?;

    println!("🔥 Burn {} {} from {}", amount, state.ledger.symbol(), from);

    let mut events = EventLog::new();
    let ok = state
        .ledger
        .burn(&mut state.store, &auth, &mut events, from, amount);
    state.finish(ok, &events)
}

/// Use (redeem) points
pub fn cmd_use(
    state: &mut AppState,
    keys: &[String],
    from: Option<Address>,
    amount: &BigInt,
) -> CliResult<()> {
    let (auth, pairs) = witnesses(keys)?;
    let from = match from.or_else(|| pairs.first().map(KeyPair::address)) {
        Some(from) => from,
        None => return Err("use needs --from or a --key".into()),
    };

    println!("🎟️  Use {} {} from {}", amount, state.ledger.symbol(), from);

    let mut events = EventLog::new();
    let ok = state
        .ledger
        .use_tokens(&mut state.store, &auth, &mut events, &from, amount);
    state.finish(ok, &events)
}

/// Show an account balance
pub fn cmd_balance(state: &AppState, address: &Address) -> CliResult<()> {
    let balance = state.ledger.balance_of(&state.store, address);
    println!("💰 Balance for {}", address);
    println!("   {} {}", balance, state.ledger.symbol());
    Ok(())
}

/// Show the supply counters
pub fn cmd_supply(state: &AppState) -> CliResult<()> {
    println!("📊 Supply");
    println!("   ├─ Total supply: {}", state.ledger.total_supply(&state.store));
    println!("   ├─ Total used: {}", state.ledger.total_used(&state.store));
    println!("   └─ Total burned: {}", state.ledger.total_burned(&state.store));
    Ok(())
}

/// Show ledger info and holders
pub fn cmd_info(state: &AppState) -> CliResult<TokenMetadata> {
    let token = state.ledger.metadata();
    let holders = state.store.balances();
    let stats = state.storage.stats()?;

    println!("🪙 {} ({})", token.name, token.symbol);
    println!("   ├─ Decimals: {}", token.decimals);
    println!("   ├─ Owner: {}", state.ledger.owner());
    println!("   ├─ Holders: {}", holders.len());
    println!("   ├─ Store size: {} bytes", stats.file_size);
    println!("   └─ Backups: {}", stats.backup_count);

    if !holders.is_empty() {
        println!("\n   Balances:");
        for (address, balance) in holders.iter().take(20) {
            println!("   └─ {} = {}", address, balance);
        }
        if holders.len() > 20 {
            println!("   ... and {} more", holders.len() - 20);
        }
    }

    Ok(token)
}

/// Roll the store back to a saved backup
///
/// The current store becomes backup 0, so a restore can itself be undone.
pub fn cmd_restore(state: &mut AppState, index: usize) -> CliResult<()> {
    let available = state.storage.list_backups();
    if !available.contains(&index) {
        println!("⚠️  Backup {} not found (available: {:?})", index, available);
    }

    let restored = state.storage.restore_backup(index)?;
    println!("♻️  Restoring backup {} ({} entries)", index, restored.len());
    state.store = restored;
    state.save()?;

    println!("✅ Store restored");
    println!("   ├─ Total supply: {}", state.ledger.total_supply(&state.store));
    println!("   └─ Holders: {}", state.store.balances().len());
    Ok(())
}

/// Parse a raw call argument: integer, address, or 0x-prefixed bytes
///
/// Decimal text is always an integer, whatever its length. Hex addresses
/// need the `0x` prefix when they contain no letters.
pub fn parse_arg(raw: &str) -> CliResult<Arg> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(Arg::Integer(raw.parse::<BigInt>()?));
    }
    if let Ok(address) = raw.parse::<Address>() {
        return Ok(Arg::Bytes(address.as_bytes().to_vec()));
    }
    if let Some(hex_part) = raw.strip_prefix("0x") {
        return Ok(Arg::Bytes(hex::decode(hex_part)?));
    }
    Err(format!("Cannot parse argument: {}", raw).into())
}

/// Invoke an operation by name, the way a host dispatcher would
pub fn cmd_invoke(
    state: &mut AppState,
    keys: &[String],
    operation: &str,
    raw_args: &[String],
) -> CliResult<Outcome> {
    let (auth, _) = witnesses(keys)?;
    let args = raw_args
        .iter()
        .map(|a| parse_arg(a))
        .collect::<CliResult<Vec<_>>>()?;

    let mut events = EventLog::new();
    let before = state.store.clone();
    let outcome = state
        .ledger
        .dispatch(&mut state.store, &auth, &mut events, operation, &args);

    if state.store != before {
        state.save()?;
    }
    for event in events.events() {
        LogSink.emit(event.clone());
        println!("   📣 {}", event);
    }
    println!("↩️  {}: {}", operation, outcome);

    Ok(outcome)
}

/// Check a signature on the verification path
pub fn cmd_verify(
    state: &AppState,
    keys: &[String],
    data: &str,
    signature: Option<&str>,
) -> CliResult<bool> {
    let (auth, _) = witnesses(keys)?;
    let signature = match signature {
        Some(s) => hex::decode(s.trim())?,
        None => Vec::new(),
    };

    let ok = state.ledger.verify(&auth, data.as_bytes(), &signature);
    if ok {
        println!("✅ Verified for owner {}", state.ledger.owner());
    } else {
        println!("❌ Verification failed");
    }
    Ok(ok)
}

/// Sign data with a private key (for use with `verify`)
pub fn cmd_sign(key: &str, data: &str) -> CliResult<()> {
    let kp = KeyPair::from_private_key_hex(key)?;
    let signature = kp.sign(data.as_bytes())?;
    println!("✍️  Signature: {}", hex::encode(signature));
    Ok(())
}
