//! Open Point Ledger CLI Application
//!
//! A command-line interface for administering and using the point ledger.

use clap::{Parser, Subcommand};
use num::BigInt;
use point_ledger::cli::{self, AppState};
use point_ledger::core::Address;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "point-ledger")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "A fungible loyalty-point ledger", long_about = None)]
struct Cli {
    /// Data directory for ledger storage
    #[arg(short, long, default_value = ".ledger_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new ledger with a fixed owner
    Init {
        /// Owner address (Base58Check or hex) or compressed public key (66 hex chars)
        #[arg(short, long)]
        owner: String,
    },

    /// Generate a new key pair
    Keygen,

    /// Transfer points between accounts
    Transfer {
        /// Private key(s) witnessing the call
        #[arg(short, long = "key")]
        keys: Vec<String>,

        /// Sender (defaults to the first key's address)
        #[arg(short, long)]
        from: Option<Address>,

        /// Recipient
        #[arg(short, long)]
        to: Address,

        /// Amount to transfer
        #[arg(short, long, allow_hyphen_values = true)]
        amount: BigInt,
    },

    /// Issue new points (owner only)
    Mint {
        #[arg(short, long = "key")]
        keys: Vec<String>,

        /// Recipient
        #[arg(short, long)]
        to: Address,

        #[arg(short, long, allow_hyphen_values = true)]
        amount: BigInt,
    },

    /// Destroy points held by an account (owner only)
    Burn {
        #[arg(short, long = "key")]
        keys: Vec<String>,

        /// Account to burn from
        #[arg(short, long)]
        from: Address,

        #[arg(short, long, allow_hyphen_values = true)]
        amount: BigInt,
    },

    /// Redeem points from an account (holder only)
    Use {
        #[arg(short, long = "key")]
        keys: Vec<String>,

        /// Account to redeem from (defaults to the first key's address)
        #[arg(short, long)]
        from: Option<Address>,

        #[arg(short, long, allow_hyphen_values = true)]
        amount: BigInt,
    },

    /// Show an account balance
    Balance {
        #[arg(short, long)]
        address: Address,
    },

    /// Show total supply, used and burned counters
    Supply,

    /// Show ledger metadata and holders
    Info,

    /// Restore the store from a backup (0 = state before the last save)
    Restore {
        #[arg(short, long, default_value_t = 0)]
        index: usize,
    },

    /// Invoke an operation by name with positional arguments
    Invoke {
        #[arg(short, long = "key")]
        keys: Vec<String>,

        /// Operation name (e.g. transfer, mintTokensTo, balanceOf)
        operation: String,

        /// Arguments: addresses, integers, or 0x-prefixed bytes
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Sign data with a private key
    Sign {
        #[arg(short, long)]
        key: String,

        #[arg(long)]
        data: String,
    },

    /// Check the owner's authorization on the verification path
    Verify {
        #[arg(short, long = "key")]
        keys: Vec<String>,

        #[arg(long)]
        data: String,

        /// Hex-encoded compact signature
        #[arg(short, long)]
        signature: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Commands that don't need an initialized ledger
    match &cli.command {
        Commands::Init { owner } => return cli::cmd_init(&cli.data_dir, owner),
        Commands::Keygen => return cli::cmd_keygen(),
        Commands::Sign { key, data } => return cli::cmd_sign(key, data),
        _ => {}
    }

    let mut state = AppState::new(cli.data_dir.clone())?;

    match cli.command {
        Commands::Init { .. } | Commands::Keygen | Commands::Sign { .. } => unreachable!(),

        Commands::Transfer {
            keys,
            from,
            to,
            amount,
        } => {
            cli::cmd_transfer(&mut state, &keys, from, &to, &amount)?;
        }

        Commands::Mint { keys, to, amount } => {
            cli::cmd_mint(&mut state, &keys, &to, &amount)?;
        }

        Commands::Burn { keys, from, amount } => {
            cli::cmd_burn(&mut state, &keys, &from, &amount)?;
        }

        Commands::Use { keys, from, amount } => {
            cli::cmd_use(&mut state, &keys, from, &amount)?;
        }

        Commands::Balance { address } => {
            cli::cmd_balance(&state, &address)?;
        }

        Commands::Supply => {
            cli::cmd_supply(&state)?;
        }

        Commands::Info => {
            cli::cmd_info(&state)?;
        }

        Commands::Restore { index } => {
            cli::cmd_restore(&mut state, index)?;
        }

        Commands::Invoke {
            keys,
            operation,
            args,
        } => {
            cli::cmd_invoke(&mut state, &keys, &operation, &args)?;
        }

        Commands::Verify {
            keys,
            data,
            signature,
        } => {
            cli::cmd_verify(&state, &keys, &data, signature.as_deref())?;
        }
    }

    Ok(())
}
