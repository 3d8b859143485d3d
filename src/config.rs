//! Ledger configuration
//!
//! Written once by `init` and read on every later command. The owner is
//! immutable: there is no command that rewrites it. Token metadata is not
//! configurable and is never read from here.

use crate::core::OwnerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file inside the data directory
pub const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Ledger not initialized in {0:?}; run `point-ledger init` first")]
    NotInitialized(PathBuf),
    #[error("Ledger already initialized in {0:?}")]
    AlreadyInitialized(PathBuf),
}

/// Persistent ledger configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Administrator identity
    pub owner: OwnerConfig,
}

impl LedgerConfig {
    pub fn new(owner: OwnerConfig) -> Self {
        Self { owner }
    }

    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    pub fn exists(data_dir: &Path) -> bool {
        Self::path(data_dir).exists()
    }

    /// Load the configuration from a data directory
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path(data_dir);
        if !path.exists() {
            return Err(ConfigError::NotInitialized(data_dir.to_path_buf()));
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Write the configuration; refuses to replace an existing owner
    pub fn create(&self, data_dir: &Path) -> Result<(), ConfigError> {
        let path = Self::path(data_dir);
        if path.exists() {
            return Err(ConfigError::AlreadyInitialized(data_dir.to_path_buf()));
        }
        fs::create_dir_all(data_dir)?;
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        log::info!("Ledger configured with owner {}", self.owner);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;

    #[test]
    fn test_create_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let owner = OwnerConfig::PublicKey(KeyPair::generate().public_key);
        let config = LedgerConfig::new(owner);

        assert!(!LedgerConfig::exists(dir.path()));
        config.create(dir.path()).unwrap();
        assert!(LedgerConfig::exists(dir.path()));

        let loaded = LedgerConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_owner_is_immutable() {
        let dir = tempfile::tempdir().unwrap();
        let first = LedgerConfig::new(OwnerConfig::Address(KeyPair::generate().address()));
        let second = LedgerConfig::new(OwnerConfig::Address(KeyPair::generate().address()));

        first.create(dir.path()).unwrap();
        assert!(matches!(
            second.create(dir.path()),
            Err(ConfigError::AlreadyInitialized(_))
        ));
        assert_eq!(LedgerConfig::load(dir.path()).unwrap(), first);
    }

    #[test]
    fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            LedgerConfig::load(dir.path()),
            Err(ConfigError::NotInitialized(_))
        ));
    }

    #[test]
    fn test_token_fields_in_file_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let address = KeyPair::generate().address();
        fs::write(
            LedgerConfig::path(dir.path()),
            format!(
                r#"{{"owner":{{"address":"{}"}},"token":{{"name":"X","symbol":"XXX","decimals":8}}}}"#,
                address
            ),
        )
        .unwrap();

        let loaded = LedgerConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, LedgerConfig::new(OwnerConfig::Address(address)));
    }
}
