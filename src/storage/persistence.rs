//! Ledger persistence layer
//!
//! Saves and loads the key/value store as a JSON snapshot. Keys and values
//! are hex-encoded so arbitrary bytes survive the round trip.

use crate::storage::store::MemoryStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub store_file: String,
    pub backup_enabled: bool,
    pub max_backups: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".ledger_data"),
            store_file: "store.json".to_string(),
            backup_enabled: true,
            max_backups: 5,
        }
    }
}

/// On-disk form of the store
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreSnapshot {
    entries: BTreeMap<String, String>,
}

impl StoreSnapshot {
    fn from_store(store: &MemoryStore) -> Self {
        Self {
            entries: store
                .iter()
                .map(|(key, value)| (hex::encode(key), hex::encode(value)))
                .collect(),
        }
    }

    fn into_store(self) -> Result<MemoryStore, StorageError> {
        self.entries
            .into_iter()
            .map(|(key, value)| {
                let key = hex::decode(&key)
                    .map_err(|_| StorageError::InvalidData(format!("bad key: {}", key)))?;
                let value = hex::decode(&value)
                    .map_err(|_| StorageError::InvalidData(format!("bad value: {}", value)))?;
                Ok::<_, StorageError>((key, value))
            })
            .collect()
    }
}

/// File-backed store manager
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    /// Create a new storage manager
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    fn store_path(&self) -> PathBuf {
        self.config.data_dir.join(&self.config.store_file)
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        self.config
            .data_dir
            .join(format!("{}.backup.{}", self.config.store_file, index))
    }

    /// Save the store to disk
    ///
    /// Written to a temporary file and renamed, so a crash never leaves a
    /// half-written snapshot behind.
    pub fn save(&self, store: &MemoryStore) -> Result<(), StorageError> {
        let path = self.store_path();

        if self.config.backup_enabled && path.exists() {
            self.rotate_backups()?;
            fs::copy(&path, self.backup_path(0))?;
        }

        let temp_path = self.config.data_dir.join("store.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &StoreSnapshot::from_store(store))?;

        fs::rename(&temp_path, &path)?;

        log::debug!("Saved {} store entries to {:?}", store.len(), path);
        Ok(())
    }

    /// Load the store from disk, empty if nothing was saved yet
    pub fn load(&self) -> Result<MemoryStore, StorageError> {
        if !self.exists() {
            return Ok(MemoryStore::new());
        }
        read_snapshot(&self.store_path())
    }

    /// Check if a saved store exists
    pub fn exists(&self) -> bool {
        self.store_path().exists()
    }

    fn rotate_backups(&self) -> Result<(), StorageError> {
        if self.config.max_backups == 0 {
            return Ok(());
        }

        let oldest = self.backup_path(self.config.max_backups - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for i in (0..self.config.max_backups - 1).rev() {
            let current = self.backup_path(i);
            if current.exists() {
                fs::rename(&current, self.backup_path(i + 1))?;
            }
        }

        Ok(())
    }

    /// Read a backup snapshot; 0 is the state before the latest save
    pub fn restore_backup(&self, backup_index: usize) -> Result<MemoryStore, StorageError> {
        let backup_path = self.backup_path(backup_index);

        if !backup_path.exists() {
            return Err(StorageError::InvalidData(format!(
                "Backup {} not found",
                backup_index
            )));
        }

        read_snapshot(&backup_path)
    }

    /// List available backups
    pub fn list_backups(&self) -> Vec<usize> {
        (0..self.config.max_backups)
            .filter(|i| self.backup_path(*i).exists())
            .collect()
    }

    /// Get storage statistics
    pub fn stats(&self) -> Result<StorageStats, StorageError> {
        let path = self.store_path();

        let file_size = if path.exists() {
            fs::metadata(&path)?.len()
        } else {
            0
        };

        Ok(StorageStats {
            file_size,
            backup_count: self.list_backups().len(),
            data_dir: self.config.data_dir.clone(),
        })
    }
}

/// Storage statistics
#[derive(Debug)]
pub struct StorageStats {
    pub file_size: u64,
    pub backup_count: usize,
    pub data_dir: PathBuf,
}

fn read_snapshot(path: &Path) -> Result<MemoryStore, StorageError> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    let snapshot: StoreSnapshot = serde_json::from_reader(reader)?;
    snapshot.into_store()
}
