//! Persistent file-backed configuration store.
//!
//! The file is a TOML table of string values:
//!
//! ```toml
//! SearchLoggerConfig = '{"app": 0, "app.db": 300}'
//! ```
//!
//! It is re-read on every lookup so edits made by other processes (or the
//! `scopelog store` command) take effect on the next log call.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::provider::ConfigProvider;

/// Directory under the platform config dir holding the default store.
pub const STORE_DIR_NAME: &str = "scopelog";
/// File name of the default store.
pub const STORE_FILE_NAME: &str = "storage.toml";

/// A TOML file of string values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by the given file. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/scopelog/storage.toml`, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(STORE_DIR_NAME).join(STORE_FILE_NAME))
    }

    /// Store at [`default_path`](Self::default_path).
    pub fn at_default_location() -> Result<Self, StoreError> {
        Self::default_path()
            .map(Self::new)
            .ok_or(StoreError::NoConfigDir)
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All string entries. A missing file reads as empty.
    pub fn entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let table = self.read_table()?;
        Ok(table
            .into_iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
            .collect())
    }

    /// Stores `value` under `key`, creating the file and its directory.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut table = self.read_table()?;
        table.insert(key.to_string(), toml::Value::String(value.to_string()));
        self.write_table(&table)
    }

    /// Removes `key`, returning its previous string value.
    pub fn remove(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut table = self.read_table()?;
        let previous = table.remove(key);
        if previous.is_some() {
            self.write_table(&table)?;
        }
        Ok(previous.and_then(|v| v.as_str().map(String::from)))
    }

    fn read_table(&self) -> Result<toml::Table, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text.parse::<toml::Table>()?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(toml::Table::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_table(&self, table: &toml::Table) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = toml::to_string(table)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl ConfigProvider for FileStore {
    fn name(&self) -> &str {
        "persistent"
    }

    // An unreadable store is treated like an empty one.
    fn get(&self, key: &str) -> Option<String> {
        let table = self.read_table().ok()?;
        table.get(key)?.as_str().map(String::from)
    }
}

/// Failure reading or writing a [`FileStore`].
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem error.
    Io(io::Error),
    /// The file is not valid TOML.
    Parse(toml::de::Error),
    /// The table could not be serialized.
    Serialize(toml::ser::Error),
    /// The platform has no configuration directory.
    NoConfigDir,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "store I/O error: {e}"),
            StoreError::Parse(e) => write!(f, "store is not valid TOML: {e}"),
            StoreError::Serialize(e) => write!(f, "could not serialize store: {e}"),
            StoreError::NoConfigDir => write!(f, "no configuration directory on this platform"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Parse(e) => Some(e),
            StoreError::Serialize(e) => Some(e),
            StoreError::NoConfigDir => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Parse(err)
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::Serialize(err)
    }
}
