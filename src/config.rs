//! Store location configuration.
//!
//! The store directory is resolved at:
//! 1. `$GMCLI_DIR` (environment variable)
//! 2. `~/.gmcli` (Linux/macOS)
//!    `%USERPROFILE%\.gmcli` (Windows)
//!
//! Nothing below the composition boundary looks at the environment; the
//! store itself only ever sees a [`StoreConfig`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Environment variable that overrides the store directory.
pub const DIR_ENV: &str = "GMCLI_DIR";

/// Name of the store directory inside the home directory.
pub const DIR_NAME: &str = ".gmcli";

/// File holding the JSON array of accounts.
pub const ACCOUNTS_FILE: &str = "accounts.json";

/// File holding the OAuth client id/secret pair.
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// File holding the default-account pointer.
pub const DEFAULT_FILE: &str = "default.json";

/// Where the store keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory owning all managed files.
    pub dir: PathBuf,
    /// File name of the account list, relative to `dir`.
    pub accounts_file: String,
    /// File name of the client credentials, relative to `dir`.
    pub credentials_file: String,
    /// File name of the default-account pointer, relative to `dir`.
    pub default_file: String,
}

impl StoreConfig {
    /// Configuration rooted at `dir` with the standard file names.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            accounts_file: ACCOUNTS_FILE.to_string(),
            credentials_file: CREDENTIALS_FILE.to_string(),
            default_file: DEFAULT_FILE.to_string(),
        }
    }

    /// Configuration rooted at `<home>/.gmcli`.
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir().ok_or(StoreError::HomeDirUnavailable)?;
        Ok(Self::new(home.join(DIR_NAME)))
    }

    /// Resolve the configuration from the environment, falling back to the
    /// home directory.
    pub fn discover() -> Result<Self> {
        match Self::from_override(std::env::var_os(DIR_ENV)) {
            Some(cfg) => Ok(cfg),
            None => Self::from_home(),
        }
    }

    /// Build a configuration from an explicit directory override, ignoring
    /// unset or empty values.
    fn from_override(value: Option<OsString>) -> Option<Self> {
        value.filter(|v| !v.is_empty()).map(Self::new)
    }

    /// Full path of the account list.
    pub fn accounts_path(&self) -> PathBuf {
        self.dir.join(&self.accounts_file)
    }

    /// Full path of the client credentials.
    pub fn credentials_path(&self) -> PathBuf {
        self.dir.join(&self.credentials_file)
    }

    /// Full path of the default-account pointer.
    pub fn default_path(&self) -> PathBuf {
        self.dir.join(&self.default_file)
    }

    /// Every file the store manages, in a fixed order.
    pub fn managed_files(&self) -> [PathBuf; 3] {
        [
            self.accounts_path(),
            self.credentials_path(),
            self.default_path(),
        ]
    }

    /// The store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Return the cache directory used for logs.
pub fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gmcli")
}

/// Return the log file path.
pub fn log_file_path() -> PathBuf {
    cache_dir().join("gmcli.log")
}
