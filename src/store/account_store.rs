//! Persistent account store: accounts, OAuth client credentials and the
//! default-account pointer.

use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::model::account::EmailAccount;
use crate::model::credentials::{Credentials, DefaultEmail};
use crate::store::accounts::AccountMap;
use crate::store::fs;

/// Owns the store directory and the records inside it.
///
/// Accounts are loaded once on [`AccountStore::open`] and served from memory;
/// every change is written straight back to disk. Credentials and the
/// default pointer are read from disk on each call.
///
/// Reads never fail: a missing or malformed file looks the same as an empty
/// one. Writes and directory setup propagate their errors.
#[derive(Debug)]
pub struct AccountStore {
    config: StoreConfig,
    accounts: AccountMap,
}

impl AccountStore {
    /// Open the store described by `config`.
    ///
    /// 1. Create the directory owner-only if it is missing.
    /// 2. Reset the directory and any existing managed file to owner-only
    ///    permissions, repairing modes loosened since the last run.
    /// 3. Load the account list.
    pub fn open(config: StoreConfig) -> Result<Self> {
        fs::ensure_private_dir(&config.dir)?;
        fs::harden_dir(&config.dir)?;
        for path in config.managed_files() {
            fs::harden_file(&path)?;
        }

        let accounts = load_accounts(&config);
        info!(
            path = %config.dir.display(),
            count = accounts.len(),
            "Opened account store"
        );
        Ok(Self { config, accounts })
    }

    /// Open the store at the location resolved by [`StoreConfig::discover`].
    pub fn open_default() -> Result<Self> {
        Self::open(StoreConfig::discover()?)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ── Accounts ────────────────────────────────────────────────────

    /// Insert or replace the account keyed by `account.email`, then persist.
    pub fn add_account(&mut self, account: EmailAccount) -> Result<()> {
        if account.email.is_empty() {
            return Err(StoreError::InvalidAccount("email must not be empty".into()));
        }
        let email = account.email.clone();
        let replaced = self.accounts.upsert(account).is_some();
        self.save_accounts()?;
        info!(email = %email, replaced, "Saved account");
        Ok(())
    }

    pub fn get_account(&self, email: &str) -> Option<&EmailAccount> {
        self.accounts.get(email)
    }

    /// All accounts, in the order they were first added.
    pub fn get_all_accounts(&self) -> Vec<EmailAccount> {
        self.accounts.values().to_vec()
    }

    /// Remove an account. The file is only rewritten if something was removed.
    pub fn delete_account(&mut self, email: &str) -> Result<bool> {
        if self.accounts.remove(email).is_none() {
            debug!(email = %email, "No such account to delete");
            return Ok(false);
        }
        self.save_accounts()?;
        info!(email = %email, "Deleted account");
        Ok(true)
    }

    pub fn has_account(&self, email: &str) -> bool {
        self.accounts.contains(email)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn save_accounts(&self) -> Result<()> {
        fs::write_private_json(&self.config.accounts_path(), self.accounts.values())
    }

    // ── Credentials ─────────────────────────────────────────────────

    /// Overwrite the OAuth client credentials.
    pub fn set_credentials(&self, client_id: &str, client_secret: &str) -> Result<()> {
        let creds = Credentials::new(client_id, client_secret);
        fs::write_private_json(&self.config.credentials_path(), &creds)?;
        info!(client_id = %client_id, "Saved client credentials");
        Ok(())
    }

    /// Read the OAuth client credentials, if a well-formed record exists.
    pub fn get_credentials(&self) -> Option<Credentials> {
        fs::read_json(&self.config.credentials_path())
    }

    // ── Default account ─────────────────────────────────────────────

    /// Point the default at `email`. The address is not checked against the
    /// account list.
    pub fn set_default_email(&self, email: &str) -> Result<()> {
        let record = DefaultEmail {
            email: email.to_string(),
        };
        fs::write_private_json(&self.config.default_path(), &record)?;
        info!(email = %email, "Set default account");
        Ok(())
    }

    /// The default email, if a well-formed pointer exists.
    pub fn get_default_email(&self) -> Option<String> {
        fs::read_json::<DefaultEmail>(&self.config.default_path()).map(|d| d.email)
    }

    /// Remove the default pointer. Does nothing if there is none.
    pub fn clear_default_email(&self) -> Result<()> {
        if fs::remove_if_exists(&self.config.default_path())? {
            info!("Cleared default account");
        }
        Ok(())
    }
}

/// Load the account list, treating a missing or malformed file as empty.
fn load_accounts(config: &StoreConfig) -> AccountMap {
    fs::read_json::<Vec<EmailAccount>>(&config.accounts_path())
        .map(AccountMap::from_iter)
        .unwrap_or_default()
}
