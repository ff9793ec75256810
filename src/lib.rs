//! `gmcli`: local account storage for a command-line Gmail client.
//!
//! This crate keeps the configured email accounts, the OAuth client
//! credentials and the default-account pointer in owner-only JSON files
//! under `~/.gmcli`.

pub mod config;
pub mod error;
pub mod model;
pub mod store;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use model::{Credentials, EmailAccount};
pub use store::AccountStore;
