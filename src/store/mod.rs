//! On-disk account store.

pub mod account_store;
pub mod accounts;
pub mod fs;

pub use account_store::AccountStore;
pub use accounts::AccountMap;
