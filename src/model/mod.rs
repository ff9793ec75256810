//! Records persisted by the store.

pub mod account;
pub mod credentials;

pub use account::EmailAccount;
pub use credentials::{Credentials, DefaultEmail};
