//! The account record handed between the setup flow, the store and the
//! mail client.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A configured email account.
///
/// The store only interprets `email`, which keys the account. Every other
/// field (OAuth tokens, display settings, whatever the setup flow wrote) is
/// kept in `fields` and written back exactly as it was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAccount {
    /// Address identifying the account. Case-sensitive.
    pub email: String,

    /// Remaining fields, passed through untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl EmailAccount {
    /// An account with no fields besides its address.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style helper to attach an opaque field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Look up an opaque field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
