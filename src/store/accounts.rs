//! In-memory account mapping keyed by email address.

use crate::model::account::EmailAccount;

/// Accounts keyed by `email`, in the order they were first inserted.
///
/// Replacing an existing account keeps its position, so the file written
/// after an update differs from the previous one only in that entry.
/// Account lists are small; lookups are linear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountMap {
    entries: Vec<EmailAccount>,
}

impl AccountMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the account stored under `account.email`.
    ///
    /// Returns the previous account for that key, if any.
    pub fn upsert(&mut self, account: EmailAccount) -> Option<EmailAccount> {
        match self.position(&account.email) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i], account)),
            None => {
                self.entries.push(account);
                None
            }
        }
    }

    pub fn get(&self, email: &str) -> Option<&EmailAccount> {
        self.entries.iter().find(|a| a.email == email)
    }

    /// Remove the account stored under `email`.
    pub fn remove(&mut self, email: &str) -> Option<EmailAccount> {
        let i = self.position(email)?;
        Some(self.entries.remove(i))
    }

    pub fn contains(&self, email: &str) -> bool {
        self.position(email).is_some()
    }

    /// Accounts in encounter order.
    pub fn values(&self) -> &[EmailAccount] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, email: &str) -> Option<usize> {
        self.entries.iter().position(|a| a.email == email)
    }
}

impl FromIterator<EmailAccount> for AccountMap {
    /// Later duplicates replace earlier ones in place.
    fn from_iter<I: IntoIterator<Item = EmailAccount>>(iter: I) -> Self {
        let mut map = Self::new();
        for account in iter {
            map.upsert(account);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emails(map: &AccountMap) -> Vec<&str> {
        map.values().iter().map(|a| a.email.as_str()).collect()
    }

    #[test]
    fn test_upsert_keeps_position() {
        let mut map = AccountMap::new();
        assert!(map.upsert(EmailAccount::new("a@x.com")).is_none());
        map.upsert(EmailAccount::new("b@x.com"));

        let prev = map.upsert(EmailAccount::new("a@x.com").with_field("label", "new"));
        assert_eq!(prev, Some(EmailAccount::new("a@x.com")));
        assert_eq!(emails(&map), ["a@x.com", "b@x.com"]);
        assert_eq!(
            map.get("a@x.com").unwrap().field("label"),
            Some(&serde_json::json!("new"))
        );
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut map = AccountMap::new();
        map.upsert(EmailAccount::new("A@x.com"));
        map.upsert(EmailAccount::new("a@x.com"));
        assert_eq!(map.len(), 2);
        assert!(!map.contains("A@X.COM"));
    }

    #[test]
    fn test_remove() {
        let mut map: AccountMap = ["a@x.com", "b@x.com", "c@x.com"]
            .into_iter()
            .map(EmailAccount::new)
            .collect();
        assert!(map.remove("b@x.com").is_some());
        assert!(map.remove("b@x.com").is_none());
        assert_eq!(emails(&map), ["a@x.com", "c@x.com"]);
    }

    #[test]
    fn test_from_iter_dedups_in_place() {
        let map: AccountMap = vec![
            EmailAccount::new("a@x.com"),
            EmailAccount::new("b@x.com"),
            EmailAccount::new("a@x.com").with_field("n", 2),
        ]
        .into_iter()
        .collect();
        assert_eq!(emails(&map), ["a@x.com", "b@x.com"]);
        assert_eq!(
            map.get("a@x.com").unwrap().field("n"),
            Some(&serde_json::json!(2))
        );
    }

    #[test]
    fn test_empty() {
        let map = AccountMap::new();
        assert!(map.is_empty());
        assert!(map.get("a@x.com").is_none());
    }
}
