//! Credential store.
//!
//! An ordered collection of credentials keyed by name. The map is owned
//! privately so every mutation goes through the operations below; keys
//! iterate in lexicographic order, which fixes listing and export order.
//!
//! Persistence lives in [`fs`]: the encrypted session file and the
//! plaintext JSON escape hatch.

use std::collections::{BTreeMap, HashSet};

use regex::RegexBuilder;
use tracing::debug;

use crate::core::domain::Credential;
use crate::error::{Result, StoreError};

mod fs;

pub use fs::{can_write_to, WriteCheck};

/// An account kept under a new name while building a store, because its
/// name equals an earlier one under case and whitespace normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
    pub from: String,
    pub to: String,
}

/// A store built from a list, with the renames it needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loaded {
    pub store: CredentialStore,
    pub renamed: Vec<Renamed>,
}

/// Accounts of one session, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialStore {
    accounts: BTreeMap<String, Credential>,
}

impl CredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a list, keyed by each credential's name.
    ///
    /// See [`import`](Self::import) for near-duplicate names.
    pub fn from_credentials(credentials: impl IntoIterator<Item = Credential>) -> Self {
        Self::import(credentials).store
    }

    /// Build a store from a list without dropping any record.
    ///
    /// The first of several names equal under case and whitespace
    /// normalization keeps its name; the others get a ` (2)`, ` (3)`, ...
    /// suffix and are reported in [`Loaded::renamed`].
    pub fn import(credentials: impl IntoIterator<Item = Credential>) -> Loaded {
        let mut store = Self::new();
        let mut taken = HashSet::new();
        let mut renamed = Vec::new();

        for mut credential in credentials {
            let mut normalized = normalize(&credential.name);
            if taken.contains(&normalized) {
                let original = credential.name.clone();
                let (name, unique) = (2..)
                    .map(|n| format!("{} ({})", original, n))
                    .map(|candidate| {
                        let normalized = normalize(&candidate);
                        (candidate, normalized)
                    })
                    .find(|(_, normalized)| !taken.contains(normalized))
                    .unwrap_or_default();
                credential.name = name;
                normalized = unique;
                renamed.push(Renamed {
                    from: original,
                    to: credential.name.clone(),
                });
            }
            taken.insert(normalized);
            store.put(credential.name.clone(), credential);
        }

        if !renamed.is_empty() {
            debug!(count = renamed.len(), "renamed near-duplicate accounts");
        }
        Loaded { store, renamed }
    }

    /// Insert or replace the credential under `name`.
    ///
    /// Does not check for near-duplicates; call
    /// [`contains_key_case_insensitive`](Self::contains_key_case_insensitive)
    /// first when an override confirmation is wanted.
    pub fn put(&mut self, name: impl Into<String>, credential: Credential) {
        self.accounts.insert(name.into(), credential);
    }

    /// Remove by exact key. Removing a missing key is a no-op.
    pub fn remove(&mut self, name: &str) -> Option<Credential> {
        self.accounts.remove(name)
    }

    /// Credential under the exact key.
    pub fn get(&self, name: &str) -> Option<&Credential> {
        self.accounts.get(name)
    }

    /// Credential under the exact key, or `StoreError::NotFound`.
    pub fn require(&self, name: &str) -> Result<&Credential> {
        self.get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()).into())
    }

    /// Whether a key exists under case and whitespace normalization.
    pub fn contains_key_case_insensitive(&self, name: &str) -> bool {
        self.find_key_case_insensitive(name).is_some()
    }

    /// The stored key equal to `name` under case and whitespace normalization.
    pub fn find_key_case_insensitive(&self, name: &str) -> Option<&str> {
        let wanted = normalize(name);
        self.accounts
            .keys()
            .find(|key| normalize(key) == wanted)
            .map(String::as_str)
    }

    /// Names of the accounts matching every pattern.
    ///
    /// Each pattern must be a case-insensitive substring of the name, login,
    /// email or notes (AND across patterns, OR across fields).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EmptyPatterns` for an empty pattern list; list
    /// everything with [`keys`](Self::keys) instead.
    pub fn find<S: AsRef<str>>(&self, patterns: &[S]) -> Result<Vec<String>> {
        if patterns.is_empty() {
            return Err(StoreError::EmptyPatterns.into());
        }

        let found: Vec<String> = self
            .accounts
            .iter()
            .filter(|(_, c)| c.contains_all(patterns))
            .map(|(key, _)| key.clone())
            .collect();

        debug!(patterns = patterns.len(), matches = found.len(), "find");
        Ok(found)
    }

    /// Names of the accounts where the case-insensitive regex fully matches
    /// the name, login, email or notes.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidPattern` if the regex does not compile.
    pub fn find_by_regex(&self, pattern: &str) -> Result<Vec<String>> {
        let regex = RegexBuilder::new(&format!("^(?:{})$", pattern))
            .case_insensitive(true)
            .build()
            .map_err(|e| StoreError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        let found: Vec<String> = self
            .accounts
            .iter()
            .filter(|(_, c)| c.matches(&regex))
            .map(|(key, _)| key.clone())
            .collect();

        debug!(matches = found.len(), "find by regex");
        Ok(found)
    }

    /// Every key in order.
    pub fn keys(&self) -> Vec<String> {
        self.accounts.keys().cloned().collect()
    }

    /// Credentials in key order.
    pub fn credentials(&self) -> impl Iterator<Item = &Credential> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Lower-case and collapse whitespace runs.
fn normalize(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    for word in name.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.extend(word.chars().flat_map(char::to_lowercase));
    }
    normalized
}
