//! Selection context.
//!
//! The ordered names produced by the last search or listing. Commands that
//! target one account accept an index into it, no argument (the only
//! selected account), or search patterns.

use tracing::debug;

use crate::core::store::CredentialStore;
use crate::error::{Result, SelectionError};

/// Last result set, by name.
///
/// Indices are a snapshot: a later deletion does not shift them, and a
/// stale entry fails on dereference instead of resolving to another account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    names: Vec<String>,
}

impl Selection {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Replace the selection with a new result set.
    pub fn replace(&mut self, names: Vec<String>) {
        self.names = names;
    }

    /// Point an entry at a renamed account, keeping its position.
    pub fn rename(&mut self, old: &str, new: &str) {
        for name in self.names.iter_mut().filter(|n| n.as_str() == old) {
            *name = new.to_string();
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Resolve a command's arguments to exactly one account name.
///
/// In order:
/// 1. no arguments: the only selected account; `Ok(None)` on an empty store
/// 2. a non-negative integer within the selection: the account at that index
/// 3. otherwise every argument is a search pattern, which must match exactly
///    one account; the selection becomes that single result
///
/// # Errors
///
/// Returns `SelectionError::MissingIndex` when no argument is given and
/// several results are selected, `SelectionError::AmbiguousTarget` when the
/// search does not match exactly one account, and `SelectionError::Stale`
/// when the selected name no longer exists.
pub fn resolve_target<S: AsRef<str>>(
    store: &CredentialStore,
    selection: &mut Selection,
    args: &[S],
) -> Result<Option<String>> {
    let Some(first) = args.first() else {
        if store.is_empty() {
            return Ok(None);
        }
        return match selection.names() {
            [only] => live(store, only).map(Some),
            [] => Err(SelectionError::NothingSelected.into()),
            many => Err(SelectionError::MissingIndex { count: many.len() }.into()),
        };
    };

    if let Ok(index) = first.as_ref().parse::<usize>() {
        if let Some(name) = selection.get(index) {
            debug!(index, "resolved target by index");
            return live(store, name).map(Some);
        }
    }

    let found = store.find(args)?;
    match found.as_slice() {
        [only] => {
            let name = only.clone();
            selection.replace(found);
            Ok(Some(name))
        }
        _ => Err(SelectionError::AmbiguousTarget {
            matches: found.len(),
        }
        .into()),
    }
}

/// A selected name that must still exist in the store.
fn live(store: &CredentialStore, name: &str) -> Result<String> {
    if store.get(name).is_some() {
        Ok(name.to_string())
    } else {
        Err(SelectionError::Stale(name.to_string()).into())
    }
}
