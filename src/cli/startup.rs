//! Opening a session file.
//!
//! An existing file is decrypted with the given password, or with typed
//! passwords up to the configured number of attempts. A missing file is
//! created empty once the user agrees and picks a password.

use std::path::Path;

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::terminal::Terminal;
use crate::core::cipher::Cipher;
use crate::core::store::CredentialStore;
use crate::error::{CipherError, CommandError, Result, StoreError};

/// An opened store and the password that protects it.
pub struct Opened {
    pub store: CredentialStore,
    pub password: Zeroizing<String>,
}

/// Open the session file at `path`.
///
/// Returns `None` when the file is missing and the user declines to
/// create it.
///
/// # Errors
///
/// Returns `CipherError::WrongCredentials` when the given password is wrong
/// or every typed attempt failed, `StoreError::NotAFile` when the path is
/// not a regular file.
pub fn open(
    cipher: &dyn Cipher,
    terminal: &mut dyn Terminal,
    path: &Path,
    password: Option<String>,
    attempts: u32,
) -> Result<Option<Opened>> {
    if !path.exists() {
        output::warn(&format!(
            "file {} does not exist.",
            output::path(path.display())
        ));
        if !terminal.confirm("continue ?")? {
            return Ok(None);
        }
        let password = match password {
            Some(given) => Zeroizing::new(given),
            None => new_password(terminal)?,
        };
        info!("starting with an empty store");
        return Ok(Some(Opened {
            store: CredentialStore::new(),
            password,
        }));
    }
    if !path.is_file() {
        return Err(StoreError::NotAFile(path.display().to_string()).into());
    }

    if let Some(given) = password {
        let password = Zeroizing::new(given);
        let loaded = CredentialStore::load(cipher, path, &password)?;
        output::renamed(&loaded.renamed);
        return Ok(Some(Opened {
            store: loaded.store,
            password,
        }));
    }

    for attempt in 1..=attempts {
        let password = Zeroizing::new(terminal.read_password("password", "")?);
        if password.is_empty() {
            output::warn("empty password.");
            continue;
        }
        match CredentialStore::load(cipher, path, &password) {
            Ok(loaded) => {
                output::renamed(&loaded.renamed);
                return Ok(Some(Opened {
                    store: loaded.store,
                    password,
                }));
            }
            Err(e) if e.is_wrong_credentials() && attempt < attempts => {
                debug!(attempt, "wrong password");
                output::error(&e.to_string());
            }
            Err(e) => return Err(e),
        }
    }

    Err(CipherError::WrongCredentials.into())
}

/// Ask for a new password twice.
///
/// # Errors
///
/// Returns `CommandError::EmptyPassword` or `CommandError::PasswordMismatch`.
pub fn new_password(terminal: &mut dyn Terminal) -> Result<Zeroizing<String>> {
    let first = Zeroizing::new(terminal.read_password("new password", "")?);
    if first.is_empty() {
        return Err(CommandError::EmptyPassword.into());
    }
    let second = Zeroizing::new(terminal.read_password("repeat password", "")?);
    if *first != *second {
        return Err(CommandError::PasswordMismatch.into());
    }
    Ok(first)
}
