//! Filesystem persistence for the credential store.
//!
//! The session file is the compact JSON array of credentials, encrypted as
//! a whole. Writes are all-or-nothing: the blob is produced in memory, then
//! written to a temporary file beside the target and renamed over it.

use std::io::Write;
use std::path::Path;

use tracing::debug;
use zeroize::Zeroizing;

use super::{CredentialStore, Loaded};
use crate::core::cipher::Cipher;
use crate::core::domain::Credential;
use crate::error::{CipherError, Result, StoreError};

/// Outcome of checking a destination before writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteCheck {
    /// Nothing exists at the path.
    Fresh,
    /// A regular file exists and would be overwritten.
    Exists,
}

/// Check whether `path` may be written.
///
/// # Errors
///
/// Returns `StoreError::NotAFile` if the path exists but is not a regular
/// file.
pub fn can_write_to(path: &Path) -> Result<WriteCheck> {
    if !path.exists() {
        return Ok(WriteCheck::Fresh);
    }
    if !path.is_file() {
        return Err(StoreError::NotAFile(path.display().to_string()).into());
    }
    Ok(WriteCheck::Exists)
}

impl CredentialStore {
    /// Encrypt the whole store and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if encryption fails, `StoreError::WriteFailed`
    /// if the file cannot be written. The previous file is left untouched
    /// on failure.
    pub fn save(&self, cipher: &dyn Cipher, path: &Path, password: &str) -> Result<()> {
        debug!(path = %path.display(), accounts = self.len(), "saving store");

        let plaintext = Zeroizing::new(self.to_json(false)?);
        let blob = cipher.encrypt(&plaintext, password)?;
        write_atomic(path, &blob)
    }

    /// Read and decrypt the store at `path`.
    ///
    /// Near-duplicate names are kept under new names, see
    /// [`CredentialStore::import`].
    ///
    /// # Errors
    ///
    /// Returns `CipherError::WrongCredentials` if the password is wrong or the
    /// decrypted bytes are not a credential list, `StoreError::ReadFailed`
    /// if the file cannot be read.
    pub fn load(cipher: &dyn Cipher, path: &Path, password: &str) -> Result<Loaded> {
        debug!(path = %path.display(), cipher = cipher.name(), "loading store");

        let blob = read(path)?;
        let plaintext = cipher.decrypt(&blob, password)?;
        let credentials = parse(&plaintext).ok_or(CipherError::WrongCredentials)?;

        let loaded = Self::import(credentials);
        debug!(accounts = loaded.store.len(), "store loaded");
        Ok(loaded)
    }

    /// Read a plaintext JSON export, keeping near-duplicates like
    /// [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ReadFailed` or `StoreError::InvalidJson`.
    pub fn load_plain(path: &Path) -> Result<Loaded> {
        debug!(path = %path.display(), "loading plaintext accounts");

        let contents = Zeroizing::new(read(path)?);
        let credentials = serde_json::from_slice::<Option<Vec<Credential>>>(&contents)
            .map_err(|e| StoreError::InvalidJson {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
            .ok_or_else(|| StoreError::InvalidJson {
                path: path.display().to_string(),
                reason: "no account list".to_string(),
            })?;

        Ok(Self::import(credentials))
    }

    /// Write a plaintext JSON export, pretty-printed when `indent` is set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` if the file cannot be written.
    pub fn save_plain(&self, path: &Path, indent: bool) -> Result<()> {
        debug!(path = %path.display(), indent, "dumping plaintext accounts");

        let contents = Zeroizing::new(self.to_json(indent)?);
        write_atomic(path, &contents)
    }

    /// Serialize as a JSON array in key order.
    fn to_json(&self, indent: bool) -> Result<Vec<u8>> {
        let list: Vec<&Credential> = self.credentials().collect();
        let json = if indent {
            serde_json::to_vec_pretty(&list)?
        } else {
            serde_json::to_vec(&list)?
        };
        Ok(json)
    }
}

/// Parse a decrypted payload; `None` means it is not a credential list.
fn parse(plaintext: &[u8]) -> Option<Vec<Credential>> {
    serde_json::from_slice::<Option<Vec<Credential>>>(plaintext)
        .ok()
        .flatten()
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| {
        StoreError::ReadFailed {
            path: path.display().to_string(),
            source,
        }
        .into()
    })
}

/// Replace `path` with `contents` in one rename.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let write_failed = |source: std::io::Error| StoreError::WriteFailed {
        path: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // NamedTempFile is created owner read/write only on Unix
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_failed)?;
    tmp.write_all(contents).map_err(write_failed)?;
    tmp.as_file().sync_all().map_err(write_failed)?;
    tmp.persist(path).map_err(|e| write_failed(e.error))?;

    Ok(())
}
