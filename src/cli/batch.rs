//! One-shot conversions that bypass the interactive session.
//!
//! - `--encrypt <out>`: plaintext JSON at `--file` to an encrypted file
//! - `--decrypt <out>`: encrypted file at `--file` to indented JSON

use std::path::Path;

use tracing::info;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::startup;
use crate::cli::terminal::Terminal;
use crate::core::cipher::Cipher;
use crate::core::store::{can_write_to, CredentialStore, Loaded, WriteCheck};
use crate::error::Result;

/// Encrypt the plaintext accounts at `input` into `out`.
///
/// Without a given password a new one is asked for twice.
pub fn encrypt(
    cipher: &dyn Cipher,
    terminal: &mut dyn Terminal,
    input: &Path,
    out: &Path,
    password: Option<String>,
) -> Result<()> {
    let Loaded { store, renamed } = CredentialStore::load_plain(input)?;
    output::renamed(&renamed);
    if !may_write(terminal, out)? {
        return Ok(());
    }

    let password = match password {
        Some(given) => Zeroizing::new(given),
        None => startup::new_password(terminal)?,
    };
    store.save(cipher, out, &password)?;

    info!(accounts = store.len(), "encrypted");
    output::success(&format!(
        "{} accounts encrypted to {}.",
        store.len(),
        output::path(out.display())
    ));
    Ok(())
}

/// Decrypt the session file at `input` and dump it as indented JSON.
pub fn decrypt(
    cipher: &dyn Cipher,
    terminal: &mut dyn Terminal,
    input: &Path,
    out: &Path,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(given) => Zeroizing::new(given),
        None => Zeroizing::new(terminal.read_password("password", "")?),
    };
    let Loaded { store, renamed } = CredentialStore::load(cipher, input, &password)?;
    output::renamed(&renamed);
    if !may_write(terminal, out)? {
        return Ok(());
    }
    store.save_plain(out, true)?;

    info!(accounts = store.len(), "decrypted");
    output::success(&format!(
        "{} accounts decrypted to {}.",
        store.len(),
        output::path(out.display())
    ));
    Ok(())
}

/// Whether `out` may be written, asking before an overwrite.
fn may_write(terminal: &mut dyn Terminal, out: &Path) -> Result<bool> {
    if can_write_to(out)? == WriteCheck::Fresh {
        return Ok(true);
    }
    let overwrite = terminal.confirm(&format!(
        "file '{}' already exists. overwrite ?",
        out.display()
    ))?;
    if !overwrite {
        output::info("nothing written.");
    }
    Ok(overwrite)
}
