//! Cryptographic operations.
//!
//! Password-based symmetric encryption of an opaque payload. The key is
//! derived from the password alone; the blob carries its own salt.
//!
//! ## Backends
//!
//! - **openssl**: Default, always available. OpenSSL `enc` compatible
//!   AES-128-CBC, readable by files written by earlier versions.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file
//! 3. Give it a distinct blob header so `decrypt` can tell formats apart
//! 4. Re-export from this module

use zeroize::Zeroizing;

use crate::error::Result;

mod openssl;

pub use openssl::OpenSsl;

/// Password-based encryption backend.
pub trait Cipher {
    /// Encrypt a payload under a password.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::EncryptionFailed` if the primitive rejects the
    /// derived key material.
    fn encrypt(&self, plaintext: &[u8], password: &str) -> Result<Vec<u8>>;

    /// Decrypt a blob produced by [`Cipher::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns `CipherError::WrongCredentials` if the blob is malformed or the
    /// password is wrong. Without an integrity tag a wrong password is only
    /// detected when it breaks framing or padding; callers must additionally
    /// treat an unparsable plaintext as wrong credentials.
    fn decrypt(&self, blob: &[u8], password: &str) -> Result<Zeroizing<Vec<u8>>>;

    /// Algorithm identifier.
    fn name(&self) -> &'static str;
}

/// Encrypt with the default backend.
pub fn encrypt(plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
    OpenSsl.encrypt(plaintext, password)
}

/// Decrypt with the default backend.
pub fn decrypt(blob: &[u8], password: &str) -> Result<Zeroizing<Vec<u8>>> {
    OpenSsl.decrypt(blob, password)
}
