//! OpenSSL `enc` compatible backend.
//!
//! Blob layout: `Salted__ || salt(8) || AES-128-CBC(PKCS#7)`, key and IV
//! from `EVP_BytesToKey(MD5, 1 iteration)`, base64 armoured in 64-column
//! lines. Equivalent to `openssl enc -aes-128-cbc -md md5 -a`.

use aes::Aes128;
use base64::{engine::general_purpose::STANDARD, Engine};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use tracing::trace;
use zeroize::Zeroizing;

use super::Cipher;
use crate::core::constants::{ARMOR_WIDTH, CIPHER_ALGORITHM, SALT_LEN, SALT_MAGIC};
use crate::error::{CipherError, Result};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

const KEY_LEN: usize = 16;
const IV_LEN: usize = 16;
const BLOCK_LEN: usize = 16;

/// AES-128-CBC with OpenSSL salted framing.
pub struct OpenSsl;

impl Cipher for OpenSsl {
    fn name(&self) -> &'static str {
        CIPHER_ALGORITHM
    }

    fn encrypt(&self, plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
        trace!(plaintext_len = plaintext.len(), "encrypting");

        let mut salt = [0u8; SALT_LEN];
        rand::rngs::OsRng.fill_bytes(&mut salt);

        let material = derive_key_iv(password.as_bytes(), &salt);
        let (key, iv) = material.split_at(KEY_LEN);
        let ciphertext = Aes128CbcEnc::new_from_slices(key, iv)
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        let mut raw = Vec::with_capacity(SALT_MAGIC.len() + SALT_LEN + ciphertext.len());
        raw.extend_from_slice(SALT_MAGIC);
        raw.extend_from_slice(&salt);
        raw.extend_from_slice(&ciphertext);

        let armored = armor(&raw);
        trace!(ciphertext_len = armored.len(), "encrypted");
        Ok(armored)
    }

    fn decrypt(&self, blob: &[u8], password: &str) -> Result<Zeroizing<Vec<u8>>> {
        trace!(ciphertext_len = blob.len(), "decrypting");

        let raw = unarmor(blob)?;
        let header_len = SALT_MAGIC.len() + SALT_LEN;
        if raw.len() <= header_len || !raw.starts_with(SALT_MAGIC) {
            return Err(CipherError::WrongCredentials.into());
        }

        let salt = &raw[SALT_MAGIC.len()..header_len];
        let body = &raw[header_len..];
        if body.len() % BLOCK_LEN != 0 {
            return Err(CipherError::WrongCredentials.into());
        }

        let material = derive_key_iv(password.as_bytes(), salt);
        let (key, iv) = material.split_at(KEY_LEN);
        let plaintext = Aes128CbcDec::new_from_slices(key, iv)
            .map_err(|_| CipherError::WrongCredentials)?
            .decrypt_padded_vec_mut::<Pkcs7>(body)
            .map_err(|_| CipherError::WrongCredentials)?;

        trace!(plaintext_len = plaintext.len(), "decrypted");
        Ok(Zeroizing::new(plaintext))
    }
}

/// `EVP_BytesToKey` with MD5 and a single iteration.
///
/// D_0 = empty, D_i = MD5(D_{i-1} || password || salt), concatenated until
/// key and IV are filled.
fn derive_key_iv(password: &[u8], salt: &[u8]) -> Zeroizing<[u8; KEY_LEN + IV_LEN]> {
    let mut out = Zeroizing::new([0u8; KEY_LEN + IV_LEN]);
    let mut previous: Option<md5::Digest> = None;
    let mut filled = 0;

    while filled < out.len() {
        let mut ctx = md5::Context::new();
        if let Some(digest) = previous {
            ctx.consume(digest.0);
        }
        ctx.consume(password);
        ctx.consume(salt);
        let digest = ctx.compute();

        let n = (out.len() - filled).min(digest.0.len());
        out[filled..filled + n].copy_from_slice(&digest.0[..n]);
        filled += n;
        previous = Some(digest);
    }

    out
}

/// Base64 in fixed-width lines, newline terminated.
fn armor(raw: &[u8]) -> Vec<u8> {
    let encoded = STANDARD.encode(raw);
    let mut out = Vec::with_capacity(encoded.len() + encoded.len() / ARMOR_WIDTH + 1);
    for line in encoded.as_bytes().chunks(ARMOR_WIDTH) {
        out.extend_from_slice(line);
        out.push(b'\n');
    }
    out
}

/// Accept either the raw binary blob or its base64 armour.
fn unarmor(blob: &[u8]) -> Result<Vec<u8>> {
    if blob.starts_with(SALT_MAGIC) {
        return Ok(blob.to_vec());
    }

    let compact: Vec<u8> = blob
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    STANDARD
        .decode(compact)
        .map_err(|_| CipherError::WrongCredentials.into())
}
