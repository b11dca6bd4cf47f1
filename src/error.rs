//! Error types.
//!
//! One enum per component boundary, aggregated into [`Error`]. Command
//! handlers propagate with `?`; the session loop turns every error into a
//! printed message and keeps running.

use thiserror::Error;

/// Top-level error for all lockbox operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl Error {
    /// Whether this is a wrong-password / corrupt-file failure.
    pub fn is_wrong_credentials(&self) -> bool {
        matches!(self, Error::Cipher(CipherError::WrongCredentials))
    }
}

/// Encryption and decryption failures.
#[derive(Error, Debug)]
pub enum CipherError {
    /// The password is wrong or the blob is not a valid store.
    ///
    /// The legacy format carries no authentication tag, so this is inferred
    /// from framing, padding and parse failures.
    #[error("wrong credentials")]
    WrongCredentials,

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),
}

/// Credential store and persistence failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no such account: {0}")]
    NotFound(String),

    #[error("empty name")]
    EmptyName,

    #[error("at least one search pattern is required")]
    EmptyPatterns,

    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("'{0}' is not a regular file")]
    NotAFile(String),

    #[error("failed to read '{path}': {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}' is not a valid accounts file: {reason}")]
    InvalidJson { path: String, reason: String },
}

/// Target resolution failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// Search arguments matched zero or several accounts.
    #[error("ambiguous account ({matches} matches)")]
    AmbiguousTarget { matches: usize },

    /// No argument given while several results are selected.
    #[error("missing index ({count} results selected)")]
    MissingIndex { count: usize },

    #[error("nothing selected")]
    NothingSelected,

    /// The selected account no longer exists in the store.
    #[error("account '{0}' no longer exists")]
    Stale(String),
}

impl SelectionError {
    /// All selection failures are ambiguous-target failures to the user.
    pub fn is_ambiguous(&self) -> bool {
        !matches!(self, SelectionError::Stale(_))
    }
}

/// Interactive command failures.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("invalid field {0}")]
    InvalidField(String),

    #[error("incomplete command. Usage: {usage}")]
    MissingArgument { usage: String },

    #[error("no clipboard helper found (tried {tried})")]
    ClipboardUnavailable { tried: String },

    #[error("clipboard helper '{helper}' failed: {reason}")]
    ClipboardFailed { helper: String, reason: String },

    #[error("input closed")]
    InputClosed,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("empty password")]
    EmptyPassword,
}

/// Configuration file failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("missing file argument (-f <file>)")]
    MissingFile,
}

pub type Result<T> = std::result::Result<T, Error>;
