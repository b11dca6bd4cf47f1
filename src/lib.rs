//! Lockbox - A local, encrypted password store.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── session       # Interactive loop and session state
//! │   ├── command       # Command table and fuzzy resolution
//! │   ├── commands      # Command handlers
//! │   ├── startup       # Opening or creating the session file
//! │   ├── batch         # One-shot --encrypt / --decrypt
//! │   ├── terminal      # Prompts
//! │   ├── clipboard     # Clipboard helpers
//! │   └── output        # Styled output
//! └── core/             # Core library components
//!     ├── config        # config.toml management
//!     ├── cipher/       # Encryption backends
//!     │   ├── mod       # Cipher trait
//!     │   └── openssl   # OpenSSL enc compatible AES-128-CBC
//!     ├── domain/       # Credential and Field
//!     ├── store/        # Credential store
//!     │   ├── mod       # Ordered map, search, uniqueness
//!     │   └── fs        # Encrypted and plaintext persistence
//!     └── selection     # Last result set and target resolution
//! ```
//!
//! # Features
//!
//! - Password-protected store, readable by `openssl enc -aes-128-cbc -md md5 -a`
//! - Multi-field search, regex search and numbered results
//! - Fuzzy command names
//! - Clipboard copy without printing secrets
//! - Plaintext JSON import and export

pub mod cli;
pub mod core;
pub mod error;
