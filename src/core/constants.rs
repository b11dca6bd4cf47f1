//! Constants used throughout lockbox.
//!
//! Centralizes magic strings and configuration values.

/// Cipher used for session files, named the OpenSSL way.
pub const CIPHER_ALGORITHM: &str = "aes-128-cbc";

/// Header of an OpenSSL `enc` salted blob.
pub const SALT_MAGIC: &[u8; 8] = b"Salted__";

/// Salt length in bytes.
pub const SALT_LEN: usize = 8;

/// Column width of the base64 armour.
pub const ARMOR_WIDTH: usize = 64;

/// An unknown command is fuzzily matched only below this edit distance.
pub const FUZZY_THRESHOLD: usize = 2;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "LOCKBOX_LOG";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "LOCKBOX_CONFIG";

/// Config directory name under the platform config dir.
pub const CONFIG_DIR: &str = "lockbox";

/// Config file name.
pub const CONFIG_FILE: &str = "config.toml";

/// Default number of startup password attempts.
pub const DEFAULT_PASSWORD_ATTEMPTS: u32 = 3;
