//! Credential type.
//!
//! One named account record. The serialized field names are the on-disk
//! contract shared with existing exports and must not change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommandError;

/// Timestamp layout: local ISO-8601 date-time with milliseconds.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// A single account record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credential {
    /// Primary key in the store.
    pub name: String,
    /// Login / user name.
    #[serde(rename = "pseudo")]
    pub login: String,
    pub email: String,
    /// The password.
    #[serde(rename = "password")]
    pub secret: String,
    pub notes: String,
    #[serde(
        rename = "creation date",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
    #[serde(
        rename = "modification date",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified_at: Option<String>,
}

impl Credential {
    /// Create an unsaved credential with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether every pattern is a case-insensitive substring of at least
    /// one searchable field (name, login, email, notes).
    pub fn contains_all<S: AsRef<str>>(&self, patterns: &[S]) -> bool {
        let fields = [
            self.name.to_lowercase(),
            self.login.to_lowercase(),
            self.email.to_lowercase(),
            self.notes.to_lowercase(),
        ];
        patterns.iter().all(|pattern| {
            let pattern = pattern.as_ref().to_lowercase();
            fields.iter().any(|field| field.contains(&pattern))
        })
    }

    /// Whether the regex fully matches one of the searchable fields.
    ///
    /// The regex must already be anchored.
    pub fn matches(&self, regex: &regex::Regex) -> bool {
        [&self.name, &self.login, &self.email, &self.notes]
            .iter()
            .any(|field| regex.is_match(field))
    }

    /// Value of a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Login => &self.login,
            Field::Email => &self.email,
            Field::Secret => &self.secret,
            Field::Notes => &self.notes,
        }
    }

    /// Same editable content, ignoring timestamps.
    pub fn same_content(&self, other: &Credential) -> bool {
        self.name == other.name
            && self.login == other.login
            && self.email == other.email
            && self.secret == other.secret
            && self.notes == other.notes
    }

    /// Copy the editable fields of `other` and stamp the modification time.
    pub fn override_with(&mut self, other: Credential) {
        self.name = other.name;
        self.login = other.login;
        self.email = other.email;
        self.secret = other.secret;
        self.notes = other.notes;
        self.touch();
    }

    /// Stamp the modification time, and the creation time on first save.
    pub fn touch(&mut self) {
        let now = chrono::Local::now()
            .naive_local()
            .format(TIMESTAMP_FORMAT)
            .to_string();
        if self.created_at.as_deref().map_or(true, str::is_empty) {
            self.created_at = Some(now.clone());
        }
        self.modified_at = Some(now);
    }

    /// Trim surrounding whitespace on every editable field.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            login: self.login.trim().to_string(),
            email: self.email.trim().to_string(),
            secret: self.secret.trim().to_string(),
            notes: self.notes.trim().to_string(),
            ..self
        }
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An addressable credential field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Login,
    Email,
    Secret,
    Notes,
}

impl FromStr for Field {
    type Err = CommandError;

    /// Accepts the legacy names: `pass...` and `note...` match by prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "name" => Ok(Field::Name),
            "pseudo" | "login" => Ok(Field::Login),
            "email" => Ok(Field::Email),
            _ if lower.starts_with("pass") => Ok(Field::Secret),
            _ if lower.starts_with("note") => Ok(Field::Notes),
            _ => Err(CommandError::InvalidField(s.to_string())),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Login => "pseudo",
            Field::Email => "email",
            Field::Secret => "password",
            Field::Notes => "notes",
        };
        f.write_str(name)
    }
}
