//! Domain types.

mod credential;

pub use credential::{Credential, Field};
