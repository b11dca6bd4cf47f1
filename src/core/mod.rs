//! Core library components.
//!
//! This module contains the reusable logic for credential storage,
//! encryption, search and configuration handling. Nothing here reads the
//! terminal.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod domain;
pub mod selection;
pub mod store;
