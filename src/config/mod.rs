//! Configuration module for balance-digest
//!
//! This module provides configuration management including:
//! - Base directory resolution
//! - User settings persistence
//! - Run policies (persistence, duplicate balances)

pub mod paths;
pub mod settings;

pub use paths::DigestPaths;
pub use settings::{DuplicatePolicy, PersistPolicy, Settings};
