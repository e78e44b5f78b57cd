//! balance-digest - periodic budget category balance report
//!
//! Produces a human-readable report of budget subcategory balances and how
//! each changed since the last run, for people who do not use the budgeting
//! tool themselves.
//!
//! # Architecture
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Categories, balances, money, periods, snapshots
//! - `provider`: Budget data provider boundary
//! - `services`: Hierarchy builder, snapshot builder, run pipeline
//! - `reports`: Balance change report rendering
//! - `notify`: Report delivery boundary
//! - `storage`: Snapshot persistence
//!
//! # Example
//!
//! ```rust,ignore
//! use balance_digest::config::{DigestPaths, Settings};
//! use balance_digest::services::DigestService;
//!
//! let paths = DigestPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = SnapshotStore::new(paths.snapshot_file());
//! let service = DigestService::new(&settings, &store, &provider);
//! service.run(&dispatcher, chrono::Local::now())?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod notify;
pub mod provider;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{DigestError, DigestResult};
