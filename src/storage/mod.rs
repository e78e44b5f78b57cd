//! Storage layer for balance-digest
//!
//! JSON file storage with atomic writes. The only durable state is the
//! balance snapshot carried from one run to the next.

pub mod file_io;
pub mod snapshots;

pub use file_io::{open_if_exists, write_json_atomic};
pub use snapshots::SnapshotStore;
