//! Durable store for the balance snapshot
//!
//! Holds exactly one prior snapshot. Loading a missing file is a first run;
//! loading a file that cannot be read as a mapping is fatal. Persisting
//! replaces the file in full.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{DigestError, DigestResult};
use crate::models::BalanceSnapshot;

use super::file_io::{open_if_exists, write_json_atomic};

/// Reads and writes the snapshot file
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot written by the previous run
    ///
    /// Returns an empty snapshot when no file exists. Stored values may be
    /// plain numbers or objects with a `balance` field.
    pub fn load_previous(&self) -> DigestResult<BalanceSnapshot> {
        let Some(reader) = open_if_exists(&self.path)? else {
            info!(path = %self.path.display(), "no previous snapshot, treating as first run");
            return Ok(BalanceSnapshot::new());
        };

        let snapshot: BalanceSnapshot =
            serde_json::from_reader(reader).map_err(|e| DigestError::MalformedSnapshot {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        debug!(entries = snapshot.len(), "loaded previous snapshot");
        Ok(snapshot)
    }

    /// Overwrite the stored snapshot
    pub fn persist(&self, snapshot: &BalanceSnapshot) -> DigestResult<()> {
        write_json_atomic(&self.path, snapshot)?;
        info!(entries = snapshot.len(), path = %self.path.display(), "snapshot persisted");
        Ok(())
    }
}
