//! Path management for balance-digest
//!
//! ## Path Resolution Order
//!
//! 1. `BALANCE_DIGEST_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/balance-digest` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::DigestError;

/// Environment variable that overrides the base directory
pub const DIR_ENV_VAR: &str = "BALANCE_DIGEST_DIR";

/// Manages all paths used by balance-digest
#[derive(Debug, Clone)]
pub struct DigestPaths {
    /// Base directory for all balance-digest files
    base_dir: PathBuf,
}

impl DigestPaths {
    /// Create a new DigestPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, DigestError> {
        let base_dir = if let Ok(custom) = std::env::var(DIR_ENV_VAR) {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "balance-digest")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    DigestError::Config("Could not determine a home directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create DigestPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the persisted balance snapshot
    pub fn snapshot_file(&self) -> PathBuf {
        self.base_dir.join("balances.json")
    }

    /// Directory that receives dispatched report messages
    pub fn outbox_dir(&self) -> PathBuf {
        self.base_dir.join("outbox")
    }

    /// Ensure the base and outbox directories exist
    pub fn ensure_directories(&self) -> Result<(), DigestError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DigestError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.outbox_dir())
            .map_err(|e| DigestError::Io(format!("Failed to create outbox directory: {}", e)))?;

        Ok(())
    }

    /// Check if balance-digest has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
