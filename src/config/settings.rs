//! User settings for balance-digest
//!
//! Holds the report addressing, the provider export location, and the two
//! run policies that the pipeline leaves to the operator.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::DigestPaths;
use crate::error::DigestError;

/// When the freshly built snapshot is written back to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PersistPolicy {
    /// Persist once the report was rendered and handed to the dispatcher,
    /// regardless of per-recipient failures
    #[default]
    Always,
    /// Persist only when every recipient accepted the report
    OnCleanDelivery,
}

/// How to resolve two balance records for the same subcategory and period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The record that appears last in provider order wins
    #[default]
    LastWins,
    /// The larger balance wins
    Max,
    /// Abort the run
    Reject,
}

/// User settings for balance-digest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Name of the budget to report on
    #[serde(default)]
    pub budget_name: String,

    /// Location of the provider's budget export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_export: Option<PathBuf>,

    /// Sender address for the report
    #[serde(default)]
    pub from_address: String,

    /// Report recipients
    #[serde(default)]
    pub recipients: Vec<String>,

    /// Subject line prefix; the run date is appended
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,

    #[serde(default)]
    pub persist_policy: PersistPolicy,

    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

fn default_schema_version() -> u32 {
    1
}

fn default_subject_prefix() -> String {
    "Balances for".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            budget_name: String::new(),
            provider_export: None,
            from_address: String::new(),
            recipients: Vec::new(),
            subject_prefix: default_subject_prefix(),
            persist_policy: PersistPolicy::default(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &DigestPaths) -> Result<Self, DigestError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| DigestError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                DigestError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DigestPaths) -> Result<(), DigestError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| DigestError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| DigestError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Provider export path, required by every command that reads budget data
    pub fn require_provider_export(&self) -> Result<&PathBuf, DigestError> {
        self.provider_export
            .as_ref()
            .ok_or_else(|| DigestError::Config("provider_export is not set".into()))
    }

    /// Check everything a full run needs
    pub fn validate_for_run(&self) -> Result<(), DigestError> {
        self.require_provider_export()?;

        if self.from_address.trim().is_empty() {
            return Err(DigestError::Config("from_address is not set".into()));
        }

        if self.recipients.is_empty() {
            return Err(DigestError::Config("no recipients configured".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.subject_prefix, "Balances for");
        assert_eq!(settings.persist_policy, PersistPolicy::Always);
        assert_eq!(settings.duplicate_policy, DuplicatePolicy::LastWins);
        assert!(settings.recipients.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DigestPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.recipients = vec!["family@example.com".into()];
        settings.persist_policy = PersistPolicy::OnCleanDelivery;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.recipients, vec!["family@example.com".to_string()]);
        assert_eq!(loaded.persist_policy, PersistPolicy::OnCleanDelivery);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"duplicate_policy": "max"}"#).unwrap();
        assert_eq!(settings.duplicate_policy, DuplicatePolicy::Max);
        assert_eq!(settings.subject_prefix, "Balances for");
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_validate_for_run() {
        let mut settings = Settings::default();
        assert!(settings.validate_for_run().is_err());

        settings.provider_export = Some(PathBuf::from("budget.json"));
        settings.from_address = "me@example.com".into();
        assert!(settings.validate_for_run().is_err());

        settings.recipients.push("you@example.com".into());
        assert!(settings.validate_for_run().is_ok());
    }
}
