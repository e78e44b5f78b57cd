//! Provider backed by a JSON budget export on disk
//!
//! The export carries the budget name next to the three collections:
//!
//! ```json
//! {
//!   "budget_name": "Household",
//!   "master_categories": [{"id": "MC1", "name": "Bills"}],
//!   "subcategories": [{"id": "S1", "name": "Rent", "master_category_id": "MC1"}],
//!   "monthly_subcategory_budget_calculations": [
//!     {"entities_monthly_subcategory_budget_id": "mcb/2026-10/S1", "balance": 500.0}
//!   ]
//! }
//! ```

use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use super::{BudgetData, BudgetProvider};
use crate::error::{DigestError, DigestResult};
use crate::storage::open_if_exists;

#[derive(Deserialize)]
struct ExportFile {
    #[serde(default)]
    budget_name: Option<String>,

    #[serde(flatten)]
    data: BudgetData,
}

/// Reads budget data from an export file
pub struct JsonExportProvider {
    path: PathBuf,
}

impl JsonExportProvider {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl BudgetProvider for JsonExportProvider {
    fn fetch(&self, budget_name: &str) -> DigestResult<BudgetData> {
        let reader = open_if_exists(&self.path)
            .map_err(|e| DigestError::ProviderConnection(e.to_string()))?
            .ok_or_else(|| {
                DigestError::ProviderConnection(format!(
                    "budget export not found: {}",
                    self.path.display()
                ))
            })?;

        let export: ExportFile = serde_json::from_reader(reader).map_err(|e| {
            DigestError::Provider(format!("Failed to parse {}: {}", self.path.display(), e))
        })?;

        // An unnamed export matches any budget
        if let Some(name) = &export.budget_name {
            if !budget_name.is_empty() && name != budget_name {
                return Err(DigestError::ProviderConnection(format!(
                    "budget '{}' not found (export holds '{}')",
                    budget_name, name
                )));
            }
        }

        debug!(
            categories = export.data.master_categories.len(),
            subcategories = export.data.subcategories.len(),
            calculations = export.data.calculations.len(),
            "budget export loaded"
        );

        Ok(export.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    const EXPORT: &str = r#"{
        "budget_name": "Household",
        "master_categories": [{"id": "MC1", "name": "Bills"}],
        "subcategories": [{"id": "S1", "name": "Rent", "master_category_id": "MC1"}],
        "monthly_subcategory_budget_calculations": [
            {"entities_monthly_subcategory_budget_id": "mcb/2026-10/S1", "balance": 500.0}
        ]
    }"#;

    fn write_export(temp_dir: &TempDir, contents: &str) -> JsonExportProvider {
        let path = temp_dir.path().join("export.json");
        std::fs::write(&path, contents).unwrap();
        JsonExportProvider::new(path)
    }

    #[test]
    fn test_fetch() {
        let temp_dir = TempDir::new().unwrap();
        let provider = write_export(&temp_dir, EXPORT);

        let data = provider.fetch("Household").unwrap();
        assert_eq!(data.master_categories[0].name, "Bills");
        assert_eq!(data.subcategories[0].category_id.as_str(), "MC1");
        assert_eq!(data.calculations[0].balance, Money::from_cents(50000));
    }

    #[test]
    fn test_missing_export_is_connection_failure() {
        let temp_dir = TempDir::new().unwrap();
        let provider = JsonExportProvider::new(temp_dir.path().join("missing.json"));

        assert!(provider.fetch("Household").unwrap_err().is_provider_connection());
    }

    #[test]
    fn test_wrong_budget_is_connection_failure() {
        let temp_dir = TempDir::new().unwrap();
        let provider = write_export(&temp_dir, EXPORT);

        assert!(provider.fetch("Business").unwrap_err().is_provider_connection());
    }

    #[test]
    fn test_garbage_export_is_provider_error() {
        let temp_dir = TempDir::new().unwrap();
        let provider = write_export(&temp_dir, "{ not json");

        assert!(matches!(
            provider.fetch("Household"),
            Err(DigestError::Provider(_))
        ));
    }
}
