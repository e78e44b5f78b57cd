//! Budget data provider boundary
//!
//! The report only consumes three read-only collections from a budget:
//! master categories, subcategories, and per-period balance calculations.
//! How they are fetched (session, transport) belongs to the provider.

pub mod json_export;

pub use json_export::JsonExportProvider;

use serde::{Deserialize, Serialize};

use crate::error::DigestResult;
use crate::models::{Category, MonthlyCalculation, Subcategory};

/// Everything the report needs from one budget, in provider order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetData {
    #[serde(default)]
    pub master_categories: Vec<Category>,

    #[serde(default)]
    pub subcategories: Vec<Subcategory>,

    #[serde(default, rename = "monthly_subcategory_budget_calculations")]
    pub calculations: Vec<MonthlyCalculation>,
}

/// Source of budget data
///
/// Implementations return [`DigestError::ProviderConnection`] when the
/// session cannot be established; the run then stops without reporting or
/// persisting anything.
///
/// [`DigestError::ProviderConnection`]: crate::error::DigestError::ProviderConnection
pub trait BudgetProvider {
    fn fetch(&self, budget_name: &str) -> DigestResult<BudgetData>;
}
