//! Core data models for balance-digest
//!
//! This module contains the data structures the report is built from:
//! categories, subcategories, per-period balance calculations, and balance
//! snapshots.

pub mod balance;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod snapshot;

pub use balance::{BalanceRecord, CalculationKey, MonthlyCalculation};
pub use category::{Category, Subcategory, INTERNAL_CATEGORY_MARKER};
pub use ids::{CategoryId, SubcategoryId};
pub use money::Money;
pub use period::{BudgetPeriod, PeriodParseError};
pub use snapshot::BalanceSnapshot;
