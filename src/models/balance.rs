//! Per-period subcategory balance calculations
//!
//! The provider packs the period and the subcategory id into one composite
//! key with a fixed-width layout:
//!
//! ```text
//! mcb/2026-10/6a1f...
//! 0   4      11 12
//! ```
//!
//! Bytes `4..11` hold the `YYYY-MM` period, byte `11` is a separator, and
//! everything from byte `12` is the subcategory id. The prefix is ignored.
//! This couples us to the provider's key format, so every key is validated
//! before its fields are trusted.

use serde::{Deserialize, Serialize};

use super::ids::SubcategoryId;
use super::money::Money;
use super::period::BudgetPeriod;
use crate::error::{DigestError, DigestResult};

const PERIOD_RANGE: std::ops::Range<usize> = 4..11;
const SEPARATOR_OFFSET: usize = 11;
const ID_OFFSET: usize = 12;

/// A raw balance calculation as delivered by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCalculation {
    #[serde(rename = "entities_monthly_subcategory_budget_id")]
    pub key: String,
    pub balance: Money,
}

impl MonthlyCalculation {
    pub fn new(key: impl Into<String>, balance: Money) -> Self {
        Self {
            key: key.into(),
            balance,
        }
    }

    /// Decode the composite key into a typed record
    pub fn to_record(&self) -> DigestResult<BalanceRecord> {
        let key = CalculationKey::parse(&self.key)?;
        Ok(BalanceRecord {
            subcategory_id: key.subcategory_id,
            period: key.period,
            balance: self.balance,
        })
    }
}

/// Decoded fields of a composite calculation key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationKey {
    pub period: BudgetPeriod,
    pub subcategory_id: SubcategoryId,
}

impl CalculationKey {
    /// Parse a composite key, rejecting anything off the fixed-width layout
    pub fn parse(key: &str) -> DigestResult<Self> {
        let invalid = |reason: String| DigestError::InvalidKey {
            key: key.to_string(),
            reason,
        };

        let period_str = key
            .get(PERIOD_RANGE)
            .ok_or_else(|| invalid("too short to hold a period".into()))?;
        let period = BudgetPeriod::parse(period_str).map_err(|e| invalid(e.to_string()))?;

        match key.as_bytes().get(SEPARATOR_OFFSET) {
            Some(b) if !b.is_ascii_alphanumeric() => {}
            _ => return Err(invalid("missing separator after period".into())),
        }

        let id = key
            .get(ID_OFFSET..)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| invalid("missing subcategory id".into()))?;

        Ok(Self {
            period,
            subcategory_id: SubcategoryId::new(id),
        })
    }
}

/// One subcategory's balance for one period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceRecord {
    pub subcategory_id: SubcategoryId,
    pub period: BudgetPeriod,
    pub balance: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key() {
        let key = CalculationKey::parse("mcb/2017-05/A1B2-C3D4").unwrap();
        assert_eq!(key.period.to_string(), "2017-05");
        assert_eq!(key.subcategory_id, SubcategoryId::new("A1B2-C3D4"));
    }

    #[test]
    fn test_parse_key_ignores_prefix_content() {
        let key = CalculationKey::parse("xyz_2026-10_S1").unwrap();
        assert_eq!(key.subcategory_id.as_str(), "S1");
    }

    #[test]
    fn test_parse_key_rejects_bad_layouts() {
        // prefix one character too long shifts every field
        assert!(CalculationKey::parse("mcbc/2017-05/S1").is_err());
        assert!(CalculationKey::parse("mcb/2017-05/").is_err());
        assert!(CalculationKey::parse("mcb/2017-05").is_err());
        assert!(CalculationKey::parse("mcb/2017-0512S1").is_err());
        assert!(CalculationKey::parse("mcb/2017-13/S1").is_err());
        assert!(CalculationKey::parse("").is_err());
    }

    #[test]
    fn test_parse_key_non_ascii_does_not_panic() {
        assert!(CalculationKey::parse("mcé/2017-05/S1").is_err());
    }

    #[test]
    fn test_to_record() {
        let calc = MonthlyCalculation::new("mcb/2026-10/S1", Money::from_cents(50000));
        let record = calc.to_record().unwrap();
        assert_eq!(record.subcategory_id.as_str(), "S1");
        assert_eq!(record.period, BudgetPeriod::monthly(2026, 10).unwrap());
        assert_eq!(record.balance, Money::from_cents(50000));
    }

    #[test]
    fn test_calculation_deserialize() {
        let json = r#"{"entities_monthly_subcategory_budget_id": "mcb/2026-10/S1", "balance": 12.5}"#;
        let calc: MonthlyCalculation = serde_json::from_str(json).unwrap();
        assert_eq!(calc.balance, Money::from_cents(1250));
    }
}
