//! Current-period snapshot construction

use chrono::Datelike;
use tracing::{debug, warn};

use crate::config::DuplicatePolicy;
use crate::error::{DigestError, DigestResult};
use crate::models::{BalanceSnapshot, BudgetPeriod, MonthlyCalculation};

/// Build the snapshot for the calendar month containing `now`
///
/// Only calculations whose key decodes to that month are kept. Keys that do
/// not match the provider's fixed-width layout are skipped with a warning.
/// Two records for the same subcategory are resolved by `policy`.
pub fn build_current_snapshot(
    calculations: &[MonthlyCalculation],
    now: impl Datelike,
    policy: DuplicatePolicy,
) -> DigestResult<BalanceSnapshot> {
    let period = BudgetPeriod::containing(now);
    let mut snapshot = BalanceSnapshot::new();
    let mut skipped = 0usize;

    for calculation in calculations {
        let record = match calculation.to_record() {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "skipping balance calculation");
                skipped += 1;
                continue;
            }
        };

        if record.period != period {
            continue;
        }

        let Some(existing) = snapshot.get(&record.subcategory_id) else {
            snapshot.insert(record.subcategory_id, record.balance);
            continue;
        };

        warn!(
            subcategory = %record.subcategory_id,
            %period,
            ?policy,
            "duplicate balance record"
        );
        match policy {
            DuplicatePolicy::LastWins => {
                snapshot.insert(record.subcategory_id, record.balance);
            }
            DuplicatePolicy::Max => {
                snapshot.insert(record.subcategory_id, existing.max(record.balance));
            }
            DuplicatePolicy::Reject => {
                return Err(DigestError::DuplicateBalance {
                    subcategory: record.subcategory_id.to_string(),
                    period: period.to_string(),
                });
            }
        }
    }

    debug!(%period, entries = snapshot.len(), skipped, "built current snapshot");
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, SubcategoryId};
    use chrono::NaiveDate;

    fn october() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn calc(key: &str, cents: i64) -> MonthlyCalculation {
        MonthlyCalculation::new(key, Money::from_cents(cents))
    }

    fn id(s: &str) -> SubcategoryId {
        SubcategoryId::new(s)
    }

    #[test]
    fn test_keeps_only_current_month() {
        let calculations = vec![
            calc("mcb/2026-09/S1", 40000),
            calc("mcb/2026-10/S1", 50000),
            calc("mcb/2026-11/S1", 60000),
            calc("mcb/2025-10/S2", 100),
        ];

        let snapshot =
            build_current_snapshot(&calculations, october(), DuplicatePolicy::LastWins).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get_or_default(&id("S1")), Money::from_cents(50000));
        assert_eq!(snapshot.get_or_default(&id("S2")), Money::zero());
    }

    #[test]
    fn test_malformed_keys_are_skipped() {
        let calculations = vec![calc("garbage", 1), calc("mcb/2026-10/S1", 500)];

        let snapshot =
            build_current_snapshot(&calculations, october(), DuplicatePolicy::LastWins).unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_duplicate_last_wins() {
        let calculations = vec![calc("mcb/2026-10/S1", 900), calc("mcb/2026-10/S1", 100)];

        let snapshot =
            build_current_snapshot(&calculations, october(), DuplicatePolicy::LastWins).unwrap();
        assert_eq!(snapshot.get_or_default(&id("S1")), Money::from_cents(100));
    }

    #[test]
    fn test_duplicate_max() {
        let calculations = vec![calc("mcb/2026-10/S1", 900), calc("mcb/2026-10/S1", 100)];

        let snapshot =
            build_current_snapshot(&calculations, october(), DuplicatePolicy::Max).unwrap();
        assert_eq!(snapshot.get_or_default(&id("S1")), Money::from_cents(900));
    }

    #[test]
    fn test_duplicate_reject() {
        let calculations = vec![calc("mcb/2026-10/S1", 900), calc("mcb/2026-10/S1", 100)];

        let err =
            build_current_snapshot(&calculations, october(), DuplicatePolicy::Reject).unwrap_err();
        assert!(matches!(err, DigestError::DuplicateBalance { .. }));
    }

    #[test]
    fn test_duplicate_in_other_month_is_ignored() {
        let calculations = vec![
            calc("mcb/2026-09/S1", 900),
            calc("mcb/2026-09/S1", 100),
            calc("mcb/2026-10/S1", 5),
        ];

        let snapshot =
            build_current_snapshot(&calculations, october(), DuplicatePolicy::Reject).unwrap();
        assert_eq!(snapshot.get_or_default(&id("S1")), Money::from_cents(5));
    }
}
