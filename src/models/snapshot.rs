//! Point-in-time mapping from subcategory to balance
//!
//! A miss is not an error: any subcategory without an entry reads as zero.
//! Lookups go through [`BalanceSnapshot::get_or_default`]; nothing is ever
//! inserted as a side effect of reading.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::ids::SubcategoryId;
use super::money::Money;

/// Subcategory id to balance, defaulting to zero on miss
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BalanceSnapshot {
    balances: BTreeMap<SubcategoryId, Money>,
}

impl BalanceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance for a subcategory, or zero when it has no entry
    pub fn get_or_default(&self, id: &SubcategoryId) -> Money {
        self.balances.get(id).copied().unwrap_or_default()
    }

    /// Balance for a subcategory, `None` when it has no entry
    pub fn get(&self, id: &SubcategoryId) -> Option<Money> {
        self.balances.get(id).copied()
    }

    pub fn contains(&self, id: &SubcategoryId) -> bool {
        self.balances.contains_key(id)
    }

    /// Set a balance, returning the one it replaced
    pub fn insert(&mut self, id: SubcategoryId, balance: Money) -> Option<Money> {
        self.balances.insert(id, balance)
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Entries in id order
    pub fn iter(&self) -> impl Iterator<Item = (&SubcategoryId, Money)> {
        self.balances.iter().map(|(id, balance)| (id, *balance))
    }
}

impl FromIterator<(SubcategoryId, Money)> for BalanceSnapshot {
    fn from_iter<I: IntoIterator<Item = (SubcategoryId, Money)>>(iter: I) -> Self {
        Self {
            balances: iter.into_iter().collect(),
        }
    }
}

/// Accepted shapes for one stored value
///
/// Current files hold plain numbers. Older files stored the whole provider
/// record, of which only `balance` is kept.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredBalance {
    Amount(Money),
    Record { balance: Money },
}

impl From<StoredBalance> for Money {
    fn from(stored: StoredBalance) -> Self {
        match stored {
            StoredBalance::Amount(amount) => amount,
            StoredBalance::Record { balance } => balance,
        }
    }
}

impl<'de> Deserialize<'de> for BalanceSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = BTreeMap::<SubcategoryId, StoredBalance>::deserialize(deserializer)?;
        Ok(stored
            .into_iter()
            .map(|(id, value)| (id, Money::from(value)))
            .collect())
    }
}
