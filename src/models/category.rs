//! Category and Subcategory models
//!
//! Master categories group subcategories for display. A subcategory points at
//! its owning category by id, never by name.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, SubcategoryId};

/// Substring that marks a category as provider-internal
pub const INTERNAL_CATEGORY_MARKER: &str = "Internal";

/// A top-level budget grouping (e.g., "Bills")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Whether this category is excluded from reports (case-sensitive)
    pub fn is_internal(&self) -> bool {
        self.name.contains(INTERNAL_CATEGORY_MARKER)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A named line item within a category, carrying a balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,

    /// The owning category
    #[serde(rename = "master_category_id")]
    pub category_id: CategoryId,
}

impl Subcategory {
    pub fn new(
        id: impl Into<SubcategoryId>,
        name: impl Into<String>,
        category_id: impl Into<CategoryId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category_id: category_id.into(),
        }
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_marker() {
        assert!(Category::new("MC0", "Internal Master Category").is_internal());
        assert!(Category::new("MC9", "Hidden Internal Stuff").is_internal());
        assert!(!Category::new("MC1", "Bills").is_internal());
        assert!(!Category::new("MC2", "internal savings").is_internal());
    }

    #[test]
    fn test_subcategory_deserialize() {
        let json = r#"{"id": "S1", "name": "Rent", "master_category_id": "MC1"}"#;
        let sub: Subcategory = serde_json::from_str(json).unwrap();
        assert_eq!(sub, Subcategory::new("S1", "Rent", "MC1"));
    }
}
