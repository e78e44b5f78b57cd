//! Category hierarchy builder
//!
//! Turns the provider's flat category and subcategory collections into an
//! ordered two-level structure: category name to the subcategories it owns.
//! Report order follows provider order at both levels.

use std::collections::HashMap;

use crate::models::{Category, CategoryId, Subcategory, SubcategoryId};

/// A subcategory as it appears under its category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryEntry {
    pub name: String,
    pub id: SubcategoryId,
}

/// One category and its subcategories, keyed by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    pub name: String,
    /// Set from [`Category::is_internal`] when the node is created
    pub internal: bool,
    pub subcategories: Vec<SubcategoryEntry>,
}

impl CategoryNode {
    fn new(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            internal: category.is_internal(),
            subcategories: Vec::new(),
        }
    }

    /// Whether this category shows up in a report
    ///
    /// Internal categories and categories without subcategories are kept in
    /// the hierarchy but never rendered.
    pub fn is_reportable(&self) -> bool {
        !self.internal && !self.subcategories.is_empty()
    }

    /// Add a subcategory; a repeated name keeps its slot and takes the new id
    fn upsert(&mut self, subcategory: &Subcategory) {
        match self
            .subcategories
            .iter_mut()
            .find(|entry| entry.name == subcategory.name)
        {
            Some(entry) => entry.id = subcategory.id.clone(),
            None => self.subcategories.push(SubcategoryEntry {
                name: subcategory.name.clone(),
                id: subcategory.id.clone(),
            }),
        }
    }
}

/// Ordered category name to subcategory mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    categories: Vec<CategoryNode>,
}

impl Hierarchy {
    /// Build the hierarchy from provider collections
    ///
    /// Subcategories are matched to categories by owning category id.
    /// A subcategory whose owner is not in `categories` is dropped. Two
    /// categories with the same name share one slot (the first one's
    /// position); the later category's subcategories replace the earlier's.
    pub fn build(categories: &[Category], subcategories: &[Subcategory]) -> Self {
        let mut by_owner: HashMap<&CategoryId, Vec<&Subcategory>> = HashMap::new();
        for subcategory in subcategories {
            by_owner
                .entry(&subcategory.category_id)
                .or_default()
                .push(subcategory);
        }

        let mut hierarchy = Self::default();
        for category in categories {
            let node = hierarchy.slot_for(category);
            node.subcategories.clear();

            for subcategory in by_owner.get(&category.id).into_iter().flatten() {
                node.upsert(subcategory);
            }
        }

        hierarchy
    }

    fn slot_for(&mut self, category: &Category) -> &mut CategoryNode {
        let index = match self
            .categories
            .iter()
            .position(|node| node.name == category.name)
        {
            Some(index) => index,
            None => {
                self.categories.push(CategoryNode::new(category));
                self.categories.len() - 1
            }
        };
        &mut self.categories[index]
    }

    /// All categories in provider order, including unreportable ones
    pub fn categories(&self) -> &[CategoryNode] {
        &self.categories
    }

    /// Categories that appear in a report, in order
    pub fn reportable(&self) -> impl Iterator<Item = &CategoryNode> {
        self.categories.iter().filter(|node| node.is_reportable())
    }

    pub fn get(&self, name: &str) -> Option<&CategoryNode> {
        self.categories.iter().find(|node| node.name == name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(node: &CategoryNode) -> Vec<&str> {
        node.subcategories.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_groups_by_owning_id_in_source_order() {
        let categories = vec![Category::new("MC1", "Bills"), Category::new("MC2", "Fun")];
        let subcategories = vec![
            Subcategory::new("S3", "Movies", "MC2"),
            Subcategory::new("S1", "Rent", "MC1"),
            Subcategory::new("S2", "Power", "MC1"),
        ];

        let hierarchy = Hierarchy::build(&categories, &subcategories);

        let order: Vec<_> = hierarchy.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(order, vec!["Bills", "Fun"]);
        assert_eq!(names(hierarchy.get("Bills").unwrap()), vec!["Rent", "Power"]);
        assert_eq!(names(hierarchy.get("Fun").unwrap()), vec!["Movies"]);
        assert_eq!(
            hierarchy.get("Bills").unwrap().subcategories[0].id,
            SubcategoryId::new("S1")
        );
    }

    #[test]
    fn test_match_is_by_id_not_name() {
        // owner id equals another category's *name*; must not match it
        let categories = vec![Category::new("MC1", "Bills"), Category::new("Bills", "Other")];
        let subcategories = vec![Subcategory::new("S1", "Rent", "MC1")];

        let hierarchy = Hierarchy::build(&categories, &subcategories);
        assert_eq!(names(hierarchy.get("Bills").unwrap()), vec!["Rent"]);
        assert!(hierarchy.get("Other").unwrap().subcategories.is_empty());
    }

    #[test]
    fn test_orphan_subcategory_is_dropped() {
        let categories = vec![Category::new("MC1", "Bills")];
        let subcategories = vec![
            Subcategory::new("S1", "Rent", "MC1"),
            Subcategory::new("S9", "Ghost", "MC404"),
        ];

        let hierarchy = Hierarchy::build(&categories, &subcategories);
        assert_eq!(hierarchy.len(), 1);
        assert_eq!(names(hierarchy.get("Bills").unwrap()), vec!["Rent"]);
    }

    #[test]
    fn test_empty_and_internal_categories_stay_in_hierarchy() {
        let categories = vec![
            Category::new("MC0", "Internal Master Category"),
            Category::new("MC1", "Bills"),
            Category::new("MC2", "Empty"),
        ];
        let subcategories = vec![
            Subcategory::new("S0", "To be Budgeted", "MC0"),
            Subcategory::new("S1", "Rent", "MC1"),
        ];

        let hierarchy = Hierarchy::build(&categories, &subcategories);
        assert_eq!(hierarchy.len(), 3);

        let reportable: Vec<_> = hierarchy.reportable().map(|c| c.name.as_str()).collect();
        assert_eq!(reportable, vec!["Bills"]);

        let internal = hierarchy.get("Internal Master Category").unwrap();
        assert!(internal.internal);
        assert!(!internal.is_reportable());
        assert!(!hierarchy.get("Bills").unwrap().internal);
    }

    #[test]
    fn test_duplicate_subcategory_name_keeps_slot_takes_last_id() {
        let categories = vec![Category::new("MC1", "Bills")];
        let subcategories = vec![
            Subcategory::new("S1", "Rent", "MC1"),
            Subcategory::new("S2", "Power", "MC1"),
            Subcategory::new("S3", "Rent", "MC1"),
        ];

        let hierarchy = Hierarchy::build(&categories, &subcategories);
        let bills = hierarchy.get("Bills").unwrap();
        assert_eq!(names(bills), vec!["Rent", "Power"]);
        assert_eq!(bills.subcategories[0].id, SubcategoryId::new("S3"));
    }

    #[test]
    fn test_duplicate_category_name_later_wins_first_position() {
        let categories = vec![
            Category::new("MC1", "Bills"),
            Category::new("MC2", "Fun"),
            Category::new("MC3", "Bills"),
        ];
        let subcategories = vec![
            Subcategory::new("S1", "Rent", "MC1"),
            Subcategory::new("S3", "Water", "MC3"),
        ];

        let hierarchy = Hierarchy::build(&categories, &subcategories);
        let order: Vec<_> = hierarchy.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(order, vec!["Bills", "Fun"]);
        assert_eq!(names(hierarchy.get("Bills").unwrap()), vec!["Water"]);
    }
}
