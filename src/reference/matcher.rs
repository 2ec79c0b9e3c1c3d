//! Reference table lookup
//!
//! Case-insensitive exact matching of a food name or alias against the
//! reference table. Deliberately no substring or fuzzy matching: a near-miss
//! must not silently attribute the wrong protein density.

use super::table::{ReferenceEntry, BUILTIN_REFERENCE};

/// An immutable reference table with exact-match lookup.
///
/// Constructed over a static entry slice so tests can inject alternate
/// tables; `builtin()` wraps the shipped catalog.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceTable {
    entries: &'static [ReferenceEntry],
}

impl ReferenceTable {
    /// Wrap an explicit entry slice
    pub fn new(entries: &'static [ReferenceEntry]) -> Self {
        Self { entries }
    }

    /// The shipped reference catalog
    pub fn builtin() -> Self {
        Self::new(BUILTIN_REFERENCE)
    }

    /// All entries in declaration order
    pub fn entries(&self) -> &'static [ReferenceEntry] {
        self.entries
    }

    /// Look up a food by canonical name or alias, case-insensitively.
    ///
    /// Scans in declaration order; the first entry whose name or alias set
    /// matches wins, so earlier entries take precedence on alias collisions.
    pub fn find(&self, food_name: &str) -> Option<&'static ReferenceEntry> {
        self.entries.iter().find(|entry| {
            entry.name.eq_ignore_ascii_case(food_name)
                || entry
                    .aliases
                    .iter()
                    .any(|alias| alias.eq_ignore_ascii_case(food_name))
        })
    }
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::table::FoodCategory;

    #[test]
    fn test_find_by_canonical_name() {
        let table = ReferenceTable::builtin();
        let entry = table.find("Paneer").unwrap();
        assert_eq!(entry.name, "Paneer");
        assert_eq!(entry.protein_per_100g, 18.0);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let table = ReferenceTable::builtin();
        let entry = table.find("DAL").unwrap();
        assert_eq!(entry.name, "Lentils (Cooked)");
        assert_eq!(entry.protein_per_100g, 9.0);

        let entry = table.find("cHiCkEn BrEaSt").unwrap();
        assert_eq!(entry.name, "Chicken Breast");
    }

    #[test]
    fn test_find_by_alias() {
        let table = ReferenceTable::builtin();
        assert_eq!(table.find("shrimp").unwrap().name, "Prawns");
        assert_eq!(table.find("protein shake").unwrap().name, "Whey Protein Shake");
    }

    #[test]
    fn test_unknown_food_is_not_found() {
        let table = ReferenceTable::builtin();
        assert!(table.find("pizza").is_none());
    }

    #[test]
    fn test_no_substring_matching() {
        let table = ReferenceTable::builtin();
        // "chick" is a prefix of both "chicken" and "chickpeas" but matches neither
        assert!(table.find("chick").is_none());
        assert!(table.find("lentils (").is_none());
    }

    #[test]
    fn test_alias_collision_first_entry_wins() {
        static COLLIDING: &[ReferenceEntry] = &[
            ReferenceEntry {
                name: "First",
                aliases: &["shared"],
                protein_per_100g: 10.0,
                category: FoodCategory::Misc,
            },
            ReferenceEntry {
                name: "Second",
                aliases: &["shared"],
                protein_per_100g: 20.0,
                category: FoodCategory::Misc,
            },
        ];

        let table = ReferenceTable::new(COLLIDING);
        assert_eq!(table.find("shared").unwrap().name, "First");
    }
}
