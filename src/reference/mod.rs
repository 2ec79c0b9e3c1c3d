//! Protein reference data
//!
//! A curated static catalog of foods with protein density, and the
//! exact-match lookup used by the estimation core.

pub mod matcher;
pub mod table;

pub use matcher::ReferenceTable;
pub use table::{FoodCategory, ReferenceEntry, BUILTIN_REFERENCE};
