//! Curated protein reference table
//!
//! Average protein per 100g of cooked servings, leaning toward foods common
//! in Indian home cooking. Declaration order matters: lookups return the
//! first matching entry.

use serde::Serialize;

/// Broad food category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Animal,
    Plant,
    Dairy,
    Grain,
    Misc,
}

/// One reference food: canonical name, accepted aliases, protein density
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub protein_per_100g: f64,
    pub category: FoodCategory,
}

/// The shipped reference table
pub const BUILTIN_REFERENCE: &[ReferenceEntry] = &[
    ReferenceEntry {
        name: "Chicken Breast",
        aliases: &["grilled chicken", "chicken", "chicken curry"],
        protein_per_100g: 31.0,
        category: FoodCategory::Animal,
    },
    ReferenceEntry {
        name: "Egg",
        aliases: &["boiled egg", "omelette", "scrambled egg", "egg bhurji"],
        protein_per_100g: 13.0,
        category: FoodCategory::Animal,
    },
    ReferenceEntry {
        name: "Paneer",
        aliases: &["cottage cheese"],
        protein_per_100g: 18.0,
        category: FoodCategory::Dairy,
    },
    ReferenceEntry {
        name: "Tofu",
        aliases: &["soy paneer"],
        protein_per_100g: 15.0,
        category: FoodCategory::Plant,
    },
    ReferenceEntry {
        name: "Lentils (Cooked)",
        aliases: &["dal", "lentils", "sambar"],
        protein_per_100g: 9.0,
        category: FoodCategory::Plant,
    },
    ReferenceEntry {
        name: "Chickpeas (Cooked)",
        aliases: &["chole", "channa", "hummus"],
        protein_per_100g: 8.0,
        category: FoodCategory::Plant,
    },
    ReferenceEntry {
        name: "Kidney Beans (Cooked)",
        aliases: &["rajma"],
        protein_per_100g: 8.0,
        category: FoodCategory::Plant,
    },
    ReferenceEntry {
        name: "Black Beans (Cooked)",
        aliases: &["kaala channa"],
        protein_per_100g: 8.9,
        category: FoodCategory::Plant,
    },
    ReferenceEntry {
        name: "Quinoa (Cooked)",
        aliases: &[],
        protein_per_100g: 4.4,
        category: FoodCategory::Grain,
    },
    ReferenceEntry {
        name: "Cooked Rice",
        aliases: &["rice", "white rice", "brown rice"],
        protein_per_100g: 2.5,
        category: FoodCategory::Grain,
    },
    ReferenceEntry {
        name: "Roti",
        aliases: &["chapati", "paratha"],
        protein_per_100g: 8.0,
        category: FoodCategory::Grain,
    },
    ReferenceEntry {
        name: "Curd",
        aliases: &["yogurt", "dahi"],
        protein_per_100g: 3.5,
        category: FoodCategory::Dairy,
    },
    ReferenceEntry {
        name: "Milk",
        aliases: &["toned milk", "skim milk"],
        protein_per_100g: 3.4,
        category: FoodCategory::Dairy,
    },
    ReferenceEntry {
        name: "Peanuts",
        aliases: &["groundnuts", "peanut butter"],
        protein_per_100g: 26.0,
        category: FoodCategory::Plant,
    },
    ReferenceEntry {
        name: "Almonds",
        aliases: &[],
        protein_per_100g: 21.0,
        category: FoodCategory::Plant,
    },
    ReferenceEntry {
        name: "Walnuts",
        aliases: &[],
        protein_per_100g: 15.0,
        category: FoodCategory::Plant,
    },
    ReferenceEntry {
        name: "Fish",
        aliases: &["salmon", "rohu", "hilsa", "tilapia"],
        protein_per_100g: 22.0,
        category: FoodCategory::Animal,
    },
    ReferenceEntry {
        name: "Prawns",
        aliases: &["shrimp"],
        protein_per_100g: 24.0,
        category: FoodCategory::Animal,
    },
    ReferenceEntry {
        name: "Mutton",
        aliases: &["goat meat", "lamb"],
        protein_per_100g: 25.0,
        category: FoodCategory::Animal,
    },
    ReferenceEntry {
        name: "Beef",
        aliases: &[],
        protein_per_100g: 26.0,
        category: FoodCategory::Animal,
    },
    ReferenceEntry {
        name: "Soy Chunks",
        aliases: &["soy nuggets", "nutrela"],
        protein_per_100g: 52.0,
        category: FoodCategory::Plant,
    },
    ReferenceEntry {
        name: "Sprouts",
        aliases: &["moong sprout", "sprouted moong"],
        protein_per_100g: 8.0,
        category: FoodCategory::Plant,
    },
    ReferenceEntry {
        name: "Greek Yogurt",
        aliases: &[],
        protein_per_100g: 10.0,
        category: FoodCategory::Dairy,
    },
    ReferenceEntry {
        name: "Whey Protein Shake",
        aliases: &["protein shake"],
        protein_per_100g: 80.0,
        category: FoodCategory::Misc,
    },
];
