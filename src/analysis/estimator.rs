//! Fallback protein estimation
//!
//! Produces a usable analysis when the vision model is unavailable or its
//! response cannot be trusted. This is the terminal fallback for every other
//! failure path, so it has no I/O and cannot fail.

use crate::models::{AnalysisResult, FoodItem};
use crate::reference::ReferenceTable;

/// Protein density assumed for foods missing from the reference table.
///
/// A known-imprecise placeholder representing a generic moderate-protein
/// food; callers see the template disclosure message rather than a silent
/// substitution.
pub const DEFAULT_PROTEIN_DENSITY: f64 = 8.0;

/// Fixed high-protein suggestions returned with every fallback estimate
pub const DEFAULT_SUGGESTIONS: [&str; 8] = [
    "paneer tikka",
    "masoor dal",
    "tofu stir fry",
    "egg white omelette",
    "chicken breast",
    "greek yogurt",
    "soy chunks curry",
    "sprouted moong salad",
];

/// Template servings assumed when the caller supplies nothing at all
const DEFAULT_ASSUMED_SERVINGS: &[(&str, f64)] = &[
    ("Paneer", 120.0),
    ("Lentils (Cooked)", 200.0),
    ("Cooked Rice", 180.0),
];

/// Message used when caller-supplied foods are passed through verbatim
pub const REFERENCE_DATA_MESSAGE: &str =
    "Protein estimates were calculated using reference data because no AI key is configured.";

/// Message used for the template-answer path
pub const TEMPLATE_MESSAGE: &str =
    "No vision model configured. Displaying a template estimate; connect an OpenAI key for photo analysis.";

/// A named serving template: how much of which food to assume
#[derive(Debug, Clone, PartialEq)]
pub struct AssumedServing {
    pub name: String,
    pub quantity_grams: f64,
}

/// Options for `fallback_estimate`
#[derive(Debug, Clone, Default)]
pub struct EstimateOptions {
    /// Foods the user already entered manually; returned verbatim when
    /// non-empty so manual entries survive an unreachable AI path.
    pub fallback_foods: Vec<FoodItem>,
    /// Serving templates to estimate from; the default template staples are
    /// used when absent.
    pub assumed_servings: Option<Vec<AssumedServing>>,
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn default_suggestions() -> Vec<String> {
    DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
}

fn default_assumed_servings() -> Vec<AssumedServing> {
    DEFAULT_ASSUMED_SERVINGS
        .iter()
        .map(|(name, quantity_grams)| AssumedServing {
            name: name.to_string(),
            quantity_grams: *quantity_grams,
        })
        .collect()
}

/// Produce a deterministic protein estimate without a vision model.
///
/// Never fails: with `fallback_foods` the caller's entries pass through
/// unchanged; otherwise each assumed serving is priced against the reference
/// table, defaulting to `DEFAULT_PROTEIN_DENSITY` for unknown foods.
pub fn fallback_estimate(table: &ReferenceTable, options: EstimateOptions) -> AnalysisResult {
    if !options.fallback_foods.is_empty() {
        return AnalysisResult {
            foods: options.fallback_foods,
            suggestions: default_suggestions(),
            message: REFERENCE_DATA_MESSAGE.to_string(),
        };
    }

    let servings = options
        .assumed_servings
        .unwrap_or_else(default_assumed_servings);

    let foods = servings
        .into_iter()
        .map(|serving| {
            let density = table
                .find(&serving.name)
                .map(|entry| entry.protein_per_100g)
                .unwrap_or(DEFAULT_PROTEIN_DENSITY);

            FoodItem {
                protein_grams: round1(density / 100.0 * serving.quantity_grams),
                name: serving.name,
                quantity_grams: serving.quantity_grams,
                notes: None,
            }
        })
        .collect();

    AnalysisResult {
        foods,
        suggestions: default_suggestions(),
        message: TEMPLATE_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_estimate_uses_default_servings() {
        let table = ReferenceTable::builtin();
        let result = fallback_estimate(&table, EstimateOptions::default());

        assert_eq!(result.foods.len(), 3);

        assert_eq!(result.foods[0].name, "Paneer");
        assert_eq!(result.foods[0].quantity_grams, 120.0);
        assert_eq!(result.foods[0].protein_grams, 21.6); // 18/100 * 120

        assert_eq!(result.foods[1].name, "Lentils (Cooked)");
        assert_eq!(result.foods[1].quantity_grams, 200.0);
        assert_eq!(result.foods[1].protein_grams, 18.0); // 9/100 * 200

        assert_eq!(result.foods[2].name, "Cooked Rice");
        assert_eq!(result.foods[2].quantity_grams, 180.0);
        assert_eq!(result.foods[2].protein_grams, 4.5); // 2.5/100 * 180

        assert_eq!(result.suggestions.len(), 8);
        assert_eq!(result.message, TEMPLATE_MESSAGE);
    }

    #[test]
    fn test_fallback_foods_pass_through_verbatim() {
        let table = ReferenceTable::builtin();
        let foods = vec![FoodItem {
            name: "X".to_string(),
            quantity_grams: 50.0,
            protein_grams: 12.0,
            notes: None,
        }];

        let result = fallback_estimate(
            &table,
            EstimateOptions {
                fallback_foods: foods.clone(),
                assumed_servings: None,
            },
        );

        // No recomputation: the entries survive exactly as supplied
        assert_eq!(result.foods, foods);
        assert_eq!(result.suggestions, DEFAULT_SUGGESTIONS.to_vec());
        assert_eq!(result.message, REFERENCE_DATA_MESSAGE);
    }

    #[test]
    fn test_unknown_food_uses_default_density() {
        let table = ReferenceTable::builtin();
        let result = fallback_estimate(
            &table,
            EstimateOptions {
                fallback_foods: Vec::new(),
                assumed_servings: Some(vec![AssumedServing {
                    name: "Mystery Stew".to_string(),
                    quantity_grams: 150.0,
                }]),
            },
        );

        assert_eq!(result.foods.len(), 1);
        assert_eq!(result.foods[0].protein_grams, 12.0); // 8/100 * 150
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let table = ReferenceTable::builtin();
        let first = fallback_estimate(&table, EstimateOptions::default());
        let second = fallback_estimate(&table, EstimateOptions::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(13.04), 13.0);
        assert_eq!(round1(21.66), 21.7);
        assert_eq!(round1(18.0), 18.0);
    }
}
