//! AI response normalization
//!
//! Converts the raw text returned by a vision model into a validated
//! `AnalysisResult`. Formatting problems degrade to the template fallback;
//! nothing propagates past this boundary.

use serde::Deserialize;

use crate::models::{AnalysisResult, FoodItem};
use crate::reference::ReferenceTable;

use super::estimator::{fallback_estimate, round1, EstimateOptions, DEFAULT_SUGGESTIONS};

/// The JSON shape the model is prompted to produce.
///
/// `protein_grams` must be present and numeric; a payload violating that
/// fails validation as a whole and routes to the template fallback.
/// `quantity_grams` is only clamped, never rejected.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    foods: Vec<RawFood>,
    suggestions: Option<Vec<String>>,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFood {
    name: String,
    quantity_grams: f64,
    protein_grams: f64,
    notes: Option<String>,
}

/// Parse a model response into a validated analysis.
///
/// On success, protein is rounded to one decimal and quantity to the nearest
/// whole gram, clamped to never go negative. On any validation failure the
/// reason is logged and the template estimate is returned instead.
pub fn parse_ai_response(table: &ReferenceTable, content: &str) -> AnalysisResult {
    let raw: RawAnalysis = match serde_json::from_str(content) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(error = %err, "failed to parse AI response, using template estimate");
            return fallback_estimate(table, EstimateOptions::default());
        }
    };

    let foods = raw
        .foods
        .into_iter()
        .map(|food| FoodItem {
            name: food.name,
            quantity_grams: food.quantity_grams.round().max(0.0),
            protein_grams: round1(food.protein_grams),
            notes: food.notes,
        })
        .collect();

    AnalysisResult {
        foods,
        suggestions: raw
            .suggestions
            .unwrap_or_else(|| DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect()),
        message: raw.notes.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_response() {
        let table = ReferenceTable::builtin();
        let content = r#"{"foods":[{"name":"Egg","quantityGrams":100.6,"proteinGrams":13.04}],"suggestions":["tofu"],"notes":"ok"}"#;

        let result = parse_ai_response(&table, content);

        assert_eq!(result.foods.len(), 1);
        assert_eq!(result.foods[0].name, "Egg");
        assert_eq!(result.foods[0].quantity_grams, 101.0);
        assert_eq!(result.foods[0].protein_grams, 13.0);
        assert_eq!(result.suggestions, vec!["tofu".to_string()]);
        assert_eq!(result.message, "ok");
    }

    #[test]
    fn test_malformed_response_falls_back_to_template() {
        let table = ReferenceTable::builtin();
        let result = parse_ai_response(&table, "not json");
        let template = fallback_estimate(&table, EstimateOptions::default());
        assert_eq!(result, template);
    }

    #[test]
    fn test_negative_quantity_is_clamped() {
        let table = ReferenceTable::builtin();
        let content = r#"{"foods":[{"name":"X","quantityGrams":-5,"proteinGrams":2}]}"#;

        let result = parse_ai_response(&table, content);

        assert_eq!(result.foods[0].quantity_grams, 0.0);
        assert_eq!(result.foods[0].protein_grams, 2.0);
    }

    #[test]
    fn test_missing_protein_fails_the_whole_parse() {
        let table = ReferenceTable::builtin();
        let content = r#"{"foods":[{"name":"X","quantityGrams":50}]}"#;

        let result = parse_ai_response(&table, content);
        let template = fallback_estimate(&table, EstimateOptions::default());
        assert_eq!(result, template);
    }

    #[test]
    fn test_non_numeric_protein_fails_the_whole_parse() {
        let table = ReferenceTable::builtin();
        let content = r#"{"foods":[{"name":"X","quantityGrams":50,"proteinGrams":"lots"}]}"#;

        let result = parse_ai_response(&table, content);
        let template = fallback_estimate(&table, EstimateOptions::default());
        assert_eq!(result, template);
    }

    #[test]
    fn test_defaults_for_absent_suggestions_and_notes() {
        let table = ReferenceTable::builtin();
        let content = r#"{"foods":[{"name":"Tofu","quantityGrams":80,"proteinGrams":12}]}"#;

        let result = parse_ai_response(&table, content);

        assert_eq!(result.suggestions.len(), 8);
        assert_eq!(result.suggestions[0], "paneer tikka");
        assert_eq!(result.message, "");
    }

    #[test]
    fn test_food_notes_are_preserved() {
        let table = ReferenceTable::builtin();
        let content = r#"{"foods":[{"name":"Dal","quantityGrams":200,"proteinGrams":18,"notes":"likely masoor"}]}"#;

        let result = parse_ai_response(&table, content);
        assert_eq!(result.foods[0].notes.as_deref(), Some("likely masoor"));
    }
}
