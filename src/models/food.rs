//! Food serving and analysis result types
//!
//! These are the wire types shared with the vision model: field names are
//! camelCase because that is the JSON contract the model is prompted to emit.

use serde::{Deserialize, Serialize};

/// A single food serving, either AI-estimated or user-entered.
///
/// `quantity_grams` and `protein_grams` are independently supplied; no
/// relationship between them is enforced outside the fallback estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub name: String,
    pub quantity_grams: f64,
    pub protein_grams: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The outcome of one meal analysis, whatever path produced it.
///
/// `message` discloses provenance (measured vs. template vs. reference-based)
/// and is meant to be shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub foods: Vec<FoodItem>,
    pub suggestions: Vec<String>,
    pub message: String,
}
