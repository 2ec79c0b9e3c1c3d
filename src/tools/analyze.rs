//! Meal photo analysis orchestration
//!
//! The thin boundary between the vision model and the estimation core:
//! builds the dietician prompt, performs the external call when a client is
//! configured, and degrades to the fallback estimator on every failure.

use crate::analysis::{fallback_estimate, parse_ai_response, EstimateOptions};
use crate::models::{AnalysisResult, FoodItem};
use crate::reference::ReferenceTable;
use crate::vision::VisionClient;

/// Build the system prompt for the vision model, embedding the reference
/// table so the model anchors its estimates to the same densities the
/// fallback path uses.
pub fn system_prompt(table: &ReferenceTable) -> String {
    let reference_lines = table
        .entries()
        .iter()
        .map(|entry| format!("{} ({}g protein)", entry.name, entry.protein_per_100g))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are a registered dietician specialising in Indian cuisine.\n\
         Given a meal photograph you must:\n\
         - identify each food item and estimate cooked serving size in grams or millilitres.\n\
         - estimate protein content for each item.\n\
         - return JSON with fields: foods (array of {{ name, quantityGrams, proteinGrams, notes? }}), suggestions (string[]), notes.\n\n\
         Use the following reference table of average protein per 100g where applicable:\n\
         {reference_lines}.\n\n\
         Prefer dishes common to Indian home cooking. If you are uncertain about an item, include a note in the notes field.\n\
         Respond strictly in JSON with keys: foods (array), suggestions (array), notes (string)."
    )
}

/// Analyze a meal photo, never failing past the missing-image check.
///
/// No configured client routes the user's manual foods through the fallback
/// estimator; a failed call or an empty/unusable response degrades to the
/// template estimate with the reason logged.
pub async fn analyze_meal(
    table: &ReferenceTable,
    vision: Option<&VisionClient>,
    image_data: &str,
    manual_foods: Vec<FoodItem>,
) -> Result<AnalysisResult, String> {
    if image_data.trim().is_empty() {
        return Err("image_data is required".to_string());
    }

    let client = match vision {
        Some(client) => client,
        None => {
            return Ok(fallback_estimate(
                table,
                EstimateOptions {
                    fallback_foods: manual_foods,
                    assumed_servings: None,
                },
            ));
        }
    };

    let prompt = system_prompt(table);
    let content = match client.analyze_meal_photo(&prompt, image_data).await {
        Ok(content) => content,
        Err(err) => {
            tracing::error!(error = %err, "vision call failed, using template estimate");
            return Ok(fallback_estimate(table, EstimateOptions::default()));
        }
    };

    let result = parse_ai_response(table, &content);

    // Empty food list: treat like a failed call
    if result.foods.is_empty() {
        return Ok(fallback_estimate(table, EstimateOptions::default()));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::estimator::{REFERENCE_DATA_MESSAGE, TEMPLATE_MESSAGE};

    #[tokio::test]
    async fn test_missing_image_is_rejected() {
        let table = ReferenceTable::builtin();
        let result = analyze_meal(&table, None, "  ", Vec::new()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_no_client_keeps_manual_foods() {
        let table = ReferenceTable::builtin();
        let manual = vec![FoodItem {
            name: "Curd".to_string(),
            quantity_grams: 150.0,
            protein_grams: 5.3,
            notes: None,
        }];

        let result = analyze_meal(&table, None, "data:image/jpeg;base64,xxxx", manual.clone())
            .await
            .unwrap();

        assert_eq!(result.foods, manual);
        assert_eq!(result.message, REFERENCE_DATA_MESSAGE);
    }

    #[tokio::test]
    async fn test_no_client_without_manual_foods_uses_template() {
        let table = ReferenceTable::builtin();
        let result = analyze_meal(&table, None, "data:image/jpeg;base64,xxxx", Vec::new())
            .await
            .unwrap();

        assert_eq!(result.foods.len(), 3);
        assert_eq!(result.message, TEMPLATE_MESSAGE);
    }

    #[test]
    fn test_system_prompt_embeds_reference_table() {
        let table = ReferenceTable::builtin();
        let prompt = system_prompt(&table);
        assert!(prompt.contains("Chicken Breast (31g protein)"));
        assert!(prompt.contains("Black Beans (Cooked) (8.9g protein)"));
        assert!(prompt.contains("Respond strictly in JSON"));
    }
}
