//! ptrack MCP Server Implementation
//!
//! Implements the MCP server with all Protein Tracker tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::db::Database;
use crate::models::{Activity, FoodItem, GoalUpdate, MealEntryCreate};
use crate::reference::ReferenceTable;
use crate::tools::analyze;
use crate::tools::days;
use crate::tools::goals;
use crate::tools::meals;
use crate::tools::status::{StatusTracker, TRACKING_INSTRUCTIONS};
use crate::vision::VisionClient;

/// ptrack MCP Service
#[derive(Clone)]
pub struct PtrackService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    table: ReferenceTable,
    vision: Option<VisionClient>,
    tool_router: ToolRouter<PtrackService>,
}

impl PtrackService {
    pub fn new(database_path: PathBuf, database: Database, vision: Option<VisionClient>) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            table: ReferenceTable::builtin(),
            vision,
            tool_router: Self::tool_router(),
        }
    }
}

/// Today's date in the server's local timezone as an ISO date
fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

// ============================================================================
// Parameter Structs
// ============================================================================

/// One food serving as supplied by the client
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FoodItemParam {
    pub name: String,
    /// Serving size in grams
    pub quantity_grams: f64,
    /// Protein content in grams
    pub protein_grams: f64,
    pub notes: Option<String>,
}

impl From<FoodItemParam> for FoodItem {
    fn from(p: FoodItemParam) -> Self {
        Self {
            name: p.name,
            quantity_grams: p.quantity_grams,
            protein_grams: p.protein_grams,
            notes: p.notes,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeMealParams {
    /// The meal photo as a data URL (e.g., "data:image/jpeg;base64,...")
    pub image_data: String,
    /// Foods the user already entered manually; preserved when the vision
    /// path is unavailable
    #[serde(default)]
    pub manual_foods: Vec<FoodItemParam>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogMealParams {
    /// ISO date (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
    pub foods: Vec<FoodItemParam>,
    /// Defaults to the sum of the foods' protein
    pub total_protein: Option<f64>,
    /// Original meal photo as a data URL
    pub image_data_url: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetMealEntryParams {
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteMealEntryParams {
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetOrCreateDayParams {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDayParams {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListDaysParams {
    /// Inclusive ISO start date
    pub start_date: Option<String>,
    /// Inclusive ISO end date
    pub end_date: Option<String>,
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_list_limit() -> i64 { 30 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateDayParams {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    pub notes: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ResetDayParams {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecalculateDayProteinParams {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetGoalParams {
    /// Body weight in kilograms
    pub weight_kg: Option<f64>,
    /// One of "maintain", "gain", "lose"
    pub activity: Option<String>,
    /// Fixed daily target in grams; overrides the computed one. Pass 0 to clear.
    pub custom_goal: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDailySummaryParams {
    /// ISO date (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl PtrackService {
    // --- Status ---

    #[tool(description = "Get the current status of the ptrack service including build info, database status, log counts, and process information")]
    async fn ptrack_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let vision_model = self.vision.as_ref().map(|v| v.model().to_string());
        let status = tracker.get_status(&self.database, vision_model);
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get step-by-step instructions for tracking protein. Call this when starting a new tracking session or when unsure how to use the meal analysis and logging tools.")]
    fn tracking_instructions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(TRACKING_INSTRUCTIONS)]))
    }

    // --- Analysis ---

    #[tool(description = "Analyze a meal photo and estimate the protein content of each food. Accepts optional manually entered foods which are preserved when no vision model is configured. Always succeeds; the result's message field discloses how the estimate was produced.")]
    async fn analyze_meal(&self, Parameters(p): Parameters<AnalyzeMealParams>) -> Result<CallToolResult, McpError> {
        let manual_foods = p.manual_foods.into_iter().map(FoodItem::from).collect();
        let result = analyze::analyze_meal(&self.table, self.vision.as_ref(), &p.image_data, manual_foods)
            .await
            .map_err(|e| McpError::invalid_params(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Meals ---

    #[tool(description = "Log a meal entry with its food servings. Automatically creates the day if needed and updates the day's protein total.")]
    fn log_meal(&self, Parameters(p): Parameters<LogMealParams>) -> Result<CallToolResult, McpError> {
        let data = MealEntryCreate {
            date: p.date.unwrap_or_else(today),
            foods: p.foods.into_iter().map(FoodItem::from).collect(),
            total_protein: p.total_protein,
            image_data_url: p.image_data_url,
        };
        let result = meals::log_meal(&self.database, data).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get a meal entry by ID with its food servings")]
    fn get_meal_entry(&self, Parameters(p): Parameters<GetMealEntryParams>) -> Result<CallToolResult, McpError> {
        let result = meals::get_meal_entry(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(entry) => serde_json::to_string_pretty(&entry),
            None => Ok(format!(r#"{{"error": "Meal entry not found", "id": {}}}"#, p.id)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Delete a meal entry and refresh the owning day's protein total")]
    fn delete_meal_entry(&self, Parameters(p): Parameters<DeleteMealEntryParams>) -> Result<CallToolResult, McpError> {
        let result = meals::delete_meal_entry(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Days ---

    #[tool(description = "Get or create a day by date. Creates a new day if it doesn't exist.")]
    fn get_or_create_day(&self, Parameters(p): Parameters<GetOrCreateDayParams>) -> Result<CallToolResult, McpError> {
        let result = days::get_or_create_day(&self.database, &p.date).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get full day details including all logged meals, the protein total, and progress against the daily target")]
    fn get_day(&self, Parameters(p): Parameters<GetDayParams>) -> Result<CallToolResult, McpError> {
        let result = days::get_day(&self.database, &p.date).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(day) => serde_json::to_string_pretty(&day),
            None => Ok(format!(r#"{{"error": "Day not found", "date": "{}"}}"#, p.date)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List days with optional date range filter and pagination, newest first")]
    fn list_days(&self, Parameters(p): Parameters<ListDaysParams>) -> Result<CallToolResult, McpError> {
        let result = days::list_days(&self.database, p.start_date.as_deref(), p.end_date.as_deref(), p.limit, p.offset)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Update day notes")]
    fn update_day(&self, Parameters(p): Parameters<UpdateDayParams>) -> Result<CallToolResult, McpError> {
        let result = days::update_day(&self.database, &p.date, &p.notes).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(day) => serde_json::to_string_pretty(&day),
            None => Ok(format!(r#"{{"error": "Day not found", "date": "{}"}}"#, p.date)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Remove all meal entries for a date and zero its protein total ('clear today')")]
    fn reset_day(&self, Parameters(p): Parameters<ResetDayParams>) -> Result<CallToolResult, McpError> {
        let result = days::reset_day(&self.database, &p.date).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Force recalculate a day's cached protein total from its stored meal foods")]
    fn recalculate_day_protein(&self, Parameters(p): Parameters<RecalculateDayProteinParams>) -> Result<CallToolResult, McpError> {
        let result = days::recalculate_day_protein_tool(&self.database, &p.date).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(resp) => serde_json::to_string_pretty(&resp),
            None => Ok(format!(r#"{{"error": "Day not found", "date": "{}"}}"#, p.date)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Goals ---

    #[tool(description = "Configure the daily protein target. Provide weight_kg and activity ('maintain', 'gain', 'lose') to derive the target from body weight, or custom_goal to fix it explicitly (0 clears the override).")]
    fn set_goal(&self, Parameters(p): Parameters<SetGoalParams>) -> Result<CallToolResult, McpError> {
        let update = GoalUpdate {
            weight_kg: p.weight_kg,
            activity: p.activity.as_deref().map(Activity::from_str),
            custom_goal: p.custom_goal,
        };
        let result = goals::set_goal(&self.database, update).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get the configured goal profile and the computed daily protein target")]
    fn get_goal(&self) -> Result<CallToolResult, McpError> {
        let result = goals::get_goal(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Summarize a date's protein intake against the daily target, with a progress message")]
    fn get_daily_summary(&self, Parameters(p): Parameters<GetDailySummaryParams>) -> Result<CallToolResult, McpError> {
        let date = p.date.unwrap_or_else(today);
        let result = goals::get_daily_summary(&self.database, &date).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for PtrackService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "ptrack".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Protein Tracker".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Protein Tracker (ptrack) - AI-assisted meal protein tracking against a daily target. \
                 IMPORTANT: Call tracking_instructions when starting a tracking session. \
                 Analysis: analyze_meal (photo data URL + optional manual foods; always succeeds, \
                 the message field discloses the estimate's provenance). \
                 Meals: log_meal/get_meal_entry/delete_meal_entry. \
                 Days: get_or_create_day/get_day/list_days/update_day/reset_day, recalculate_day_protein. \
                 Goals: set_goal/get_goal (weight-derived or custom daily target), get_daily_summary."
                    .into(),
            ),
        }
    }
}
