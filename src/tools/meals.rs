//! Meal MCP Tools
//!
//! Tools for logging meals into the daily protein log.

use serde::Serialize;

use crate::db::Database;
use crate::models::{GoalProfile, MealEntry, MealEntryCreate, MealEntryDetail};

/// Response for log_meal
#[derive(Debug, Serialize)]
pub struct LogMealResponse {
    pub id: i64,
    pub date: String,
    pub total_protein: f64,
    pub day_total: f64,
    pub daily_target: f64,
    pub remaining: f64,
}

/// Response for delete_meal_entry
#[derive(Debug, Serialize)]
pub struct DeleteMealEntryResponse {
    pub deleted: bool,
    pub id: i64,
}

/// Log a meal entry, creating the day if needed
pub fn log_meal(db: &Database, data: MealEntryCreate) -> Result<LogMealResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let date = data.date.clone();
    let entry = MealEntry::create(&conn, &data)
        .map_err(|e| format!("Failed to log meal: {}", e))?;

    let day = crate::models::Day::get_by_id(&conn, entry.day_id)
        .map_err(|e| format!("Failed to get day: {}", e))?
        .ok_or_else(|| "Day disappeared after logging".to_string())?;

    let profile = GoalProfile::get_or_default(&conn)
        .map_err(|e| format!("Failed to get goal profile: {}", e))?;
    let target = profile.daily_target();

    Ok(LogMealResponse {
        id: entry.id,
        date,
        total_protein: entry.total_protein,
        day_total: day.cached_protein,
        daily_target: target,
        remaining: (target - day.cached_protein).max(0.0),
    })
}

/// Get a meal entry by ID with its foods
pub fn get_meal_entry(db: &Database, id: i64) -> Result<Option<MealEntryDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let entry = match MealEntry::get_by_id(&conn, id)
        .map_err(|e| format!("Failed to get meal entry: {}", e))?
    {
        Some(entry) => entry,
        None => return Ok(None),
    };

    let detail = MealEntry::detail(&conn, &entry)
        .map_err(|e| format!("Failed to get meal foods: {}", e))?;

    Ok(Some(detail))
}

/// Delete a meal entry, refreshing the owning day's total
pub fn delete_meal_entry(db: &Database, id: i64) -> Result<DeleteMealEntryResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = MealEntry::delete(&conn, id)
        .map_err(|e| format!("Failed to delete meal entry: {}", e))?;

    Ok(DeleteMealEntryResponse { deleted, id })
}
