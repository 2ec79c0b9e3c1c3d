//! Day MCP Tools
//!
//! Tools for managing days in the protein log.

use serde::Serialize;

use crate::db::Database;
use crate::models::{
    recalculate_day_protein, Day, DayUpdate, GoalProfile, MealEntry, MealEntryDetail,
};

/// Response for get_or_create_day
#[derive(Debug, Serialize)]
pub struct GetOrCreateDayResponse {
    pub id: i64,
    pub date: String,
    pub created: bool,  // true if newly created, false if already existed
}

/// Day with meal entries for detailed view
#[derive(Debug, Serialize)]
pub struct DayDetail {
    pub id: i64,
    pub date: String,
    pub meals: Vec<MealEntryDetail>,
    pub total_protein: f64,
    pub daily_target: f64,
    pub remaining: f64,
    pub notes: Option<String>,
}

/// Day summary for listing
#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub id: i64,
    pub date: String,
    pub total_protein: f64,
    pub meal_count: usize,
}

/// Response for list_days
#[derive(Debug, Serialize)]
pub struct ListDaysResponse {
    pub days: Vec<DaySummary>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Response for update_day
#[derive(Debug, Serialize)]
pub struct UpdateDayResponse {
    pub id: i64,
    pub date: String,
    pub notes: Option<String>,
    pub updated_at: String,
}

/// Response for reset_day
#[derive(Debug, Serialize)]
pub struct ResetDayResponse {
    pub date: String,
    pub entries_removed: i64,
}

/// Response for recalculate_day_protein
#[derive(Debug, Serialize)]
pub struct RecalculateDayProteinResponse {
    pub day_id: i64,
    pub date: String,
    pub total_protein: f64,
}

/// Get or create a day by date
pub fn get_or_create_day(db: &Database, date: &str) -> Result<GetOrCreateDayResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let existing = Day::get_by_date(&conn, date)
        .map_err(|e| format!("Failed to check day: {}", e))?;

    match existing {
        Some(day) => Ok(GetOrCreateDayResponse {
            id: day.id,
            date: day.date,
            created: false,
        }),
        None => {
            let day = Day::get_or_create(&conn, date)
                .map_err(|e| format!("Failed to create day: {}", e))?;
            Ok(GetOrCreateDayResponse {
                id: day.id,
                date: day.date,
                created: true,
            })
        }
    }
}

/// Get full day details with meals and target progress
pub fn get_day(db: &Database, date: &str) -> Result<Option<DayDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let day = match Day::get_by_date(&conn, date)
        .map_err(|e| format!("Failed to get day: {}", e))?
    {
        Some(day) => day,
        None => return Ok(None),
    };

    let entries = MealEntry::get_for_day(&conn, day.id)
        .map_err(|e| format!("Failed to get meal entries: {}", e))?;

    let mut meals = Vec::with_capacity(entries.len());
    for entry in &entries {
        let detail = MealEntry::detail(&conn, entry)
            .map_err(|e| format!("Failed to get meal foods: {}", e))?;
        meals.push(detail);
    }

    let profile = GoalProfile::get_or_default(&conn)
        .map_err(|e| format!("Failed to get goal profile: {}", e))?;
    let target = profile.daily_target();

    Ok(Some(DayDetail {
        id: day.id,
        date: day.date,
        meals,
        total_protein: day.cached_protein,
        daily_target: target,
        remaining: (target - day.cached_protein).max(0.0),
        notes: day.notes,
    }))
}

/// List days with optional date range and pagination
pub fn list_days(
    db: &Database,
    start_date: Option<&str>,
    end_date: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<ListDaysResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let days = Day::list(&conn, start_date, end_date, limit, offset)
        .map_err(|e| format!("Failed to list days: {}", e))?;
    let total = Day::count(&conn, start_date, end_date)
        .map_err(|e| format!("Failed to count days: {}", e))?;

    let mut summaries = Vec::with_capacity(days.len());
    for day in days {
        let entries = MealEntry::get_for_day(&conn, day.id)
            .map_err(|e| format!("Failed to get meal entries: {}", e))?;
        summaries.push(DaySummary {
            id: day.id,
            date: day.date,
            total_protein: day.cached_protein,
            meal_count: entries.len(),
        });
    }

    Ok(ListDaysResponse {
        days: summaries,
        total,
        limit,
        offset,
    })
}

/// Update day notes
pub fn update_day(db: &Database, date: &str, notes: &str) -> Result<Option<UpdateDayResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let day = match Day::get_by_date(&conn, date)
        .map_err(|e| format!("Failed to get day: {}", e))?
    {
        Some(day) => day,
        None => return Ok(None),
    };

    let updated = Day::update(
        &conn,
        day.id,
        &DayUpdate {
            notes: Some(notes.to_string()),
        },
    )
    .map_err(|e| format!("Failed to update day: {}", e))?
    .ok_or_else(|| "Day disappeared during update".to_string())?;

    Ok(Some(UpdateDayResponse {
        id: updated.id,
        date: updated.date,
        notes: updated.notes,
        updated_at: updated.updated_at,
    }))
}

/// Remove all meal entries for a date, zeroing its protein total
pub fn reset_day(db: &Database, date: &str) -> Result<ResetDayResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let removed = match Day::get_by_date(&conn, date)
        .map_err(|e| format!("Failed to get day: {}", e))?
    {
        Some(day) => MealEntry::delete_for_day(&conn, day.id)
            .map_err(|e| format!("Failed to reset day: {}", e))?,
        None => 0,
    };

    Ok(ResetDayResponse {
        date: date.to_string(),
        entries_removed: removed,
    })
}

/// Force recalculate the cached protein total for a day
pub fn recalculate_day_protein_tool(
    db: &Database,
    date: &str,
) -> Result<Option<RecalculateDayProteinResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let day = match Day::get_by_date(&conn, date)
        .map_err(|e| format!("Failed to get day: {}", e))?
    {
        Some(day) => day,
        None => return Ok(None),
    };

    let total = recalculate_day_protein(&conn, day.id)
        .map_err(|e| format!("Failed to recalculate day: {}", e))?;

    Ok(Some(RecalculateDayProteinResponse {
        day_id: day.id,
        date: day.date,
        total_protein: total,
    }))
}
