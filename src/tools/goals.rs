//! Goal and summary MCP Tools
//!
//! Tools for configuring the daily protein target and reading progress
//! against it.

use serde::Serialize;

use crate::db::Database;
use crate::models::{Activity, Day, GoalProfile, GoalUpdate};

/// Response for set_goal / get_goal
#[derive(Debug, Serialize)]
pub struct GoalResponse {
    pub weight_kg: Option<f64>,
    pub activity: Activity,
    pub custom_goal: Option<f64>,
    pub daily_target: f64,
}

/// Response for get_daily_summary
#[derive(Debug, Serialize)]
pub struct DailySummaryResponse {
    pub date: String,
    pub consumed: f64,
    pub daily_target: f64,
    pub remaining: f64,
    pub message: String,
}

impl From<GoalProfile> for GoalResponse {
    fn from(profile: GoalProfile) -> Self {
        let daily_target = profile.daily_target();
        Self {
            weight_kg: profile.weight_kg,
            activity: profile.activity,
            custom_goal: profile.custom_goal,
            daily_target,
        }
    }
}

/// Pick the progress copy shown with a daily summary.
///
/// `progress` is consumed/target, `remaining` is grams left to the target.
pub fn progress_message(progress: f64, remaining: f64) -> &'static str {
    if progress >= 1.0 {
        return "Incredible! You've smashed today's protein goal.";
    }
    if remaining < 15.0 {
        return "You're almost there. A quick protein boost will seal the deal.";
    }
    if progress == 0.0 {
        return "Let's kick off with a high-protein breakfast.";
    }
    "Keep the momentum going—high-protein snacks can help you stay on track."
}

/// Apply a partial goal update
pub fn set_goal(db: &Database, update: GoalUpdate) -> Result<GoalResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let profile = GoalProfile::set(&conn, &update)
        .map_err(|e| format!("Failed to set goal: {}", e))?;

    Ok(profile.into())
}

/// Get the configured goal and computed daily target
pub fn get_goal(db: &Database) -> Result<GoalResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let profile = GoalProfile::get_or_default(&conn)
        .map_err(|e| format!("Failed to get goal profile: {}", e))?;

    Ok(profile.into())
}

/// Summarize a date's protein intake against the daily target
pub fn get_daily_summary(db: &Database, date: &str) -> Result<DailySummaryResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let consumed = Day::get_by_date(&conn, date)
        .map_err(|e| format!("Failed to get day: {}", e))?
        .map(|day| day.cached_protein)
        .unwrap_or(0.0);

    let profile = GoalProfile::get_or_default(&conn)
        .map_err(|e| format!("Failed to get goal profile: {}", e))?;
    let target = profile.daily_target();

    let progress = if target > 0.0 { consumed / target } else { 0.0 };
    let remaining = (target - consumed).max(0.0);

    Ok(DailySummaryResponse {
        date: date.to_string(),
        consumed,
        daily_target: target,
        remaining,
        message: progress_message(progress, remaining).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_reached() {
        let msg = progress_message(1.2, 0.0);
        assert!(msg.starts_with("Incredible!"));
    }

    #[test]
    fn test_almost_there() {
        let msg = progress_message(0.9, 10.0);
        assert!(msg.starts_with("You're almost there."));
    }

    #[test]
    fn test_nothing_logged_yet() {
        let msg = progress_message(0.0, 100.0);
        assert!(msg.contains("high-protein breakfast"));
    }

    #[test]
    fn test_partway_through_the_day() {
        let msg = progress_message(0.5, 50.0);
        assert!(msg.contains("momentum"));
    }
}
