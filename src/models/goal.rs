//! Goal profile model
//!
//! Stores the daily protein target configuration (single-row table).

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// Daily target used when no weight and no custom goal are configured
pub const DEFAULT_DAILY_TARGET: f64 = 100.0;

/// Activity goal controlling the grams-per-kilogram multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    #[default]
    Maintain,
    Gain,
    Lose,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Maintain => "maintain",
            Activity::Gain => "gain",
            Activity::Lose => "lose",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "gain" => Activity::Gain,
            "lose" => Activity::Lose,
            _ => Activity::Maintain,
        }
    }

    /// Grams of protein per kilogram of body weight
    pub fn multiplier(&self) -> f64 {
        match self {
            Activity::Maintain => 1.6,
            Activity::Gain => 1.8,
            Activity::Lose => 1.5,
        }
    }
}

/// The goal profile configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProfile {
    pub weight_kg: Option<f64>,
    pub activity: Activity,
    pub custom_goal: Option<f64>,
    pub updated_at: Option<String>,
}

/// Partial update for the goal profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalUpdate {
    pub weight_kg: Option<f64>,
    pub activity: Option<Activity>,
    pub custom_goal: Option<f64>,
}

impl Default for GoalProfile {
    fn default() -> Self {
        Self {
            weight_kg: None,
            activity: Activity::Maintain,
            custom_goal: None,
            updated_at: None,
        }
    }
}

impl GoalProfile {
    /// The effective daily protein target in grams.
    ///
    /// A custom goal always wins; otherwise the target is derived from body
    /// weight and activity, rounded to the nearest gram; with neither
    /// configured the default applies.
    pub fn daily_target(&self) -> f64 {
        if let Some(custom) = self.custom_goal {
            return custom;
        }
        match self.weight_kg {
            Some(weight) => (weight * self.activity.multiplier()).round(),
            None => DEFAULT_DAILY_TARGET,
        }
    }

    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            weight_kg: row.get("weight_kg")?,
            activity: Activity::from_str(row.get::<_, String>("activity")?.as_str()),
            custom_goal: row.get("custom_goal")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get the stored goal profile (single row table)
    pub fn get(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM goal_profile WHERE id = 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get the goal profile, falling back to defaults when none is stored
    pub fn get_or_default(conn: &Connection) -> DbResult<Self> {
        Ok(Self::get(conn)?.unwrap_or_default())
    }

    /// Apply a partial update (upsert). Fields absent from the update keep
    /// their stored values; a custom goal of 0 clears the override.
    pub fn set(conn: &Connection, update: &GoalUpdate) -> DbResult<Self> {
        let current = Self::get_or_default(conn)?;

        let weight_kg = update.weight_kg.or(current.weight_kg);
        let activity = update.activity.unwrap_or(current.activity);
        let custom_goal = match update.custom_goal {
            Some(custom) if custom <= 0.0 => None,
            Some(custom) => Some(custom),
            None => current.custom_goal,
        };

        conn.execute(
            r#"
            INSERT INTO goal_profile (id, weight_kg, activity, custom_goal)
            VALUES (1, ?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                weight_kg = excluded.weight_kg,
                activity = excluded.activity,
                custom_goal = excluded.custom_goal,
                updated_at = datetime('now')
            "#,
            params![weight_kg, activity.as_str(), custom_goal],
        )?;

        Self::get(conn)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_from_weight_and_activity() {
        let profile = GoalProfile {
            weight_kg: Some(68.0),
            activity: Activity::Maintain,
            custom_goal: None,
            updated_at: None,
        };
        // 68 * 1.6 = 108.8, rounded to 109
        assert_eq!(profile.daily_target(), 109.0);
    }

    #[test]
    fn test_target_multipliers() {
        let mut profile = GoalProfile {
            weight_kg: Some(80.0),
            activity: Activity::Gain,
            custom_goal: None,
            updated_at: None,
        };
        assert_eq!(profile.daily_target(), 144.0); // 80 * 1.8

        profile.activity = Activity::Lose;
        assert_eq!(profile.daily_target(), 120.0); // 80 * 1.5
    }

    #[test]
    fn test_custom_goal_overrides_weight() {
        let profile = GoalProfile {
            weight_kg: Some(68.0),
            activity: Activity::Gain,
            custom_goal: Some(150.0),
            updated_at: None,
        };
        assert_eq!(profile.daily_target(), 150.0);
    }

    #[test]
    fn test_default_target_without_weight() {
        let profile = GoalProfile::default();
        assert_eq!(profile.daily_target(), DEFAULT_DAILY_TARGET);
    }

    #[test]
    fn test_activity_round_trip() {
        assert_eq!(Activity::from_str("gain"), Activity::Gain);
        assert_eq!(Activity::from_str("LOSE"), Activity::Lose);
        assert_eq!(Activity::from_str("unknown"), Activity::Maintain);
        assert_eq!(Activity::Gain.as_str(), "gain");
    }
}
