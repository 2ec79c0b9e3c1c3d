//! Meal Entry model
//!
//! A logged meal attached to a day, holding one or more food servings.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use super::{Day, FoodItem};

/// A logged meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealEntry {
    pub id: i64,
    pub day_id: i64,
    pub logged_at: String,
    pub total_protein: f64,  // grams
    pub image_data_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A food serving row belonging to a meal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealFood {
    pub id: i64,
    pub meal_entry_id: i64,
    pub name: String,
    pub quantity_grams: f64,
    pub protein_grams: f64,
    pub notes: Option<String>,
}

/// Data for logging a meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealEntryCreate {
    pub date: String,
    pub foods: Vec<FoodItem>,
    /// Defaults to the sum of the foods' protein when not supplied
    pub total_protein: Option<f64>,
    pub image_data_url: Option<String>,
}

/// A meal entry with its foods, for detailed views
#[derive(Debug, Clone, Serialize)]
pub struct MealEntryDetail {
    pub id: i64,
    pub logged_at: String,
    pub total_protein: f64,
    pub foods: Vec<MealFood>,
    pub has_image: bool,
}

/// Sum the protein over a list of food servings
pub fn total_protein_of(foods: &[FoodItem]) -> f64 {
    foods.iter().map(|f| f.protein_grams).sum()
}

impl MealEntry {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            day_id: row.get("day_id")?,
            logged_at: row.get("logged_at")?,
            total_protein: row.get("total_protein")?,
            image_data_url: row.get("image_data_url")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Log a meal: creates the day if needed, inserts the entry and its
    /// foods, and refreshes the day's cached protein total.
    pub fn create(conn: &Connection, data: &MealEntryCreate) -> DbResult<Self> {
        let day = Day::get_or_create(conn, &data.date)?;

        let total = data
            .total_protein
            .unwrap_or_else(|| total_protein_of(&data.foods));

        conn.execute(
            r#"
            INSERT INTO meal_entries (day_id, total_protein, image_data_url)
            VALUES (?1, ?2, ?3)
            "#,
            params![day.id, total, data.image_data_url],
        )?;

        let entry_id = conn.last_insert_rowid();

        for food in &data.foods {
            conn.execute(
                r#"
                INSERT INTO meal_foods (meal_entry_id, name, quantity_grams, protein_grams, notes)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![entry_id, food.name, food.quantity_grams, food.protein_grams, food.notes],
            )?;
        }

        let day_total = calculate_day_protein(conn, day.id)?;
        Day::update_cached_protein(conn, day.id, day_total)?;

        Self::get_by_id(conn, entry_id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a meal entry by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM meal_entries WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get all meal entries for a day, in logged order
    pub fn get_for_day(conn: &Connection, day_id: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM meal_entries WHERE day_id = ?1 ORDER BY id ASC"
        )?;

        let entries = stmt
            .query_map([day_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Get the food servings belonging to a meal entry, in declaration order
    pub fn get_foods(conn: &Connection, entry_id: i64) -> DbResult<Vec<MealFood>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM meal_foods WHERE meal_entry_id = ?1 ORDER BY id ASC"
        )?;

        let foods = stmt
            .query_map([entry_id], |row| {
                Ok(MealFood {
                    id: row.get("id")?,
                    meal_entry_id: row.get("meal_entry_id")?,
                    name: row.get("name")?,
                    quantity_grams: row.get("quantity_grams")?,
                    protein_grams: row.get("protein_grams")?,
                    notes: row.get("notes")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(foods)
    }

    /// Load the detail view for a meal entry
    pub fn detail(conn: &Connection, entry: &Self) -> DbResult<MealEntryDetail> {
        let foods = Self::get_foods(conn, entry.id)?;
        Ok(MealEntryDetail {
            id: entry.id,
            logged_at: entry.logged_at.clone(),
            total_protein: entry.total_protein,
            foods,
            has_image: entry.image_data_url.is_some(),
        })
    }

    /// Count all meal entries
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM meal_entries", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete a meal entry and refresh the owning day's cached protein.
    /// Returns Ok(true) if deleted, Ok(false) if not found.
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let entry = match Self::get_by_id(conn, id)? {
            Some(entry) => entry,
            None => return Ok(false),
        };

        conn.execute("DELETE FROM meal_entries WHERE id = ?1", [id])?;

        let day_total = calculate_day_protein(conn, entry.day_id)?;
        Day::update_cached_protein(conn, entry.day_id, day_total)?;

        Ok(true)
    }

    /// Delete all meal entries for a day and zero its cached protein.
    /// Returns the number of entries removed.
    pub fn delete_for_day(conn: &Connection, day_id: i64) -> DbResult<i64> {
        let rows = conn.execute("DELETE FROM meal_entries WHERE day_id = ?1", [day_id])?;
        Day::update_cached_protein(conn, day_id, 0.0)?;
        Ok(rows as i64)
    }
}

/// Sum the stored totals of a day's meal entries
pub fn calculate_day_protein(conn: &Connection, day_id: i64) -> DbResult<f64> {
    let entries = MealEntry::get_for_day(conn, day_id)?;
    Ok(entries.iter().map(|e| e.total_protein).sum())
}

/// Recompute each meal entry's total from its foods, then refresh the day's
/// cached protein. Returns the new day total.
pub fn recalculate_day_protein(conn: &Connection, day_id: i64) -> DbResult<f64> {
    let entries = MealEntry::get_for_day(conn, day_id)?;

    let mut total = 0.0;
    for entry in &entries {
        let foods = MealEntry::get_foods(conn, entry.id)?;
        let entry_total: f64 = foods.iter().map(|f| f.protein_grams).sum();

        conn.execute(
            "UPDATE meal_entries SET total_protein = ?1, updated_at = datetime('now') WHERE id = ?2",
            params![entry_total, entry.id],
        )?;

        total += entry_total;
    }

    Day::update_cached_protein(conn, day_id, total)?;

    Ok(total)
}
