//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    // Create migrations table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    // Get current version
    let current_version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    // Run migrations
    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- DAYS
        -- One row per calendar date with a cached protein total
        -- ============================================
        CREATE TABLE days (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL UNIQUE,           -- ISO date: "2025-01-09"
            cached_protein REAL NOT NULL DEFAULT 0,  -- grams, sum of meal entry totals
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_days_date ON days(date);

        -- ============================================
        -- MEAL ENTRIES
        -- A logged meal: one analysis or manual entry, attached to a day
        -- ============================================
        CREATE TABLE meal_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            day_id INTEGER NOT NULL REFERENCES days(id) ON DELETE CASCADE,
            logged_at TEXT NOT NULL DEFAULT (datetime('now')),
            total_protein REAL NOT NULL DEFAULT 0,   -- grams, sum over meal_foods
            image_data_url TEXT,                 -- nullable, original meal photo
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_meal_entries_day ON meal_entries(day_id);

        -- ============================================
        -- MEAL FOODS
        -- Individual food servings inside a meal entry
        -- ============================================
        CREATE TABLE meal_foods (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            meal_entry_id INTEGER NOT NULL REFERENCES meal_entries(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            quantity_grams REAL NOT NULL DEFAULT 0,
            protein_grams REAL NOT NULL DEFAULT 0,
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_meal_foods_entry ON meal_foods(meal_entry_id);

        -- ============================================
        -- GOAL PROFILE
        -- Single-row table holding the daily target configuration
        -- ============================================
        CREATE TABLE goal_profile (
            id INTEGER PRIMARY KEY CHECK(id = 1),
            weight_kg REAL,                      -- nullable, kilograms
            activity TEXT NOT NULL CHECK(activity IN ('maintain', 'gain', 'lose')) DEFAULT 'maintain',
            custom_goal REAL,                    -- nullable, overrides the computed target
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Check whether the database is behind the current schema version
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}
