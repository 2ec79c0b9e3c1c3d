//! ptrack Status Tool
//!
//! Provides runtime status information about the Protein Tracker service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::db::{migrations, Database};
use crate::models::{Day, MealEntry};

/// Protein tracking instructions for AI assistants
pub const TRACKING_INSTRUCTIONS: &str = r#"
# ptrack Protein Tracking Instructions

This guide explains how to track daily protein using the Protein Tracker (ptrack) tools.

## Overview

The tracker keeps one row per calendar date with a running protein total,
compared against a configured daily target. Meals are logged as a set of
food servings, each with a quantity in grams and a protein amount in grams.

---

## Typical photo workflow

1. Call `analyze_meal` with the meal photo as a data URL (and any foods the
   user already entered manually as `manual_foods`).
2. Show the user the returned foods, suggestions, and the `message` field.
   The message discloses how the estimate was produced (vision model,
   reference data, or a template) and must not be hidden.
3. Let the user correct quantities or add foods.
4. Call `log_meal` with the final food list and the date (YYYY-MM-DD).

When no vision model is configured the analysis still succeeds: manual foods
pass through unchanged, or a disclosed template estimate is returned.

## Manual logging

Skip `analyze_meal` and call `log_meal` directly with the foods. The entry
total defaults to the sum of the foods' protein grams.

## Daily target

- `set_goal` with `weight_kg` and `activity` ("maintain", "gain", or "lose")
  derives the target from body weight: maintain 1.6 g/kg, gain 1.8 g/kg,
  lose 1.5 g/kg, rounded to the nearest gram.
- `custom_goal` overrides the derived target; pass 0 to clear the override.
- Without any configuration the target defaults to 100 g.

## Reading the log

- `get_daily_summary` for consumed vs. target with a progress message.
- `get_day` for the full meal breakdown of a date.
- `list_days` for history, newest first.
- `reset_day` removes every entry for a date ("clear today").
- `recalculate_day_protein` rebuilds a day's total from its stored foods.

## Dates

Always pass explicit ISO dates (YYYY-MM-DD). When the user says "today",
resolve it against their local calendar before calling tools.
"#;

/// ptrack service status
#[derive(Debug, Serialize)]
pub struct PtrackStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub schema_version: i32,
    pub days_tracked: i64,
    pub meals_logged: i64,
    pub vision_model: Option<String>,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Tracks service start time and reports runtime status
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status(&self, db: &Database, vision_model: Option<String>) -> PtrackStatus {
        let build_info = BuildInfo::current();

        // Get database size if it exists
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        // Log counts are best-effort; status stays usable without them
        let (schema_version, days_tracked, meals_logged) = db
            .with_conn(|conn| {
                let version = migrations::get_schema_version(conn)?;
                let days = Day::count(conn, None, None)?;
                let meals = MealEntry::count(conn)?;
                Ok((version, days, meals))
            })
            .unwrap_or((0, 0, 0));

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        PtrackStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            schema_version,
            days_tracked,
            meals_logged,
            vision_model,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
