//! Utility to set the protein goal in the database
//!
//! Usage: set_goal <weight_kg> [activity] [custom_goal]

use std::path::PathBuf;

use ptrack::models::{Activity, GoalProfile, GoalUpdate};

fn get_database_path() -> PathBuf {
    std::env::var("PTRACK_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            std::fs::create_dir_all(&path).ok();
            path.push("ptrack.db");
            path
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    let update = GoalUpdate {
        weight_kg: args.get(1).and_then(|s| s.parse().ok()),
        activity: args.get(2).map(|s| Activity::from_str(s)),
        custom_goal: args.get(3).and_then(|s| s.parse().ok()),
    };

    let db_path = get_database_path();
    println!("Database path: {}", db_path.display());

    let database = ptrack::db::Database::new(&db_path)?;

    // Run migrations
    database.with_conn(|conn| {
        ptrack::db::migrations::run_migrations(conn)?;
        Ok(())
    })?;

    // Set the goal profile
    database.with_conn(|conn| {
        let profile = GoalProfile::set(conn, &update)?;
        println!("Goal profile set:");
        println!("  Weight: {:?} kg", profile.weight_kg);
        println!("  Activity: {}", profile.activity.as_str());
        println!("  Custom goal: {:?}", profile.custom_goal);
        println!("  Daily target: {} g", profile.daily_target());
        Ok(())
    })?;

    Ok(())
}
