//! Data models
//!
//! Domain types and Rust structs representing database entities.

mod day;
mod food;
mod goal;
mod meal_entry;

pub use day::{Day, DayCreate, DayUpdate};
pub use food::{AnalysisResult, FoodItem};
pub use goal::{Activity, GoalProfile, GoalUpdate, DEFAULT_DAILY_TARGET};
pub use meal_entry::{
    MealEntry, MealEntryCreate, MealEntryDetail, MealFood, calculate_day_protein,
    recalculate_day_protein, total_protein_of,
};
