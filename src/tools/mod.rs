//! ptrack Tools module
//!
//! MCP tool implementations for the Protein Tracker.

pub mod analyze;
pub mod days;
pub mod goals;
pub mod meals;
pub mod status;
