//! Meal-planning aggregation engine
//!
//! Composes ingredients, recipes and unplanned foods into per-day menus,
//! and aggregates nutrition totals and shopping lists across date ranges.

pub mod db;
pub mod models;
pub mod nutrition;
pub mod planner;
