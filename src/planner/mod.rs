//! Planner service
//!
//! Caller-facing operations over the menu graph: item planning,
//! completion and ordering, day totals and shopping lists. Every
//! operation validates its input before touching the store and surfaces
//! failures through [`PlanError`].

mod aggregate;
mod catalog;
mod clock;
mod menu;
mod schedule;
mod shopping;

pub use aggregate::{day_nutrition, meal_nutrition};
pub use clock::{Clock, SystemClock};
pub use menu::{MealDetail, MenuDetail};
pub use shopping::ShoppingListRow;

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::db::{Database, DbError};

/// Planner error types
#[derive(Debug, Error)]
pub enum PlanError {
    /// Input rejected before any store mutation
    #[error("validation error: {0}")]
    Validation(String),

    /// A menu, meal, item or reference the operation targeted does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Reserved for stores that cannot guarantee slot uniqueness; not
    /// raised by this engine under normal operation
    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<rusqlite::Error> for PlanError {
    fn from(err: rusqlite::Error) -> Self {
        PlanError::Db(DbError::Sqlite(err))
    }
}

/// Result type for planner operations
pub type PlanResult<T> = Result<T, PlanError>;

/// Meal-planning service over a shared database.
///
/// The wall clock is injectable so completion timestamps are
/// deterministic under test.
pub struct Planner {
    db: Database,
    clock: Arc<dyn Clock>,
}

impl Planner {
    /// Create a planner using the system wall clock
    pub fn new(db: Database) -> Self {
        Self::with_clock(db, Arc::new(SystemClock))
    }

    /// Create a planner with an explicit clock
    pub fn with_clock(db: Database, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }
}

/// Parse a `YYYY-MM-DD` calendar date from the wire.
///
/// Dates are whole-day values, never instants; everything downstream
/// compares them as day-granular text.
pub(crate) fn parse_date(date: &str) -> PlanResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| PlanError::Validation(format!("date must be YYYY-MM-DD, got '{}'", date)))
}

pub(crate) fn ensure_quantity(label: &str, value: f64) -> PlanResult<()> {
    if !value.is_finite() {
        return Err(PlanError::Validation(format!(
            "{} must be a finite number",
            label
        )));
    }
    if value < 0.0 {
        return Err(PlanError::Validation(format!(
            "{} must not be negative",
            label
        )));
    }
    Ok(())
}

pub(crate) fn ensure_name(name: &str) -> PlanResult<()> {
    if name.trim().is_empty() {
        return Err(PlanError::Validation("name must not be empty".to_string()));
    }
    Ok(())
}
