//! Meal model
//!
//! An ordered, completable slot (breakfast/lunch/dinner/snack) within a
//! menu. `meal_time` doubles as the completion marker: NULL means the
//! meal is still pending.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, Row, ToSql};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// Meal type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    /// Parse from string; unknown values are rejected, not defaulted
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snack" => Some(MealType::Snack),
            _ => None,
        }
    }
}

impl ToSql for MealType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for MealType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        Self::parse(text)
            .ok_or_else(|| FromSqlError::Other(format!("unknown meal type '{}'", text).into()))
    }
}

/// A meal slot within a menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub id: i64,
    pub menu_id: i64,
    pub meal_type: MealType,
    /// Manual ordering among pending meals; fractional values splice
    /// between neighbours without renumbering
    pub sort_order: f64,
    /// Completion timestamp ("YYYY-MM-DD HH:MM:SS"), NULL while pending
    pub meal_time: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Meal {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            menu_id: row.get("menu_id")?,
            meal_type: row.get("meal_type")?,
            sort_order: row.get("sort_order")?,
            meal_time: row.get("meal_time")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get a meal by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM meals WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(meal) => Ok(Some(meal)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Find the first meal of a type within a menu
    pub fn find_by_type(
        conn: &Connection,
        menu_id: i64,
        meal_type: MealType,
    ) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM meals WHERE menu_id = ?1 AND meal_type = ?2 ORDER BY id LIMIT 1",
        )?;

        let result = stmt.query_row(params![menu_id, meal_type], Self::from_row);
        match result {
            Ok(meal) => Ok(Some(meal)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get the existing slot of this type, or create one at the end of
    /// the menu's ordering. An existing slot is returned unmodified so
    /// that adding items to it never spawns a duplicate.
    pub fn get_or_create(conn: &Connection, menu_id: i64, meal_type: MealType) -> DbResult<Self> {
        if let Some(meal) = Self::find_by_type(conn, menu_id, meal_type)? {
            return Ok(meal);
        }

        let sort_order = Self::next_sort_order(conn, menu_id)?;
        tracing::debug!(menu_id, meal_type = meal_type.as_str(), sort_order, "creating meal slot");

        conn.execute(
            r#"
            INSERT INTO meals (menu_id, meal_type, sort_order)
            VALUES (?1, ?2, ?3)
            "#,
            params![menu_id, meal_type, sort_order],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or_else(|| crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Next sort order: max existing + 1, or 0 for an empty menu
    fn next_sort_order(conn: &Connection, menu_id: i64) -> DbResult<f64> {
        let next: f64 = conn.query_row(
            "SELECT COALESCE(MAX(sort_order) + 1.0, 0.0) FROM meals WHERE menu_id = ?1",
            [menu_id],
            |row| row.get(0),
        )?;
        Ok(next)
    }

    /// List a menu's meals in display order: completed meals first,
    /// ascending by completion time, then pending meals ascending by
    /// sort order.
    pub fn list_for_menu(conn: &Connection, menu_id: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM meals WHERE menu_id = ?1
            ORDER BY meal_time IS NULL, meal_time, sort_order
            "#,
        )?;

        let meals = stmt
            .query_map([menu_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(meals)
    }

    /// Set or clear the completion timestamp
    pub fn set_meal_time(conn: &Connection, id: i64, meal_time: Option<&str>) -> DbResult<()> {
        conn.execute(
            "UPDATE meals SET meal_time = ?1, updated_at = datetime('now') WHERE id = ?2",
            params![meal_time, id],
        )?;
        Ok(())
    }

    /// Assign a new sort order; siblings are never renumbered
    pub fn set_sort_order(conn: &Connection, id: i64, sort_order: f64) -> DbResult<()> {
        conn.execute(
            "UPDATE meals SET sort_order = ?1, updated_at = datetime('now') WHERE id = ?2",
            params![sort_order, id],
        )?;
        Ok(())
    }

    /// Delete a meal; its items go with it via cascade
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM meals WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_test_database;
    use crate::models::Menu;

    fn menu(conn: &Connection) -> Menu {
        Menu::get_or_create(conn, "user-1", "2025-06-02").unwrap()
    }

    #[test]
    fn get_or_create_reuses_the_existing_slot() {
        let db = open_test_database();
        let conn = db.get_conn().unwrap();
        let menu = menu(&conn);

        let first = Meal::get_or_create(&conn, menu.id, MealType::Lunch).unwrap();
        let second = Meal::get_or_create(&conn, menu.id, MealType::Lunch).unwrap();
        assert_eq!(first.id, second.id);

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM meals WHERE menu_id = ?1",
                [menu.id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn sort_order_starts_at_zero_and_appends() {
        let db = open_test_database();
        let conn = db.get_conn().unwrap();
        let menu = menu(&conn);

        let breakfast = Meal::get_or_create(&conn, menu.id, MealType::Breakfast).unwrap();
        let lunch = Meal::get_or_create(&conn, menu.id, MealType::Lunch).unwrap();
        let dinner = Meal::get_or_create(&conn, menu.id, MealType::Dinner).unwrap();

        assert_eq!(breakfast.sort_order, 0.0);
        assert_eq!(lunch.sort_order, 1.0);
        assert_eq!(dinner.sort_order, 2.0);
    }

    #[test]
    fn display_order_puts_completed_first_by_time_then_pending_by_sort_order() {
        let db = open_test_database();
        let conn = db.get_conn().unwrap();
        let menu = menu(&conn);

        // A completed 10:00, B pending sort 2, C completed 09:00, D pending sort 1
        let a = Meal::get_or_create(&conn, menu.id, MealType::Breakfast).unwrap();
        let b = Meal::get_or_create(&conn, menu.id, MealType::Lunch).unwrap();
        let c = Meal::get_or_create(&conn, menu.id, MealType::Dinner).unwrap();
        let d = Meal::get_or_create(&conn, menu.id, MealType::Snack).unwrap();

        Meal::set_meal_time(&conn, a.id, Some("2025-06-02 10:00:00")).unwrap();
        Meal::set_sort_order(&conn, b.id, 2.0).unwrap();
        Meal::set_meal_time(&conn, c.id, Some("2025-06-02 09:00:00")).unwrap();
        Meal::set_sort_order(&conn, d.id, 1.0).unwrap();

        let ordered = Meal::list_for_menu(&conn, menu.id).unwrap();
        let ids: Vec<i64> = ordered.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![c.id, a.id, d.id, b.id]);
    }

    #[test]
    fn fractional_sort_order_splices_between_neighbours() {
        let db = open_test_database();
        let conn = db.get_conn().unwrap();
        let menu = menu(&conn);

        let breakfast = Meal::get_or_create(&conn, menu.id, MealType::Breakfast).unwrap();
        let lunch = Meal::get_or_create(&conn, menu.id, MealType::Lunch).unwrap();
        let snack = Meal::get_or_create(&conn, menu.id, MealType::Snack).unwrap();

        // Move the snack between breakfast (0) and lunch (1)
        Meal::set_sort_order(&conn, snack.id, 0.5).unwrap();

        let ordered = Meal::list_for_menu(&conn, menu.id).unwrap();
        let ids: Vec<i64> = ordered.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![breakfast.id, snack.id, lunch.id]);
    }

    #[test]
    fn meal_type_rejects_unknown_values() {
        assert_eq!(MealType::parse("brunch"), None);
        assert_eq!(MealType::parse("Dinner"), Some(MealType::Dinner));
    }

    #[test]
    fn meal_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MealType::Breakfast).unwrap(),
            "\"breakfast\""
        );
    }
}
