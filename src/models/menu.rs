//! Menu model
//!
//! Exactly one menu per (user, calendar date), created lazily on first
//! write. Dates are stored as ISO `YYYY-MM-DD` text, so equality and
//! range comparisons operate at whole-day granularity by construction.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A user's plan for one calendar date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    pub id: i64,
    pub user_id: String,
    pub date: String, // ISO date: "2025-06-02"
    pub created_at: String,
    pub updated_at: String,
}

impl Menu {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            date: row.get("date")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get a menu by user and date
    pub fn get_by_date(conn: &Connection, user_id: &str, date: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM menus WHERE user_id = ?1 AND date = ?2")?;

        let result = stmt.query_row(params![user_id, date], Self::from_row);
        match result {
            Ok(menu) => Ok(Some(menu)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get or create the menu for a user and date.
    ///
    /// The insert is a no-op when the row already exists, so two
    /// concurrent callers racing on the same not-yet-existing date both
    /// land on the single row guaranteed by UNIQUE(user_id, date).
    pub fn get_or_create(conn: &Connection, user_id: &str, date: &str) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO menus (user_id, date) VALUES (?1, ?2)
            ON CONFLICT(user_id, date) DO NOTHING
            "#,
            params![user_id, date],
        )?;

        Self::get_by_date(conn, user_id, date)?
            .ok_or_else(|| crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// List menus for a user within an inclusive date range, date ascending.
    ///
    /// An inverted range matches nothing.
    pub fn list_in_range(
        conn: &Connection,
        user_id: &str,
        date_from: &str,
        date_to: &str,
    ) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM menus WHERE user_id = ?1 AND date >= ?2 AND date <= ?3 ORDER BY date",
        )?;

        let menus = stmt
            .query_map(params![user_id, date_from, date_to], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(menus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_test_database;

    #[test]
    fn get_or_create_returns_one_row_per_user_and_date() {
        let db = open_test_database();
        let conn = db.get_conn().unwrap();

        let first = Menu::get_or_create(&conn, "user-1", "2025-06-02").unwrap();
        let second = Menu::get_or_create(&conn, "user-1", "2025-06-02").unwrap();
        assert_eq!(first.id, second.id);

        let other_user = Menu::get_or_create(&conn, "user-2", "2025-06-02").unwrap();
        let other_date = Menu::get_or_create(&conn, "user-1", "2025-06-03").unwrap();
        assert_ne!(first.id, other_user.id);
        assert_ne!(first.id, other_date.id);
    }

    #[test]
    fn range_listing_is_inclusive_and_per_user() {
        let db = open_test_database();
        let conn = db.get_conn().unwrap();

        for date in ["2025-06-01", "2025-06-02", "2025-06-03", "2025-06-04"] {
            Menu::get_or_create(&conn, "user-1", date).unwrap();
        }
        Menu::get_or_create(&conn, "user-2", "2025-06-02").unwrap();

        let menus = Menu::list_in_range(&conn, "user-1", "2025-06-02", "2025-06-03").unwrap();
        let dates: Vec<&str> = menus.iter().map(|m| m.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-06-02", "2025-06-03"]);

        let inverted = Menu::list_in_range(&conn, "user-1", "2025-06-03", "2025-06-02").unwrap();
        assert!(inverted.is_empty());
    }
}
