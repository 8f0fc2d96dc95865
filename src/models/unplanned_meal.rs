//! Unplanned meal model
//!
//! Ad-hoc "quick food" entries (restaurant food, snacks bought on the go)
//! that carry their own nutrition facts instead of an ingredient breakdown.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use super::NutritionInfo;
use crate::db::DbResult;

/// What one declared unit of an unplanned meal means.
///
/// The stored nutrition facts are per 100 units either way; the basis
/// records whether those units are servings or grams/millilitres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuantityBasis {
    #[default]
    Servings,
    Grams,
}

impl QuantityBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityBasis::Servings => "servings",
            QuantityBasis::Grams => "grams",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "grams" => QuantityBasis::Grams,
            _ => QuantityBasis::Servings,
        }
    }
}

/// An unplanned meal with directly-stored nutrition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnplannedMeal {
    pub id: i64,
    pub name: String,
    /// Nutrition facts per 100 declared units
    pub nutrition: NutritionInfo,
    pub basis: QuantityBasis,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new unplanned meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnplannedMealCreate {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    #[serde(default)]
    pub basis: QuantityBasis,
}

impl UnplannedMeal {
    /// Create from a database row
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let basis: String = row.get("basis")?;
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            nutrition: NutritionInfo {
                calories: row.get("calories")?,
                protein: row.get("protein")?,
                fat: row.get("fat")?,
                carbs: row.get("carbs")?,
            },
            basis: QuantityBasis::from_str(&basis),
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Insert a new unplanned meal
    pub fn create(conn: &Connection, data: &UnplannedMealCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO unplanned_meals (name, calories, protein, fat, carbs, basis)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                data.name,
                data.calories,
                data.protein,
                data.fat,
                data.carbs,
                data.basis.as_str(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or_else(|| crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get an unplanned meal by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM unplanned_meals WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(meal) => Ok(Some(meal)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all unplanned meals, name ascending
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM unplanned_meals ORDER BY name")?;

        let meals = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(meals)
    }
}
