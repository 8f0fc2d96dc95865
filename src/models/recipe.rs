//! Recipe model
//!
//! A named bundle of (ingredient, grams) pairs. Nutrition is derived from
//! the pairs at read time and never stored.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use super::{RecipeIngredient, RecipeIngredientDetail};
use crate::db::DbResult;

/// A recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    /// How many servings the ingredient bundle represents; always > 0
    pub servings: f64,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCreate {
    pub name: String,
    #[serde(default = "default_servings")]
    pub servings: f64,
    pub notes: Option<String>,
}

fn default_servings() -> f64 {
    1.0
}

/// A recipe with its ingredient pairs resolved
#[derive(Debug, Clone, Serialize)]
pub struct RecipeWithIngredients {
    pub recipe: Recipe,
    pub ingredients: Vec<RecipeIngredientDetail>,
}

impl Recipe {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            servings: row.get("servings")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Insert a new recipe
    pub fn create(conn: &Connection, data: &RecipeCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO recipes (name, servings, notes)
            VALUES (?1, ?2, ?3)
            "#,
            params![data.name, data.servings, data.notes],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or_else(|| crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a recipe by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM recipes WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(recipe) => Ok(Some(recipe)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a recipe with its ingredient pairs resolved
    pub fn get_with_ingredients(conn: &Connection, id: i64) -> DbResult<Option<RecipeWithIngredients>> {
        let recipe = match Self::get_by_id(conn, id)? {
            Some(recipe) => recipe,
            None => return Ok(None),
        };

        let ingredients = RecipeIngredient::details_for_recipe(conn, id)?;
        Ok(Some(RecipeWithIngredients { recipe, ingredients }))
    }

    /// List all recipes, name ascending
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM recipes ORDER BY name")?;

        let recipes = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(recipes)
    }
}
