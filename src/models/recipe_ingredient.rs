//! Recipe ingredient model
//!
//! Junction rows linking ingredients into recipes, quantity in grams.
//! Re-adding an ingredient to a recipe overwrites its quantity.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use super::Ingredient;
use crate::db::DbResult;

/// An ingredient entry within a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub id: i64,
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub quantity: f64, // grams
    pub created_at: String,
    pub updated_at: String,
}

/// Recipe ingredient with the referenced ingredient resolved
#[derive(Debug, Clone, Serialize)]
pub struct RecipeIngredientDetail {
    pub ingredient: Ingredient,
    pub quantity: f64, // grams
}

impl RecipeIngredient {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            recipe_id: row.get("recipe_id")?,
            ingredient_id: row.get("ingredient_id")?,
            quantity: row.get("quantity")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Insert or overwrite the quantity for an ingredient within a recipe
    pub fn upsert(
        conn: &Connection,
        recipe_id: i64,
        ingredient_id: i64,
        quantity: f64,
    ) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(recipe_id, ingredient_id)
            DO UPDATE SET quantity = excluded.quantity, updated_at = datetime('now')
            "#,
            params![recipe_id, ingredient_id, quantity],
        )?;

        let mut stmt = conn.prepare(
            "SELECT * FROM recipe_ingredients WHERE recipe_id = ?1 AND ingredient_id = ?2",
        )?;
        let row = stmt.query_row(params![recipe_id, ingredient_id], Self::from_row)?;
        Ok(row)
    }

    /// Remove an ingredient from a recipe; returns false if it was absent
    pub fn remove(conn: &Connection, recipe_id: i64, ingredient_id: i64) -> DbResult<bool> {
        let rows = conn.execute(
            "DELETE FROM recipe_ingredients WHERE recipe_id = ?1 AND ingredient_id = ?2",
            params![recipe_id, ingredient_id],
        )?;
        Ok(rows > 0)
    }

    /// Get all entries for a recipe
    pub fn get_for_recipe(conn: &Connection, recipe_id: i64) -> DbResult<Vec<Self>> {
        let mut stmt =
            conn.prepare("SELECT * FROM recipe_ingredients WHERE recipe_id = ?1 ORDER BY id")?;

        let entries = stmt
            .query_map([recipe_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Get entries with ingredient details for a recipe, ingredient name ascending
    pub fn details_for_recipe(
        conn: &Connection,
        recipe_id: i64,
    ) -> DbResult<Vec<RecipeIngredientDetail>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT i.id, i.name, i.calories, i.protein, i.fat, i.carbs,
                   i.category, i.default_unit, i.created_at, i.updated_at,
                   ri.quantity
            FROM recipe_ingredients ri
            INNER JOIN ingredients i ON ri.ingredient_id = i.id
            WHERE ri.recipe_id = ?1
            ORDER BY i.name
            "#,
        )?;

        let details = stmt
            .query_map([recipe_id], |row| {
                Ok(RecipeIngredientDetail {
                    ingredient: Ingredient::from_row(row)?,
                    quantity: row.get("quantity")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(details)
    }
}
