//! Meal item model
//!
//! One quantified reference attached to a meal. The three kinds live in
//! separate junction tables but are loaded into a single tagged union so
//! the aggregators can match on them exhaustively.

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::{Ingredient, Recipe, RecipeWithIngredients, UnplannedMeal};
use crate::db::DbResult;

/// The kind of reference a meal item carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Ingredient,
    Recipe,
    UnplannedMeal,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Ingredient => "ingredient",
            ItemKind::Recipe => "recipe",
            ItemKind::UnplannedMeal => "unplannedMeal",
        }
    }

    /// Parse from string; unknown values are rejected, not defaulted
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ingredient" => Some(ItemKind::Ingredient),
            "recipe" => Some(ItemKind::Recipe),
            "unplannedMeal" => Some(ItemKind::UnplannedMeal),
            _ => None,
        }
    }
}

/// A resolved meal item
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MealItem {
    /// A raw ingredient, quantity in grams
    Ingredient { ingredient: Ingredient, quantity: f64 },
    /// A recipe bundle, scaled by servings
    Recipe {
        recipe: RecipeWithIngredients,
        servings: f64,
    },
    /// An ad-hoc food, quantity in its declared units
    #[serde(rename = "unplannedMeal")]
    Unplanned {
        unplanned_meal: UnplannedMeal,
        quantity: f64,
    },
}

impl MealItem {
    /// Create the item if absent, else overwrite its quantity.
    ///
    /// The composite key (meal, reference) keeps re-adds from producing
    /// duplicate rows, which also makes retried actions idempotent.
    pub fn upsert(
        conn: &Connection,
        meal_id: i64,
        kind: ItemKind,
        reference_id: i64,
        quantity: f64,
    ) -> DbResult<()> {
        let sql = match kind {
            ItemKind::Ingredient => {
                r#"
                INSERT INTO meal_ingredients (meal_id, ingredient_id, quantity)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(meal_id, ingredient_id)
                DO UPDATE SET quantity = excluded.quantity, updated_at = datetime('now')
                "#
            }
            ItemKind::Recipe => {
                r#"
                INSERT INTO meal_recipes (meal_id, recipe_id, servings)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(meal_id, recipe_id)
                DO UPDATE SET servings = excluded.servings, updated_at = datetime('now')
                "#
            }
            ItemKind::UnplannedMeal => {
                r#"
                INSERT INTO meal_unplanned_meals (meal_id, unplanned_meal_id, quantity)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(meal_id, unplanned_meal_id)
                DO UPDATE SET quantity = excluded.quantity, updated_at = datetime('now')
                "#
            }
        };

        conn.execute(sql, params![meal_id, reference_id, quantity])?;
        Ok(())
    }

    /// Overwrite the quantity of an existing item; returns false if the
    /// item does not exist (strict update, not an upsert)
    pub fn update_quantity(
        conn: &Connection,
        meal_id: i64,
        kind: ItemKind,
        reference_id: i64,
        quantity: f64,
    ) -> DbResult<bool> {
        let sql = match kind {
            ItemKind::Ingredient => {
                "UPDATE meal_ingredients SET quantity = ?3, updated_at = datetime('now')
                 WHERE meal_id = ?1 AND ingredient_id = ?2"
            }
            ItemKind::Recipe => {
                "UPDATE meal_recipes SET servings = ?3, updated_at = datetime('now')
                 WHERE meal_id = ?1 AND recipe_id = ?2"
            }
            ItemKind::UnplannedMeal => {
                "UPDATE meal_unplanned_meals SET quantity = ?3, updated_at = datetime('now')
                 WHERE meal_id = ?1 AND unplanned_meal_id = ?2"
            }
        };

        let rows = conn.execute(sql, params![meal_id, reference_id, quantity])?;
        Ok(rows > 0)
    }

    /// Delete an item; returns false if it does not exist
    pub fn remove(
        conn: &Connection,
        meal_id: i64,
        kind: ItemKind,
        reference_id: i64,
    ) -> DbResult<bool> {
        let sql = match kind {
            ItemKind::Ingredient => {
                "DELETE FROM meal_ingredients WHERE meal_id = ?1 AND ingredient_id = ?2"
            }
            ItemKind::Recipe => "DELETE FROM meal_recipes WHERE meal_id = ?1 AND recipe_id = ?2",
            ItemKind::UnplannedMeal => {
                "DELETE FROM meal_unplanned_meals WHERE meal_id = ?1 AND unplanned_meal_id = ?2"
            }
        };

        let rows = conn.execute(sql, params![meal_id, reference_id])?;
        Ok(rows > 0)
    }

    /// Load every item of a meal with its reference data resolved
    pub fn load_for_meal(conn: &Connection, meal_id: i64) -> DbResult<Vec<MealItem>> {
        let mut items = Vec::new();

        let mut stmt = conn.prepare(
            r#"
            SELECT i.id, i.name, i.calories, i.protein, i.fat, i.carbs,
                   i.category, i.default_unit, i.created_at, i.updated_at,
                   mi.quantity
            FROM meal_ingredients mi
            INNER JOIN ingredients i ON mi.ingredient_id = i.id
            WHERE mi.meal_id = ?1
            ORDER BY i.name
            "#,
        )?;
        let ingredient_items = stmt
            .query_map([meal_id], |row| {
                Ok(MealItem::Ingredient {
                    ingredient: Ingredient::from_row(row)?,
                    quantity: row.get("quantity")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        items.extend(ingredient_items);

        let mut stmt =
            conn.prepare("SELECT recipe_id, servings FROM meal_recipes WHERE meal_id = ?1 ORDER BY id")?;
        let recipe_refs = stmt
            .query_map([meal_id], |row| {
                Ok((row.get::<_, i64>("recipe_id")?, row.get::<_, f64>("servings")?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        for (recipe_id, servings) in recipe_refs {
            let recipe = Recipe::get_with_ingredients(conn, recipe_id)?
                .ok_or_else(|| crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))?;
            items.push(MealItem::Recipe { recipe, servings });
        }

        let mut stmt = conn.prepare(
            r#"
            SELECT u.id, u.name, u.calories, u.protein, u.fat, u.carbs,
                   u.basis, u.created_at, u.updated_at,
                   mu.quantity
            FROM meal_unplanned_meals mu
            INNER JOIN unplanned_meals u ON mu.unplanned_meal_id = u.id
            WHERE mu.meal_id = ?1
            ORDER BY u.name
            "#,
        )?;
        let unplanned_items = stmt
            .query_map([meal_id], |row| {
                Ok(MealItem::Unplanned {
                    unplanned_meal: UnplannedMeal::from_row(row)?,
                    quantity: row.get("quantity")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        items.extend(unplanned_items);

        Ok(items)
    }
}
