//! Nutrition computation
//!
//! Deterministic value math over ingredients and recipes. No I/O, no
//! clamping; non-negativity of stored figures is enforced at the write
//! boundary.

use crate::models::{Ingredient, NutritionInfo, RecipeWithIngredients};

use super::units::grams_per_unit;

/// An ingredient with a quantity attached, ready for summation
#[derive(Debug, Clone, Copy)]
pub struct IngredientPortion<'a> {
    pub ingredient: &'a Ingredient,
    pub amount: f64,
    pub unit: &'a str,
}

/// Convert an amount in the given unit to grams.
///
/// Unknown units pass through with multiplier 1 as a documented
/// best-effort fallback rather than a fatal error.
pub fn convert_to_grams(amount: f64, unit: &str) -> f64 {
    match grams_per_unit(unit) {
        Some(factor) => amount * factor,
        None => {
            tracing::warn!(unit, "unknown unit, passing amount through as grams");
            amount
        }
    }
}

/// Nutrition for a given amount of an ingredient.
///
/// Stored facts are per 100 g, so the result is the per-100 figures
/// scaled by `grams / 100`.
pub fn nutrition_for(ingredient: &Ingredient, amount: f64, unit: &str) -> NutritionInfo {
    let grams = convert_to_grams(amount, unit);
    ingredient.nutrition.scale(grams / 100.0)
}

/// Sum nutrition over a list of portions; an empty list is all-zero
pub fn sum_nutrition(portions: &[IngredientPortion<'_>]) -> NutritionInfo {
    portions
        .iter()
        .map(|p| nutrition_for(p.ingredient, p.amount, p.unit))
        .sum()
}

/// Total nutrition of a recipe's ingredient bundle (quantities in grams)
pub fn recipe_nutrition(recipe: &RecipeWithIngredients) -> NutritionInfo {
    recipe
        .ingredients
        .iter()
        .map(|entry| nutrition_for(&entry.ingredient, entry.quantity, "g"))
        .sum()
}

/// Per-serving view of a recipe's nutrition.
///
/// `servings > 0` is enforced when recipes are written, so the division
/// is safe here.
pub fn recipe_nutrition_per_serving(recipe: &RecipeWithIngredients) -> NutritionInfo {
    recipe_nutrition(recipe).scale(1.0 / recipe.recipe.servings)
}
