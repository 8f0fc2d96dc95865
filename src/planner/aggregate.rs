//! Day aggregation
//!
//! Nutrition totals for one meal and one whole menu. Pure projections
//! over the resolved item graph; order of summation does not matter.

use crate::models::{MealItem, NutritionInfo};
use crate::nutrition::{nutrition_for, recipe_nutrition};

use super::MealDetail;

/// Total nutrition of one meal's items.
///
/// Ingredient quantities are grams; recipe bundles are scaled by the
/// planned servings; unplanned foods carry per-100-unit figures scaled
/// by `quantity / 100`.
pub fn meal_nutrition(items: &[MealItem]) -> NutritionInfo {
    items
        .iter()
        .map(|item| match item {
            MealItem::Ingredient { ingredient, quantity } => nutrition_for(ingredient, *quantity, "g"),
            MealItem::Recipe { recipe, servings } => recipe_nutrition(recipe).scale(*servings),
            MealItem::Unplanned { unplanned_meal, quantity } => {
                unplanned_meal.nutrition.scale(*quantity / 100.0)
            }
        })
        .sum()
}

/// Total nutrition of a whole day's menu
pub fn day_nutrition(meals: &[MealDetail]) -> NutritionInfo {
    meals.iter().map(|meal| meal.nutrition.clone()).sum()
}
