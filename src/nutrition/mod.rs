//! Nutrition calculation module
//!
//! Handles unit conversion and pure nutrition math.

pub mod calc;
pub mod units;

pub use calc::{
    convert_to_grams, nutrition_for, recipe_nutrition, recipe_nutrition_per_serving,
    sum_nutrition, IngredientPortion,
};
pub use units::grams_per_unit;
