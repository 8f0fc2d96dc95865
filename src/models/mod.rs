//! Data models
//!
//! Rust structs representing database entities.

mod ingredient;
mod meal;
mod meal_item;
mod menu;
mod nutrition;
mod recipe;
mod recipe_ingredient;
mod unplanned_meal;

pub use ingredient::{Ingredient, IngredientCreate};
pub use meal::{Meal, MealType};
pub use meal_item::{ItemKind, MealItem};
pub use menu::Menu;
pub use nutrition::NutritionInfo;
pub use recipe::{Recipe, RecipeCreate, RecipeWithIngredients};
pub use recipe_ingredient::{RecipeIngredient, RecipeIngredientDetail};
pub use unplanned_meal::{QuantityBasis, UnplannedMeal, UnplannedMealCreate};
