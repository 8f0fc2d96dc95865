//! Catalog operations
//!
//! The write boundary for reference data: ingredients, recipes and
//! unplanned meals. Nutrition figures must be non-negative and recipe
//! servings strictly positive before anything reaches the store; the
//! planning and aggregation code trusts both afterwards.

use crate::models::{
    Ingredient, IngredientCreate, Recipe, RecipeCreate, RecipeIngredient, RecipeWithIngredients,
    UnplannedMeal, UnplannedMealCreate,
};

use super::{ensure_name, ensure_quantity, PlanError, PlanResult, Planner};

impl Planner {
    /// Create an ingredient with nutrition facts per 100 g
    pub fn create_ingredient(&self, data: IngredientCreate) -> PlanResult<Ingredient> {
        ensure_name(&data.name)?;
        ensure_nutrition_figures(data.calories, data.protein, data.fat, data.carbs)?;

        let conn = self.db.get_conn()?;
        Ok(Ingredient::create(&conn, &data)?)
    }

    /// List all ingredients, name ascending
    pub fn list_ingredients(&self) -> PlanResult<Vec<Ingredient>> {
        let conn = self.db.get_conn()?;
        Ok(Ingredient::list(&conn)?)
    }

    /// Create a recipe shell; ingredients are attached separately
    pub fn create_recipe(&self, data: RecipeCreate) -> PlanResult<Recipe> {
        ensure_name(&data.name)?;
        if !data.servings.is_finite() || data.servings <= 0.0 {
            return Err(PlanError::Validation(
                "servings must be greater than zero".to_string(),
            ));
        }

        let conn = self.db.get_conn()?;
        Ok(Recipe::create(&conn, &data)?)
    }

    /// Attach an ingredient to a recipe, or overwrite its quantity
    pub fn set_recipe_ingredient(
        &self,
        recipe_id: i64,
        ingredient_id: i64,
        quantity: f64,
    ) -> PlanResult<RecipeWithIngredients> {
        ensure_quantity("quantity", quantity)?;

        let conn = self.db.get_conn()?;
        Recipe::get_by_id(&conn, recipe_id)?.ok_or(PlanError::NotFound("recipe"))?;
        Ingredient::get_by_id(&conn, ingredient_id)?.ok_or(PlanError::NotFound("ingredient"))?;

        RecipeIngredient::upsert(&conn, recipe_id, ingredient_id, quantity)?;
        Recipe::get_with_ingredients(&conn, recipe_id)?.ok_or(PlanError::NotFound("recipe"))
    }

    /// List all recipes with their ingredient pairs, name ascending
    pub fn list_recipes(&self) -> PlanResult<Vec<RecipeWithIngredients>> {
        let conn = self.db.get_conn()?;

        let recipes = Recipe::list(&conn)?;
        let mut detailed = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            let with_ingredients = Recipe::get_with_ingredients(&conn, recipe.id)?
                .ok_or(PlanError::NotFound("recipe"))?;
            detailed.push(with_ingredients);
        }
        Ok(detailed)
    }

    /// Create an unplanned meal with its own per-100-unit nutrition
    pub fn create_unplanned_meal(&self, data: UnplannedMealCreate) -> PlanResult<UnplannedMeal> {
        ensure_name(&data.name)?;
        ensure_nutrition_figures(data.calories, data.protein, data.fat, data.carbs)?;

        let conn = self.db.get_conn()?;
        Ok(UnplannedMeal::create(&conn, &data)?)
    }

    /// List all unplanned meals, name ascending
    pub fn list_unplanned_meals(&self) -> PlanResult<Vec<UnplannedMeal>> {
        let conn = self.db.get_conn()?;
        Ok(UnplannedMeal::list(&conn)?)
    }
}

fn ensure_nutrition_figures(calories: f64, protein: f64, fat: f64, carbs: f64) -> PlanResult<()> {
    ensure_quantity("calories", calories)?;
    ensure_quantity("protein", protein)?;
    ensure_quantity("fat", fat)?;
    ensure_quantity("carbs", carbs)?;
    Ok(())
}
