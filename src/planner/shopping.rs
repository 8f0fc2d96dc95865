//! Shopping list aggregation
//!
//! Walks every menu in an inclusive date range and merges repeated
//! ingredients into one deduplicated list of total gram quantities.
//! Rows carry the raw per-100 g figures so merge arithmetic stays exact
//! until a caller chooses to round.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Ingredient, Meal, MealItem, Menu};

use super::{parse_date, PlanResult, Planner};

/// One deduplicated ingredient row of a shopping list
#[derive(Debug, Clone, Serialize)]
pub struct ShoppingListRow {
    pub ingredient_id: i64,
    pub name: String,
    pub total_grams: f64,
    /// Per-100 g figures, never pre-multiplied; portion nutrition is
    /// `field * total_grams / 100` on the caller's side
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl Planner {
    /// Aggregate a user's planned ingredients over an inclusive date
    /// range, sorted by ingredient name.
    ///
    /// Ingredients reachable both directly and through recipes merge
    /// into one row; recipe quantities are scaled by the planned
    /// servings. Unplanned meals represent consumption, not groceries,
    /// and never appear. An inverted range yields an empty list.
    pub fn get_shopping_list(
        &self,
        user_id: &str,
        date_from: &str,
        date_to: &str,
    ) -> PlanResult<Vec<ShoppingListRow>> {
        let date_from = parse_date(date_from)?.to_string();
        let date_to = parse_date(date_to)?.to_string();

        let conn = self.db.get_conn()?;
        let menus = Menu::list_in_range(&conn, user_id, &date_from, &date_to)?;

        let mut rows: HashMap<i64, ShoppingListRow> = HashMap::new();
        for menu in &menus {
            for meal in Meal::list_for_menu(&conn, menu.id)? {
                for item in MealItem::load_for_meal(&conn, meal.id)? {
                    match item {
                        MealItem::Ingredient { ingredient, quantity } => {
                            accumulate(&mut rows, &ingredient, quantity);
                        }
                        MealItem::Recipe { recipe, servings } => {
                            for entry in &recipe.ingredients {
                                accumulate(&mut rows, &entry.ingredient, entry.quantity * servings);
                            }
                        }
                        MealItem::Unplanned { .. } => {}
                    }
                }
            }
        }

        let mut list: Vec<ShoppingListRow> = rows.into_values().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }
}

fn accumulate(rows: &mut HashMap<i64, ShoppingListRow>, ingredient: &Ingredient, grams: f64) {
    rows.entry(ingredient.id)
        .and_modify(|row| row.total_grams += grams)
        .or_insert_with(|| ShoppingListRow {
            ingredient_id: ingredient.id,
            name: ingredient.name.clone(),
            total_grams: grams,
            calories: ingredient.nutrition.calories,
            protein: ingredient.nutrition.protein,
            fat: ingredient.nutrition.fat,
            carbs: ingredient.nutrition.carbs,
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Ingredient, IngredientCreate, ItemKind, MealType, RecipeCreate, UnplannedMealCreate,
    };
    use crate::planner::testing::fixed_planner;

    fn seed_ingredient(planner: &Planner, name: &str, calories: f64) -> Ingredient {
        planner
            .create_ingredient(IngredientCreate {
                name: name.to_string(),
                calories,
                protein: 10.0,
                fat: 1.0,
                carbs: 70.0,
                category: None,
                default_unit: None,
            })
            .unwrap()
    }

    #[test]
    fn merges_direct_and_recipe_occurrences_of_one_ingredient() {
        let planner = fixed_planner("2025-06-02 12:00:00");
        let flour = seed_ingredient(&planner, "Flour", 364.0);

        let pancakes = planner
            .create_recipe(RecipeCreate {
                name: "Pancakes".to_string(),
                servings: 4.0,
                notes: None,
            })
            .unwrap();
        planner
            .set_recipe_ingredient(pancakes.id, flour.id, 50.0)
            .unwrap();

        // Day 1: 100 g flour directly; Day 2: pancakes at 2 servings
        planner
            .add_item_to_meal(
                "user-1",
                "2025-06-02",
                MealType::Breakfast,
                ItemKind::Ingredient,
                flour.id,
                100.0,
            )
            .unwrap();
        planner
            .add_item_to_meal(
                "user-1",
                "2025-06-03",
                MealType::Breakfast,
                ItemKind::Recipe,
                pancakes.id,
                2.0,
            )
            .unwrap();

        let list = planner
            .get_shopping_list("user-1", "2025-06-02", "2025-06-03")
            .unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Flour");
        assert_eq!(list[0].total_grams, 200.0);
        // Figures stay per-100 g
        assert_eq!(list[0].calories, 364.0);
    }

    #[test]
    fn unplanned_meals_never_appear() {
        let planner = fixed_planner("2025-06-02 12:00:00");
        let cake = planner
            .create_unplanned_meal(UnplannedMealCreate {
                name: "Cake".to_string(),
                calories: 350.0,
                protein: 5.0,
                fat: 15.0,
                carbs: 50.0,
                basis: Default::default(),
            })
            .unwrap();

        planner
            .add_item_to_meal(
                "user-1",
                "2025-06-02",
                MealType::Snack,
                ItemKind::UnplannedMeal,
                cake.id,
                2.0,
            )
            .unwrap();

        let list = planner
            .get_shopping_list("user-1", "2025-06-01", "2025-06-08")
            .unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn inverted_range_yields_an_empty_list() {
        let planner = fixed_planner("2025-06-02 12:00:00");
        let flour = seed_ingredient(&planner, "Flour", 364.0);

        planner
            .add_item_to_meal(
                "user-1",
                "2025-06-02",
                MealType::Lunch,
                ItemKind::Ingredient,
                flour.id,
                100.0,
            )
            .unwrap();

        let list = planner
            .get_shopping_list("user-1", "2025-06-03", "2025-06-02")
            .unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn zero_quantity_references_still_materialize_a_row() {
        let planner = fixed_planner("2025-06-02 12:00:00");
        let flour = seed_ingredient(&planner, "Flour", 364.0);

        planner
            .add_item_to_meal(
                "user-1",
                "2025-06-02",
                MealType::Lunch,
                ItemKind::Ingredient,
                flour.id,
                0.0,
            )
            .unwrap();

        let list = planner
            .get_shopping_list("user-1", "2025-06-02", "2025-06-02")
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].total_grams, 0.0);
    }

    #[test]
    fn rows_sort_by_name_case_sensitively() {
        let planner = fixed_planner("2025-06-02 12:00:00");
        let apple = seed_ingredient(&planner, "apple", 52.0);
        let banana = seed_ingredient(&planner, "Banana", 89.0);

        for ingredient in [&apple, &banana] {
            planner
                .add_item_to_meal(
                    "user-1",
                    "2025-06-02",
                    MealType::Snack,
                    ItemKind::Ingredient,
                    ingredient.id,
                    100.0,
                )
                .unwrap();
        }

        let list = planner
            .get_shopping_list("user-1", "2025-06-02", "2025-06-02")
            .unwrap();
        let names: Vec<&str> = list.iter().map(|row| row.name.as_str()).collect();
        // Uppercase sorts before lowercase under default collation
        assert_eq!(names, vec!["Banana", "apple"]);
    }

    #[test]
    fn only_the_requested_user_and_range_contribute() {
        let planner = fixed_planner("2025-06-02 12:00:00");
        let flour = seed_ingredient(&planner, "Flour", 364.0);

        planner
            .add_item_to_meal(
                "user-1",
                "2025-06-02",
                MealType::Lunch,
                ItemKind::Ingredient,
                flour.id,
                100.0,
            )
            .unwrap();
        planner
            .add_item_to_meal(
                "user-2",
                "2025-06-02",
                MealType::Lunch,
                ItemKind::Ingredient,
                flour.id,
                400.0,
            )
            .unwrap();
        planner
            .add_item_to_meal(
                "user-1",
                "2025-06-09",
                MealType::Lunch,
                ItemKind::Ingredient,
                flour.id,
                400.0,
            )
            .unwrap();

        let list = planner
            .get_shopping_list("user-1", "2025-06-01", "2025-06-07")
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].total_grams, 100.0);
    }
}
