//! Meal scheduling
//!
//! Completion state machine and manual ordering for meal slots. A meal
//! is pending while `meal_time` is NULL and completed once it carries a
//! timestamp; the only transition is an explicit toggle.

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{Meal, MealType};

use super::menu::{find_meal, load_menu_detail};
use super::{parse_date, MenuDetail, PlanError, PlanResult, Planner};

/// Build the completion timestamp for a menu.
///
/// The stored value combines the menu's calendar date with the current
/// time of day, so completing a plan for a past or future date records
/// a time on that date rather than on today.
pub(super) fn completion_timestamp(menu_date: NaiveDate, now: NaiveDateTime) -> String {
    menu_date.and_time(now.time()).format("%Y-%m-%d %H:%M:%S").to_string()
}

impl Planner {
    /// Toggle a meal between pending and completed.
    ///
    /// Completing stamps the menu-date-adjusted time; toggling back
    /// clears the timestamp entirely.
    pub fn toggle_meal_completion(
        &self,
        user_id: &str,
        date: &str,
        meal_type: MealType,
    ) -> PlanResult<MenuDetail> {
        let menu_date = parse_date(date)?;
        let conn = self.db.get_conn()?;

        let (menu, meal) = find_meal(&conn, user_id, &menu_date.to_string(), meal_type)?;

        let meal_time = if meal.meal_time.is_some() {
            None
        } else {
            Some(completion_timestamp(menu_date, self.clock.now()))
        };
        Meal::set_meal_time(&conn, meal.id, meal_time.as_deref())?;

        load_menu_detail(&conn, &menu)
    }

    /// Assign a meal a new sort order.
    ///
    /// Direct assignment only; callers pick fractional values to splice
    /// between neighbours and no siblings are renumbered.
    pub fn reorder_meal(
        &self,
        user_id: &str,
        date: &str,
        meal_type: MealType,
        new_sort_order: f64,
    ) -> PlanResult<MenuDetail> {
        if !new_sort_order.is_finite() {
            return Err(PlanError::Validation(
                "sort order must be a finite number".to_string(),
            ));
        }
        let date = parse_date(date)?.to_string();
        let conn = self.db.get_conn()?;

        let (menu, meal) = find_meal(&conn, user_id, &date, meal_type)?;
        Meal::set_sort_order(&conn, meal.id, new_sort_order)?;

        load_menu_detail(&conn, &menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IngredientCreate, ItemKind};
    use crate::planner::testing::fixed_planner;

    fn planner_with_breakfast() -> (Planner, i64) {
        let planner = fixed_planner("2026-08-06 09:30:00");
        let oats = planner
            .create_ingredient(IngredientCreate {
                name: "Oats".to_string(),
                calories: 389.0,
                protein: 16.9,
                fat: 6.9,
                carbs: 66.3,
                category: None,
                default_unit: None,
            })
            .unwrap();
        planner
            .add_item_to_meal(
                "user-1",
                "2025-06-02",
                MealType::Breakfast,
                ItemKind::Ingredient,
                oats.id,
                60.0,
            )
            .unwrap();
        (planner, oats.id)
    }

    #[test]
    fn completion_time_lands_on_the_menu_date() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let now = NaiveDateTime::parse_from_str("2026-08-06 09:30:15", "%Y-%m-%d %H:%M:%S").unwrap();

        assert_eq!(completion_timestamp(date, now), "2025-06-02 09:30:15");
    }

    #[test]
    fn toggle_completes_with_menu_date_and_clock_time() {
        let (planner, _) = planner_with_breakfast();

        let menu = planner
            .toggle_meal_completion("user-1", "2025-06-02", MealType::Breakfast)
            .unwrap();

        assert_eq!(
            menu.meals[0].meal_time.as_deref(),
            Some("2025-06-02 09:30:00")
        );
    }

    #[test]
    fn double_toggle_returns_to_pending() {
        let (planner, _) = planner_with_breakfast();

        planner
            .toggle_meal_completion("user-1", "2025-06-02", MealType::Breakfast)
            .unwrap();
        let menu = planner
            .toggle_meal_completion("user-1", "2025-06-02", MealType::Breakfast)
            .unwrap();

        assert_eq!(menu.meals[0].meal_time, None);
    }

    #[test]
    fn toggle_requires_an_existing_slot() {
        let (planner, _) = planner_with_breakfast();

        let missing = planner.toggle_meal_completion("user-1", "2025-06-02", MealType::Dinner);
        assert!(matches!(missing, Err(PlanError::NotFound("meal"))));

        let no_menu = planner.toggle_meal_completion("user-1", "2025-06-03", MealType::Breakfast);
        assert!(matches!(no_menu, Err(PlanError::NotFound("menu"))));
    }

    #[test]
    fn reorder_assigns_directly_and_rejects_non_finite_values() {
        let (planner, oats) = planner_with_breakfast();
        planner
            .add_item_to_meal(
                "user-1",
                "2025-06-02",
                MealType::Lunch,
                ItemKind::Ingredient,
                oats,
                80.0,
            )
            .unwrap();

        let menu = planner
            .reorder_meal("user-1", "2025-06-02", MealType::Breakfast, 1.5)
            .unwrap();
        // Breakfast (1.5) now sorts after lunch (1.0)
        assert_eq!(menu.meals[0].meal_type, MealType::Lunch);
        assert_eq!(menu.meals[1].meal_type, MealType::Breakfast);
        assert_eq!(menu.meals[1].sort_order, 1.5);

        let bad = planner.reorder_meal("user-1", "2025-06-02", MealType::Breakfast, f64::NAN);
        assert!(matches!(bad, Err(PlanError::Validation(_))));
    }
}
