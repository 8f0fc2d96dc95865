//! Menu operations
//!
//! Item planning against a day's menu: the menu and meal slot are
//! found-or-created together with the item write as one logical unit,
//! so retrying a failed action is always safe.

use rusqlite::Connection;
use serde::Serialize;

use crate::models::{
    Ingredient, ItemKind, Meal, MealItem, MealType, Menu, NutritionInfo, Recipe, UnplannedMeal,
};

use super::{aggregate, ensure_quantity, parse_date, PlanError, PlanResult, Planner};

/// A meal slot with its items resolved and nutrition computed
#[derive(Debug, Serialize)]
pub struct MealDetail {
    pub id: i64,
    pub meal_type: MealType,
    pub sort_order: f64,
    pub meal_time: Option<String>,
    pub items: Vec<MealItem>,
    pub nutrition: NutritionInfo,
}

/// A full day's menu graph in display order
#[derive(Debug, Serialize)]
pub struct MenuDetail {
    pub id: i64,
    pub user_id: String,
    pub date: String,
    pub meals: Vec<MealDetail>,
    pub nutrition_total: NutritionInfo,
}

impl Planner {
    /// Get the menu graph for a date, or None if nothing is planned yet
    pub fn get_menu(&self, user_id: &str, date: &str) -> PlanResult<Option<MenuDetail>> {
        let date = parse_date(date)?.to_string();
        let conn = self.db.get_conn()?;

        match Menu::get_by_date(&conn, user_id, &date)? {
            Some(menu) => Ok(Some(load_menu_detail(&conn, &menu)?)),
            None => Ok(None),
        }
    }

    /// Plan an item into a meal slot.
    ///
    /// Creates the menu and the slot on first use for the date, then
    /// upserts the item, all within one transaction. Re-adding an
    /// existing reference overwrites its quantity.
    pub fn add_item_to_meal(
        &self,
        user_id: &str,
        date: &str,
        meal_type: MealType,
        kind: ItemKind,
        reference_id: i64,
        quantity: f64,
    ) -> PlanResult<MenuDetail> {
        ensure_quantity("quantity", quantity)?;
        let date = parse_date(date)?.to_string();

        let mut conn = self.db.get_conn()?;
        let tx = conn.transaction()?;

        ensure_reference_exists(&tx, kind, reference_id)?;
        let menu = Menu::get_or_create(&tx, user_id, &date)?;
        let meal = Meal::get_or_create(&tx, menu.id, meal_type)?;
        MealItem::upsert(&tx, meal.id, kind, reference_id, quantity)?;

        tx.commit()?;
        Ok(load_menu_detail(&conn, &menu)?)
    }

    /// Remove an item from a meal slot
    pub fn remove_item_from_meal(
        &self,
        user_id: &str,
        date: &str,
        meal_type: MealType,
        kind: ItemKind,
        reference_id: i64,
    ) -> PlanResult<MenuDetail> {
        let date = parse_date(date)?.to_string();
        let conn = self.db.get_conn()?;

        let (menu, meal) = find_meal(&conn, user_id, &date, meal_type)?;
        if !MealItem::remove(&conn, meal.id, kind, reference_id)? {
            return Err(PlanError::NotFound("meal item"));
        }

        Ok(load_menu_detail(&conn, &menu)?)
    }

    /// Overwrite the quantity of an already-planned item.
    ///
    /// Unlike [`Planner::add_item_to_meal`] this never creates anything;
    /// a missing item is an error.
    pub fn update_item_quantity(
        &self,
        user_id: &str,
        date: &str,
        meal_type: MealType,
        kind: ItemKind,
        reference_id: i64,
        quantity: f64,
    ) -> PlanResult<MenuDetail> {
        ensure_quantity("quantity", quantity)?;
        let date = parse_date(date)?.to_string();
        let conn = self.db.get_conn()?;

        let (menu, meal) = find_meal(&conn, user_id, &date, meal_type)?;
        if !MealItem::update_quantity(&conn, meal.id, kind, reference_id, quantity)? {
            return Err(PlanError::NotFound("meal item"));
        }

        Ok(load_menu_detail(&conn, &menu)?)
    }
}

/// Resolve a menu's meals in display order with items and totals
pub(super) fn load_menu_detail(conn: &Connection, menu: &Menu) -> PlanResult<MenuDetail> {
    let meals = Meal::list_for_menu(conn, menu.id)?;

    let mut details = Vec::with_capacity(meals.len());
    for meal in meals {
        let items = MealItem::load_for_meal(conn, meal.id)?;
        let nutrition = aggregate::meal_nutrition(&items);
        details.push(MealDetail {
            id: meal.id,
            meal_type: meal.meal_type,
            sort_order: meal.sort_order,
            meal_time: meal.meal_time,
            items,
            nutrition,
        });
    }

    let nutrition_total = aggregate::day_nutrition(&details);
    Ok(MenuDetail {
        id: menu.id,
        user_id: menu.user_id.clone(),
        date: menu.date.clone(),
        meals: details,
        nutrition_total,
    })
}

/// Locate an existing menu and meal slot; both must already exist
pub(super) fn find_meal(
    conn: &Connection,
    user_id: &str,
    date: &str,
    meal_type: MealType,
) -> PlanResult<(Menu, Meal)> {
    let menu = Menu::get_by_date(conn, user_id, date)?.ok_or(PlanError::NotFound("menu"))?;
    let meal =
        Meal::find_by_type(conn, menu.id, meal_type)?.ok_or(PlanError::NotFound("meal"))?;
    Ok((menu, meal))
}

fn ensure_reference_exists(conn: &Connection, kind: ItemKind, reference_id: i64) -> PlanResult<()> {
    let found = match kind {
        ItemKind::Ingredient => Ingredient::get_by_id(conn, reference_id)?.is_some(),
        ItemKind::Recipe => Recipe::get_by_id(conn, reference_id)?.is_some(),
        ItemKind::UnplannedMeal => UnplannedMeal::get_by_id(conn, reference_id)?.is_some(),
    };

    if found {
        Ok(())
    } else {
        Err(PlanError::NotFound(kind.as_str()))
    }
}
