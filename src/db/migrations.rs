//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    // Create migrations table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    // Get current version
    let current_version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    // Run migrations
    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Get the applied schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- INGREDIENTS
        -- Reference data; nutrition facts per 100 g
        -- ============================================
        CREATE TABLE ingredients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,

            -- Nutritional values per 100 g
            calories REAL NOT NULL DEFAULT 0 CHECK(calories >= 0),
            protein REAL NOT NULL DEFAULT 0 CHECK(protein >= 0),   -- grams
            fat REAL NOT NULL DEFAULT 0 CHECK(fat >= 0),           -- grams
            carbs REAL NOT NULL DEFAULT 0 CHECK(carbs >= 0),       -- grams

            category TEXT,                       -- nullable grouping label
            default_unit TEXT,                   -- e.g. "g", "piece"
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_ingredients_name ON ingredients(name);

        -- ============================================
        -- RECIPES
        -- Named bundles of ingredients; nutrition is
        -- always derived, never stored
        -- ============================================
        CREATE TABLE recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            servings REAL NOT NULL DEFAULT 1.0 CHECK(servings > 0),
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_recipes_name ON recipes(name);

        -- ============================================
        -- RECIPE INGREDIENTS
        -- Junction table: which ingredients in which
        -- recipes, quantity in grams
        -- ============================================
        CREATE TABLE recipe_ingredients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
            ingredient_id INTEGER NOT NULL REFERENCES ingredients(id) ON DELETE RESTRICT,
            quantity REAL NOT NULL CHECK(quantity >= 0),  -- grams
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),

            UNIQUE(recipe_id, ingredient_id)     -- one entry per ingredient per recipe
        );

        CREATE INDEX idx_recipe_ingredients_recipe ON recipe_ingredients(recipe_id);
        CREATE INDEX idx_recipe_ingredients_ingredient ON recipe_ingredients(ingredient_id);

        -- ============================================
        -- UNPLANNED MEALS
        -- Ad-hoc foods carrying their own nutrition
        -- facts per 100 declared units
        -- ============================================
        CREATE TABLE unplanned_meals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,

            calories REAL NOT NULL DEFAULT 0 CHECK(calories >= 0),
            protein REAL NOT NULL DEFAULT 0 CHECK(protein >= 0),
            fat REAL NOT NULL DEFAULT 0 CHECK(fat >= 0),
            carbs REAL NOT NULL DEFAULT 0 CHECK(carbs >= 0),

            -- What one declared unit means for this item
            basis TEXT NOT NULL CHECK(basis IN ('servings', 'grams')) DEFAULT 'servings',
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_unplanned_meals_name ON unplanned_meals(name);

        -- ============================================
        -- MENUS
        -- One per user per calendar date, created
        -- lazily on first write
        -- ============================================
        CREATE TABLE menus (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            date TEXT NOT NULL,                  -- ISO date: "2025-06-02"
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),

            UNIQUE(user_id, date)
        );

        -- ============================================
        -- MEALS
        -- Ordered, completable slots within a menu
        -- ============================================
        CREATE TABLE meals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            menu_id INTEGER NOT NULL REFERENCES menus(id) ON DELETE CASCADE,
            meal_type TEXT NOT NULL CHECK(meal_type IN ('breakfast', 'lunch', 'dinner', 'snack')),

            sort_order REAL NOT NULL DEFAULT 0,  -- fractional splicing allowed
            meal_time TEXT,                      -- completion timestamp, NULL while pending

            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_meals_menu ON meals(menu_id);
        CREATE INDEX idx_meals_type ON meals(meal_type);

        -- ============================================
        -- MEAL ITEMS
        -- Three junction tables, one per item kind;
        -- re-adding a reference upserts its quantity
        -- ============================================
        CREATE TABLE meal_ingredients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            meal_id INTEGER NOT NULL REFERENCES meals(id) ON DELETE CASCADE,
            ingredient_id INTEGER NOT NULL REFERENCES ingredients(id) ON DELETE RESTRICT,
            quantity REAL NOT NULL CHECK(quantity >= 0),  -- grams
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),

            UNIQUE(meal_id, ingredient_id)
        );

        CREATE INDEX idx_meal_ingredients_meal ON meal_ingredients(meal_id);

        CREATE TABLE meal_recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            meal_id INTEGER NOT NULL REFERENCES meals(id) ON DELETE CASCADE,
            recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE RESTRICT,
            servings REAL NOT NULL CHECK(servings >= 0),
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),

            UNIQUE(meal_id, recipe_id)
        );

        CREATE INDEX idx_meal_recipes_meal ON meal_recipes(meal_id);

        CREATE TABLE meal_unplanned_meals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            meal_id INTEGER NOT NULL REFERENCES meals(id) ON DELETE CASCADE,
            unplanned_meal_id INTEGER NOT NULL REFERENCES unplanned_meals(id) ON DELETE RESTRICT,
            quantity REAL NOT NULL CHECK(quantity >= 0),
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),

            UNIQUE(meal_id, unplanned_meal_id)
        );

        CREATE INDEX idx_meal_unplanned_meals_meal ON meal_unplanned_meals(meal_id);
        "#,
    )?;
    Ok(())
}
