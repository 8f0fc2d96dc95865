//! Unit conversion constants
//!
//! Fixed gram multipliers for the household units planning inputs use.
//! Volumes are treated as water-dense (1 ml = 1 g), and "piece" carries
//! a rough 100 g default.

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

/// Grams per milligram
pub const G_PER_MG: f64 = 0.001;
/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;

// ============================================================================
// Household Measures (to grams, water-dense approximation)
// ============================================================================

/// Grams per liter
pub const G_PER_L: f64 = 1000.0;
/// Grams per tablespoon
pub const G_PER_TBSP: f64 = 15.0;
/// Grams per teaspoon
pub const G_PER_TSP: f64 = 5.0;
/// Grams per cup
pub const G_PER_CUP: f64 = 250.0;
/// Grams per piece (average item weight)
pub const G_PER_PIECE: f64 = 100.0;

/// Get the conversion factor to grams for a known unit
pub fn grams_per_unit(unit: &str) -> Option<f64> {
    let lower = unit.to_lowercase();
    let trimmed = lower.trim();

    match trimmed {
        "g" | "gram" | "grams" => Some(1.0),
        "mg" | "milligram" | "milligrams" => Some(G_PER_MG),
        "kg" | "kilogram" | "kilograms" => Some(G_PER_KG),
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Some(1.0),
        "l" | "liter" | "liters" | "litre" | "litres" => Some(G_PER_L),
        "tbsp" | "tablespoon" | "tablespoons" => Some(G_PER_TBSP),
        "tsp" | "teaspoon" | "teaspoons" => Some(G_PER_TSP),
        "cup" | "cups" => Some(G_PER_CUP),
        "piece" | "pieces" | "pc" | "pcs" => Some(G_PER_PIECE),
        _ => None,
    }
}
