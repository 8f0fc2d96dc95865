//! Shared nutrition data structure
//!
//! Used across ingredients, recipes, unplanned meals and aggregated views.

use serde::{Deserialize, Serialize};

/// Nutritional information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionInfo {
    pub calories: f64,
    pub protein: f64, // grams
    pub fat: f64,     // grams
    pub carbs: f64,   // grams
}

impl NutritionInfo {
    /// Create a new NutritionInfo with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale nutrition values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            fat: self.fat * multiplier,
            carbs: self.carbs * multiplier,
        }
    }

    /// Add another nutrition to this one
    pub fn add(&self, other: &NutritionInfo) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            fat: self.fat + other.fat,
            carbs: self.carbs + other.carbs,
        }
    }
}

impl std::ops::Add for NutritionInfo {
    type Output = NutritionInfo;

    fn add(self, other: NutritionInfo) -> NutritionInfo {
        NutritionInfo::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for NutritionInfo {
    type Output = NutritionInfo;

    fn mul(self, multiplier: f64) -> NutritionInfo {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for NutritionInfo {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutritionInfo::zero(), |acc, n| acc + n)
    }
}
