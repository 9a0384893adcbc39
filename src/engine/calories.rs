use crate::engine::constants::KCAL_PER_SUGAR_GRAM;
use crate::models::{Drink, SweetnessLevel};

/// Calories of a drink ordered at the given sweetness level.
///
/// Priority:
/// 1. Explicit per-level override
/// 2. Sugar grams: non-sugar base plus the level's share of sugar calories
/// 3. Base calories scaled by the level's retention ratio
///
/// Results are truncated toward zero and never clamped, so a drink whose sugar
/// calories exceed its base can come out negative at low sweetness.
pub fn calories_for(drink: &Drink, level: SweetnessLevel) -> i32 {
    if let Some(calories) = drink
        .calorie_overrides
        .as_ref()
        .and_then(|table| table.get(&level))
    {
        return *calories;
    }

    if let Some(grams) = drink.sugar_grams {
        return sugar_based_calories(drink.base_calories, grams, level);
    }

    (drink.base_calories as f64 * level.retention_ratio()) as i32
}

fn sugar_based_calories(base_calories: i32, sugar_grams: f64, level: SweetnessLevel) -> i32 {
    let full_sugar_kcal = sugar_grams * KCAL_PER_SUGAR_GRAM;
    let non_sugar_base = base_calories as f64 - full_sugar_kcal;
    (non_sugar_base + full_sugar_kcal * level.sugar_fraction()) as i32
}

/// Calories at every level the drink can be ordered at.
pub fn calorie_table(drink: &Drink) -> Vec<(SweetnessLevel, i32)> {
    SweetnessLevel::ALL
        .into_iter()
        .filter(|level| drink.supports(*level))
        .map(|level| (level, calories_for(drink, level)))
        .collect()
}
