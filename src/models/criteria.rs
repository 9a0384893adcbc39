use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::calories::calories_for;
use crate::engine::constants::{HIGH_CALORIE_RANGE, LOW_CALORIE_RANGE, MEDIUM_CALORIE_RANGE};
use crate::error::PickError;
use crate::models::drink::{Category, Drink, SweetnessLevel};

/// Calorie bucket with fixed inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalorieRange {
    Low,
    Medium,
    High,
}

impl CalorieRange {
    pub fn bounds(self) -> (i32, i32) {
        match self {
            CalorieRange::Low => LOW_CALORIE_RANGE,
            CalorieRange::Medium => MEDIUM_CALORIE_RANGE,
            CalorieRange::High => HIGH_CALORIE_RANGE,
        }
    }

    pub fn contains(self, calories: i32) -> bool {
        let (lo, hi) = self.bounds();
        (lo..=hi).contains(&calories)
    }
}

impl fmt::Display for CalorieRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalorieRange::Low => f.write_str("< 200 kcal"),
            CalorieRange::Medium => f.write_str("200-500 kcal"),
            CalorieRange::High => f.write_str("> 500 kcal"),
        }
    }
}

impl FromStr for CalorieRange {
    type Err = PickError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(CalorieRange::Low),
            "medium" | "mid" => Ok(CalorieRange::Medium),
            "high" => Ok(CalorieRange::High),
            other => Err(PickError::InvalidInput(format!(
                "unknown calorie range '{}'",
                other
            ))),
        }
    }
}

/// User constraints for one pick.
///
/// Every group left unset passes. `smart_priority` and `avoid_low_rated` are
/// selection toggles and never affect `matches`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub brands: HashSet<String>,

    #[serde(default)]
    pub categories: HashSet<Category>,

    #[serde(default)]
    pub sugar_levels: HashSet<SweetnessLevel>,

    #[serde(default)]
    pub calorie_range: Option<CalorieRange>,

    #[serde(default)]
    pub has_caffeine: Option<bool>,

    #[serde(default)]
    pub smart_priority: bool,

    #[serde(default)]
    pub avoid_low_rated: bool,
}

impl FilterCriteria {
    /// True when none of the five constraint groups is set.
    pub fn is_empty(&self) -> bool {
        self.active_filter_count() == 0
    }

    /// Number of non-empty constraint groups, for the filter badge.
    pub fn active_filter_count(&self) -> usize {
        [
            !self.brands.is_empty(),
            !self.categories.is_empty(),
            !self.sugar_levels.is_empty(),
            self.calorie_range.is_some(),
            self.has_caffeine.is_some(),
        ]
        .into_iter()
        .filter(|&active| active)
        .count()
    }

    /// Check whether a drink passes every set constraint.
    pub fn matches(&self, drink: &Drink) -> bool {
        if !self.brands.is_empty() && !self.brands.contains(&drink.brand_id) {
            return false;
        }

        if !self.categories.is_empty() && !self.categories.contains(&drink.category) {
            return false;
        }

        // Drink must offer at least one of the wanted levels.
        if !self.sugar_levels.is_empty()
            && !drink
                .sugar_levels
                .iter()
                .any(|level| self.sugar_levels.contains(level))
        {
            return false;
        }

        if let Some(range) = self.calorie_range {
            if !range.contains(drink.base_calories) {
                return false;
            }
        }

        if let Some(wanted) = self.has_caffeine {
            // Unknown caffeine never satisfies an explicit yes/no.
            match drink.has_caffeine {
                Some(actual) if actual == wanted => {}
                _ => return false,
            }
        }

        true
    }

    /// Calories to show for a drink under these criteria.
    ///
    /// Uses the selected level when exactly one is chosen, else the base value.
    pub fn display_calories(&self, drink: &Drink) -> i32 {
        match self.single_sugar_level() {
            Some(level) => calories_for(drink, level),
            None => drink.base_calories,
        }
    }

    fn single_sugar_level(&self) -> Option<SweetnessLevel> {
        if self.sugar_levels.len() == 1 {
            self.sugar_levels.iter().next().copied()
        } else {
            None
        }
    }

    pub fn toggle_brand(&mut self, brand_id: &str) {
        if !self.brands.remove(brand_id) {
            self.brands.insert(brand_id.to_string());
        }
    }

    pub fn toggle_category(&mut self, category: Category) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    pub fn toggle_sugar_level(&mut self, level: SweetnessLevel) {
        if !self.sugar_levels.remove(&level) {
            self.sugar_levels.insert(level);
        }
    }

    /// Clear every constraint and both toggles.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_drink() -> Drink {
        let mut drink = Drink::new("coco_001", "coco", Category::MilkTea, 480);
        drink.has_caffeine = Some(true);
        drink.sugar_levels = vec![SweetnessLevel::Sugar50, SweetnessLevel::Sugar100];
        drink
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert!(criteria.matches(&sample_drink()));
        assert!(criteria.matches(&Drink::new("odd", "x", Category::Special, -5)));
    }

    #[test]
    fn test_sugar_levels_intersect_not_contain() {
        let mut criteria = FilterCriteria::default();
        criteria.sugar_levels = [SweetnessLevel::Sugar0, SweetnessLevel::Sugar50]
            .into_iter()
            .collect();
        assert!(criteria.matches(&sample_drink()));

        criteria.sugar_levels = [SweetnessLevel::Sugar0].into_iter().collect();
        assert!(!criteria.matches(&sample_drink()));
    }

    #[test]
    fn test_calorie_range_uses_base_calories() {
        let mut criteria = FilterCriteria::default();
        criteria.calorie_range = Some(CalorieRange::Medium);
        // Base 480 is medium even though a lower level would be low.
        criteria.sugar_levels = [SweetnessLevel::Sugar50].into_iter().collect();
        assert!(criteria.matches(&sample_drink()));

        criteria.calorie_range = Some(CalorieRange::High);
        assert!(!criteria.matches(&sample_drink()));
    }

    #[test]
    fn test_calorie_range_boundaries() {
        assert!(CalorieRange::Low.contains(0));
        assert!(CalorieRange::Low.contains(199));
        assert!(CalorieRange::Medium.contains(200));
        assert!(CalorieRange::Medium.contains(500));
        assert!(CalorieRange::High.contains(501));
        assert!(CalorieRange::High.contains(9999));
        assert!(!CalorieRange::High.contains(10000));
        assert!(!CalorieRange::Low.contains(-1));
    }

    #[test]
    fn test_unknown_caffeine_fails_explicit_request() {
        let mut drink = sample_drink();
        drink.has_caffeine = None;

        let mut criteria = FilterCriteria::default();
        criteria.has_caffeine = Some(true);
        assert!(!criteria.matches(&drink));

        criteria.has_caffeine = Some(false);
        assert!(!criteria.matches(&drink));

        drink.has_caffeine = Some(false);
        assert!(criteria.matches(&drink));
    }

    #[test]
    fn test_active_filter_count_counts_groups() {
        let mut criteria = FilterCriteria::default();
        criteria.brands = ["coco", "50lan", "kebuke"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(criteria.active_filter_count(), 1);

        criteria.categories.insert(Category::Coffee);
        criteria.categories.insert(Category::Fresh);
        criteria.has_caffeine = Some(false);
        criteria.smart_priority = true;
        criteria.avoid_low_rated = true;
        assert_eq!(criteria.active_filter_count(), 3);
    }

    #[test]
    fn test_toggles_do_not_count_as_filters() {
        let criteria = FilterCriteria {
            smart_priority: true,
            avoid_low_rated: true,
            ..Default::default()
        };
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_brand("coco");
        criteria.toggle_category(Category::Coffee);
        criteria.toggle_sugar_level(SweetnessLevel::Sugar30);
        assert_eq!(criteria.active_filter_count(), 3);

        criteria.toggle_brand("coco");
        assert!(criteria.brands.is_empty());

        criteria.smart_priority = true;
        criteria.reset();
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn test_display_calories_single_level() {
        let mut drink = sample_drink();
        drink.calorie_overrides = Some([(SweetnessLevel::Sugar50, 400)].into_iter().collect());

        let mut criteria = FilterCriteria::default();
        assert_eq!(criteria.display_calories(&drink), 480);

        criteria.toggle_sugar_level(SweetnessLevel::Sugar50);
        assert_eq!(criteria.display_calories(&drink), 400);

        criteria.toggle_sugar_level(SweetnessLevel::Sugar100);
        assert_eq!(criteria.display_calories(&drink), 480);
    }
}
