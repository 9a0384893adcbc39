use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PickError;

/// Sugar intensity a drink can be ordered at, from no sugar to full sweetness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SweetnessLevel {
    Sugar0,
    Sugar30,
    Sugar50,
    Sugar70,
    Sugar100,
}

impl SweetnessLevel {
    pub const ALL: [SweetnessLevel; 5] = [
        SweetnessLevel::Sugar0,
        SweetnessLevel::Sugar30,
        SweetnessLevel::Sugar50,
        SweetnessLevel::Sugar70,
        SweetnessLevel::Sugar100,
    ];

    /// Position of this level between no sugar (0.0) and full sweetness (1.0).
    pub fn sugar_fraction(self) -> f64 {
        match self {
            SweetnessLevel::Sugar0 => 0.0,
            SweetnessLevel::Sugar30 => 0.3,
            SweetnessLevel::Sugar50 => 0.5,
            SweetnessLevel::Sugar70 => 0.7,
            SweetnessLevel::Sugar100 => 1.0,
        }
    }

    /// Share of full-sweetness calories kept at this level.
    ///
    /// Only used when a drink has neither an override table nor sugar grams.
    pub fn retention_ratio(self) -> f64 {
        match self {
            SweetnessLevel::Sugar0 => 0.6,
            SweetnessLevel::Sugar30 => 0.75,
            SweetnessLevel::Sugar50 => 0.85,
            SweetnessLevel::Sugar70 => 0.92,
            SweetnessLevel::Sugar100 => 1.0,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            SweetnessLevel::Sugar0 => "no sugar",
            SweetnessLevel::Sugar30 => "light",
            SweetnessLevel::Sugar50 => "half",
            SweetnessLevel::Sugar70 => "less",
            SweetnessLevel::Sugar100 => "full",
        }
    }
}

impl fmt::Display for SweetnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for SweetnessLevel {
    type Err = PickError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0" | "sugar0" | "none" | "no" => Ok(SweetnessLevel::Sugar0),
            "30" | "sugar30" | "light" => Ok(SweetnessLevel::Sugar30),
            "50" | "sugar50" | "half" => Ok(SweetnessLevel::Sugar50),
            "70" | "sugar70" | "less" => Ok(SweetnessLevel::Sugar70),
            "100" | "sugar100" | "full" => Ok(SweetnessLevel::Sugar100),
            other => Err(PickError::InvalidInput(format!(
                "unknown sweetness level '{}'",
                other
            ))),
        }
    }
}

/// Drink category. Unknown keys in catalog data fall back to `Special`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    MilkTea,
    PureTea,
    FruitTea,
    Coffee,
    Fresh,
    Special,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::MilkTea,
        Category::PureTea,
        Category::FruitTea,
        Category::Coffee,
        Category::Fresh,
        Category::Special,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::MilkTea => "milkTea",
            Category::PureTea => "pureTea",
            Category::FruitTea => "fruitTea",
            Category::Coffee => "coffee",
            Category::Fresh => "fresh",
            Category::Special => "special",
        }
    }

    /// Map a catalog key to a category, defaulting to `Special`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "milkTea" => Category::MilkTea,
            "pureTea" => Category::PureTea,
            "fruitTea" => Category::FruitTea,
            "coffee" => Category::Coffee,
            "fresh" => Category::Fresh,
            _ => Category::Special,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = PickError;

    /// Strict parse for user input; catalog data goes through `from_key` instead.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], "");
        Category::ALL
            .into_iter()
            .find(|c| c.key().to_lowercase() == wanted)
            .ok_or_else(|| PickError::InvalidInput(format!("unknown category '{}'", s)))
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(Category::from_key(&key))
    }
}

fn all_levels() -> Vec<SweetnessLevel> {
    SweetnessLevel::ALL.to_vec()
}

/// A catalog drink with its nutrition attributes.
///
/// Owned by the catalog and never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    #[serde(rename = "drink_id")]
    pub id: String,

    pub brand_id: String,

    #[serde(default)]
    pub name: String,

    pub category: Category,

    /// Calories at full sweetness.
    pub base_calories: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar_grams: Option<f64>,

    /// `None` when the caffeine content of the drink is unknown.
    #[serde(default)]
    pub has_caffeine: Option<bool>,

    #[serde(
        rename = "caffeine_content",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub caffeine_mg: Option<u32>,

    #[serde(rename = "available_sugar_levels", default = "all_levels")]
    pub sugar_levels: Vec<SweetnessLevel>,

    #[serde(
        rename = "calories_by_sugar",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub calorie_overrides: Option<BTreeMap<SweetnessLevel, i32>>,
}

impl Drink {
    /// Minimal drink: all sweetness levels, no sugar or caffeine data.
    pub fn new(id: &str, brand_id: &str, category: Category, base_calories: i32) -> Self {
        Self {
            id: id.to_string(),
            brand_id: brand_id.to_string(),
            name: id.to_string(),
            category,
            base_calories,
            sugar_grams: None,
            has_caffeine: None,
            caffeine_mg: None,
            sugar_levels: all_levels(),
            calorie_overrides: None,
        }
    }

    pub fn supports(&self, level: SweetnessLevel) -> bool {
        self.sugar_levels.contains(&level)
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} ({}): {} kcal, {}, caffeine:{}",
            self.id,
            self.brand_id,
            self.base_calories,
            self.category,
            match self.has_caffeine {
                Some(true) => "yes",
                Some(false) => "no",
                None => "unknown",
            }
        )
    }
}
