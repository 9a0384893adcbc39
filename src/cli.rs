use clap::{Args, Parser, Subcommand};

use crate::models::{CalorieRange, Category, FilterCriteria, SweetnessLevel};

/// ShakePick: picks a drink for you from a filtered catalog, learning from your ratings.
#[derive(Parser, Debug)]
#[command(name = "shake_pick")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the drink catalog JSON file.
    #[arg(short, long, default_value = "drinks.json", global = true)]
    pub catalog: String,

    /// Path to the rating history JSON file.
    #[arg(long, default_value = "history.json", global = true)]
    pub history: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pick a random drink that matches the filters.
    Pick {
        #[command(flatten)]
        filters: FilterArgs,

        /// Seed for a reproducible pick.
        #[arg(long)]
        seed: Option<u64>,

        /// Pick once without asking to pick again.
        #[arg(long)]
        once: bool,
    },

    /// Show how many drinks match the filters.
    Count {
        #[command(flatten)]
        filters: FilterArgs,

        /// Also list the matching drinks.
        #[arg(long)]
        list: bool,
    },

    /// Search drinks by name or brand.
    Search {
        /// Text to look for.
        query: String,
    },

    /// Rate a drink and add it to the history.
    Rate {
        /// Sweetness level the drink was ordered at.
        #[arg(long)]
        sugar: Option<SweetnessLevel>,
    },

    /// Export the rating history to CSV.
    ExportHistory {
        /// Destination CSV file.
        path: String,
    },

    /// Import ratings from CSV and append them to the history.
    ImportHistory {
        /// Source CSV file.
        path: String,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Pick {
            filters: FilterArgs::default(),
            seed: None,
            once: false,
        }
    }
}

/// Filter flags shared by `pick` and `count`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only drinks from this brand id (repeatable).
    #[arg(long = "brand")]
    pub brands: Vec<String>,

    /// Only drinks in this category (repeatable).
    #[arg(long = "category")]
    pub categories: Vec<Category>,

    /// Only drinks offered at this sweetness level (repeatable).
    #[arg(long = "sugar")]
    pub sugar_levels: Vec<SweetnessLevel>,

    /// Calorie range: low, medium or high.
    #[arg(long)]
    pub calories: Option<CalorieRange>,

    /// Require (true) or exclude (false) caffeine.
    #[arg(long)]
    pub caffeine: Option<bool>,

    /// Favor drinks you rated 4 stars or more.
    #[arg(long)]
    pub smart: bool,

    /// Skip drinks you rated 2 stars or less.
    #[arg(long)]
    pub avoid: bool,
}

impl FilterArgs {
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            brands: self.brands.iter().cloned().collect(),
            categories: self.categories.iter().copied().collect(),
            sugar_levels: self.sugar_levels.iter().copied().collect(),
            calorie_range: self.calories,
            has_caffeine: self.caffeine,
            smart_priority: self.smart,
            avoid_low_rated: self.avoid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pick_filters() {
        let cli = Cli::parse_from([
            "shake_pick",
            "pick",
            "--brand",
            "coco",
            "--brand",
            "50lan",
            "--category",
            "milkTea",
            "--sugar",
            "half",
            "--calories",
            "medium",
            "--caffeine",
            "false",
            "--smart",
        ]);

        let Some(Command::Pick { filters, .. }) = cli.command else {
            panic!("expected pick command");
        };
        let criteria = filters.to_criteria();
        assert_eq!(criteria.active_filter_count(), 5);
        assert!(criteria.brands.contains("50lan"));
        assert_eq!(criteria.calorie_range, Some(CalorieRange::Medium));
        assert_eq!(criteria.has_caffeine, Some(false));
        assert!(criteria.smart_priority);
        assert!(!criteria.avoid_low_rated);
    }

    #[test]
    fn test_default_command_is_unfiltered_pick() {
        let cli = Cli::parse_from(["shake_pick"]);
        let command = cli.command.unwrap_or_default();
        let Command::Pick { filters, seed, .. } = command else {
            panic!("expected pick command");
        };
        assert!(filters.to_criteria().is_empty());
        assert_eq!(seed, None);
        assert_eq!(cli.catalog, "drinks.json");
    }
}
