use crate::engine::calories::calorie_table;
use crate::models::{Drink, FilterCriteria};

fn caffeine_label(drink: &Drink) -> String {
    match (drink.has_caffeine, drink.caffeine_mg) {
        (Some(true), Some(mg)) => format!("caffeine {} mg", mg),
        (Some(true), None) => "caffeine".to_string(),
        (Some(false), _) => "caffeine-free".to_string(),
        (None, _) => "caffeine unknown".to_string(),
    }
}

/// Display the picked drink with its calories per sweetness level.
pub fn display_pick(drink: &Drink, criteria: &FilterCriteria) {
    println!();
    println!("=== Your drink ===");
    println!();
    println!("  {} ({})", drink.name, drink.brand_id);
    println!(
        "  {} | {} kcal | {}",
        drink.category,
        criteria.display_calories(drink),
        caffeine_label(drink)
    );

    let table = calorie_table(drink);
    if !table.is_empty() {
        let levels: Vec<String> = table
            .iter()
            .map(|(level, kcal)| format!("{} {}", level, kcal))
            .collect();
        println!("  Sweetness: {}", levels.join(" / "));
    }
    println!();
}

/// Explain an empty result and suggest next steps.
pub fn display_no_match(criteria: &FilterCriteria) {
    println!();
    println!("No drink matches your filters.");
    let active = criteria.active_filter_count();
    if active > 0 {
        println!(
            "Try relaxing some of your {} active filters, or clear them all.",
            active
        );
    }
    if criteria.avoid_low_rated {
        println!("Avoid mode is hiding drinks you rated 2 stars or lower.");
    }
    println!();
}

/// Display a simple list of drinks with their details.
pub fn display_drink_list(drinks: &[&Drink], title: &str) {
    if drinks.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} drinks) ===", title, drinks.len());
    println!();

    let max_name_len = drinks.iter().map(|d| d.name.len()).max().unwrap_or(10);

    for drink in drinks {
        println!(
            "  {:<width$}  {:<10} {:>5} kcal  {}",
            drink.name,
            drink.brand_id,
            drink.base_calories,
            caffeine_label(drink),
            width = max_name_len
        );
    }

    println!();
}

/// Display how many drinks the current filters leave.
pub fn display_match_count(matching: usize, total: usize, criteria: &FilterCriteria) {
    let badge = match criteria.active_filter_count() {
        0 => "no filters".to_string(),
        1 => "1 filter".to_string(),
        n => format!("{} filters", n),
    };
    println!("{} of {} drinks match ({})", matching, total, badge);
}
