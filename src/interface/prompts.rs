use dialoguer::{Confirm, Input, Select};

use crate::engine::constants::MAX_COMMENT_LENGTH;
use crate::engine::selection::fuzzy_matches;
use crate::error::Result;
use crate::models::Drink;

/// Ask whether to draw another drink with the same filters.
pub fn prompt_pick_again() -> Result<bool> {
    prompt_yes_no("Pick again?", true)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Prompt for a drink by name, falling back to fuzzy matching.
pub fn prompt_drink(catalog: &[Drink]) -> Result<Option<&Drink>> {
    loop {
        let input: String = Input::new()
            .with_prompt("Which drink? (press Enter to cancel)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        // Exact id or name first (case-insensitive)
        let exact = catalog.iter().find(|d| {
            d.id.eq_ignore_ascii_case(input) || d.name.to_lowercase() == input.to_lowercase()
        });
        if exact.is_some() {
            return Ok(exact);
        }

        let candidates = fuzzy_matches(catalog, input);
        if candidates.is_empty() {
            println!("No matching drink found for '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let drink = candidates[0].0;
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", drink.name))
                .default(true)
                .interact()?;
            if confirm {
                return Ok(Some(drink));
            }
            continue;
        }

        let mut options: Vec<String> = candidates
            .iter()
            .take(5)
            .map(|(d, _)| format!("{} ({})", d.name, d.brand_id))
            .collect();
        let shown = options.len();
        options.push("None of these".to_string());

        let selection = Select::new()
            .with_prompt("Which did you mean?")
            .items(&options)
            .default(0)
            .interact()?;

        if selection < shown {
            return Ok(Some(candidates[selection].0));
        }
    }
}

/// Prompt for a 1-5 star rating.
pub fn prompt_rating(drink_name: &str) -> Result<u8> {
    let options: Vec<String> = (1..=5u8)
        .map(|stars| format!("{} {}", stars, "*".repeat(stars as usize)))
        .collect();

    let selection = Select::new()
        .with_prompt(format!("How was '{}'?", drink_name))
        .items(&options)
        .default(2)
        .interact()?;

    Ok(selection as u8 + 1)
}

/// Prompt for an optional short comment.
pub fn prompt_comment() -> Result<String> {
    let comment: String = Input::new()
        .with_prompt(format!("Comment (max {} characters)", MAX_COMMENT_LENGTH))
        .allow_empty(true)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            if input.chars().count() <= MAX_COMMENT_LENGTH {
                Ok(())
            } else {
                Err(format!("Keep it under {} characters", MAX_COMMENT_LENGTH))
            }
        })
        .interact_text()?;

    Ok(comment.trim().to_string())
}
