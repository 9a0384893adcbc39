pub mod calories;
pub mod constants;
pub mod history;
pub mod selection;

pub use calories::{calorie_table, calories_for};
pub use constants::*;
pub use history::{high_rated_ids, low_rated_ids, top_rated_ids, unique_item_count};
pub use selection::{
    PickOutcome, PickRequest, candidate_pool, fuzzy_matches, pick_drink, pick_drink_thread_rng,
    priority_probability, search_drinks, selection_pool, smart_pool, weighted_expansion,
};
