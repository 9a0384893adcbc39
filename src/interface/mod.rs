pub mod prompts;
pub mod render;

pub use prompts::{prompt_comment, prompt_drink, prompt_pick_again, prompt_rating, prompt_yes_no};
pub use render::{display_drink_list, display_match_count, display_no_match, display_pick};
