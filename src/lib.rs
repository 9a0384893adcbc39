pub mod cli;
pub mod engine;
pub mod error;
pub mod interface;
pub mod models;
pub mod state;

pub use engine::{PickOutcome, PickRequest, calories_for, pick_drink};
pub use error::{PickError, Result};
pub use models::{Drink, FilterCriteria, HistoryEntry};
