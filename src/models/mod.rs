mod brand;
mod criteria;
mod drink;
mod history;

pub use brand::Brand;
pub use criteria::{CalorieRange, FilterCriteria};
pub use drink::{Category, Drink, SweetnessLevel};
pub use history::HistoryEntry;
