mod counter;
mod persistence;

pub use counter::{DailyPickCounter, InterstitialPolicy, PickCounter};
pub use persistence::{
    export_history_csv, import_history_csv, load_catalog, load_catalog_with_brands, load_history,
    load_pick_counter, save_history, save_pick_counter,
};
