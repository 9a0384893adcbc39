use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::models::{Brand, Drink, HistoryEntry, SweetnessLevel};
use crate::state::counter::{DailyPickCounter, PickCounter};

/// Catalog files are either a bare drink list or an export holding brands and drinks.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Container {
        #[serde(default)]
        brands: Vec<Brand>,
        drinks: Vec<Drink>,
    },
    List(Vec<Drink>),
}

/// Load the drink catalog from a JSON file.
///
/// Duplicate ids keep the first position and the last record.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Drink>> {
    let (drinks, _) = load_catalog_with_brands(path)?;
    Ok(drinks)
}

/// Load drinks along with the brand list; a bare drink list has no brands.
pub fn load_catalog_with_brands<P: AsRef<Path>>(path: P) -> Result<(Vec<Drink>, Vec<Brand>)> {
    let content = fs::read_to_string(path.as_ref())?;
    let file: CatalogFile = serde_json::from_str(&content)?;
    let (drinks, brands) = match file {
        CatalogFile::Container { brands, drinks } => (drinks, brands),
        CatalogFile::List(drinks) => (drinks, Vec::new()),
    };

    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut catalog: Vec<Drink> = Vec::with_capacity(drinks.len());
    for drink in drinks {
        match positions.get(&drink.id) {
            Some(&idx) => {
                warn!("Duplicate drink id {}, keeping the later record", drink.id);
                catalog[idx] = drink;
            }
            None => {
                positions.insert(drink.id.clone(), catalog.len());
                catalog.push(drink);
            }
        }
    }

    info!(
        "Loaded {} drinks and {} brands from {}",
        catalog.len(),
        brands.len(),
        path.as_ref().display()
    );
    Ok((catalog, brands))
}

/// Load rating history from a JSON file, dropping entries with an invalid rating or comment.
pub fn load_history<P: AsRef<Path>>(path: P) -> Result<Vec<HistoryEntry>> {
    let content = fs::read_to_string(path)?;
    let entries: Vec<HistoryEntry> = serde_json::from_str(&content)?;

    let mut history = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        match entry.validate() {
            Ok(()) => history.push(entry),
            Err(e) => warn!("Skipping history entry {} ({}): {}", idx, entry.drink_id, e),
        }
    }
    Ok(history)
}

/// Save rating history to a JSON file.
pub fn save_history<P: AsRef<Path>>(path: P, history: &[HistoryEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(history)?;
    fs::write(path, json)?;
    Ok(())
}

/// Flat CSV row; every column is always written.
#[derive(Debug, Serialize, Deserialize)]
struct HistoryRow {
    drink_id: String,
    rating: u8,
    sugar_level: Option<SweetnessLevel>,
    comment: String,
}

impl From<&HistoryEntry> for HistoryRow {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            drink_id: entry.drink_id.clone(),
            rating: entry.rating,
            sugar_level: entry.sugar_level,
            comment: entry.comment.clone(),
        }
    }
}

/// Write history to CSV with a header row.
pub fn export_history_csv<P: AsRef<Path>>(path: P, history: &[HistoryEntry]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for entry in history {
        wtr.serialize(HistoryRow::from(entry))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read history from CSV, skipping rows with an invalid rating or comment.
pub fn import_history_csv<P: AsRef<Path>>(path: P) -> Result<Vec<HistoryEntry>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut history = Vec::new();

    for (line, row) in rdr.deserialize::<HistoryRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping history row {}: {}", line + 2, e);
                continue;
            }
        };
        let entry = HistoryEntry::new(&row.drink_id, row.rating)
            .and_then(|entry| entry.with_comment(&row.comment));
        match entry {
            Ok(mut entry) => {
                entry.sugar_level = row.sugar_level;
                history.push(entry);
            }
            Err(e) => warn!("Skipping history row {}: {}", line + 2, e),
        }
    }

    Ok(history)
}

/// On-disk form of the daily pick counter.
#[derive(Debug, Serialize, Deserialize)]
struct PickCountFile {
    day: NaiveDate,
    count: u32,
}

/// Load the pick counter for `today`. A missing file or a count from another day starts at zero.
pub fn load_pick_counter<P: AsRef<Path>>(path: P, today: NaiveDate) -> Result<DailyPickCounter> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(DailyPickCounter::new(today));
    }

    let content = fs::read_to_string(path)?;
    let file: PickCountFile = serde_json::from_str(&content)?;
    Ok(DailyPickCounter::restore(file.day, file.count, today))
}

/// Save the pick counter to a JSON file.
pub fn save_pick_counter<P: AsRef<Path>>(path: P, counter: &DailyPickCounter) -> Result<()> {
    let file = PickCountFile {
        day: counter.day(),
        count: counter.count(),
    };
    fs::write(path, serde_json::to_string_pretty(&file)?)?;
    Ok(())
}
