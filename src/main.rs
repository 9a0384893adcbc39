use chrono::Local;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shake_pick::cli::{Cli, Command, FilterArgs};
use shake_pick::engine::{PickOutcome, PickRequest, candidate_pool, pick_drink, search_drinks};
use shake_pick::error::Result;
use shake_pick::interface::{
    display_drink_list, display_match_count, display_no_match, display_pick, prompt_comment,
    prompt_drink, prompt_pick_again, prompt_rating,
};
use shake_pick::models::{Drink, HistoryEntry, SweetnessLevel};
use shake_pick::state::{
    InterstitialPolicy, PickCounter, export_history_csv, import_history_csv, load_catalog,
    load_catalog_with_brands, load_history, load_pick_counter, save_history, save_pick_counter,
};

/// The daily pick count lives next to the history file.
const PICK_COUNT_FILE: &str = "picks.json";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Pick {
            filters,
            seed,
            once,
        } => cmd_pick(&cli.catalog, &cli.history, &filters, seed, once),
        Command::Count { filters, list } => cmd_count(&cli.catalog, &cli.history, &filters, list),
        Command::Search { query } => cmd_search(&cli.catalog, &query),
        Command::Rate { sugar } => cmd_rate(&cli.catalog, &cli.history, sugar),
        Command::ExportHistory { path } => cmd_export_history(&cli.history, &path),
        Command::ImportHistory { path } => cmd_import_history(&cli.history, &path),
    }
}

/// Report a missing catalog file; returns whether it exists.
fn catalog_exists(catalog_path: &str) -> bool {
    if Path::new(catalog_path).exists() {
        return true;
    }
    eprintln!("Drink catalog not found: {}", catalog_path);
    eprintln!("Pass --catalog or place drinks.json in the current directory.");
    false
}

/// Load the catalog, or report a missing file and return `None`.
fn open_catalog(catalog_path: &str) -> Result<Option<Vec<Drink>>> {
    if !catalog_exists(catalog_path) {
        return Ok(None);
    }
    Ok(Some(load_catalog(catalog_path)?))
}

/// Missing history is treated as an empty one.
fn open_history(history_path: &str) -> Result<Vec<HistoryEntry>> {
    let path = Path::new(history_path);
    if !path.exists() {
        info!("No history at {}, starting empty", history_path);
        return Ok(Vec::new());
    }
    load_history(path)
}

/// Pick drinks until the user stops asking for another.
fn cmd_pick(
    catalog_path: &str,
    history_path: &str,
    filters: &FilterArgs,
    seed: Option<u64>,
    once: bool,
) -> Result<()> {
    let Some(catalog) = open_catalog(catalog_path)? else {
        return Ok(());
    };
    let history = open_history(history_path)?;
    let criteria = filters.to_criteria();

    if criteria.smart_priority && history.is_empty() {
        warn!("Smart priority has no history to learn from yet");
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let counter_path = Path::new(history_path).with_file_name(PICK_COUNT_FILE);
    let mut counter = load_pick_counter(&counter_path, Local::now().date_naive())?;
    let policy = InterstitialPolicy::default();

    let request = PickRequest::new(&catalog, &criteria, &history);

    loop {
        match pick_drink(&request, &mut rng) {
            PickOutcome::Picked(drink) => display_pick(drink, &criteria),
            PickOutcome::NoMatch => {
                display_no_match(&criteria);
                return Ok(());
            }
        }

        let picks = counter.increment();
        save_pick_counter(&counter_path, &counter)?;
        if policy.should_show(picks) {
            println!("(pick #{} today, time for a short break)", picks);
        }

        if once || !prompt_pick_again()? {
            break;
        }
    }

    Ok(())
}

/// Report the number of drinks left by the filters.
fn cmd_count(
    catalog_path: &str,
    history_path: &str,
    filters: &FilterArgs,
    list: bool,
) -> Result<()> {
    let Some(catalog) = open_catalog(catalog_path)? else {
        return Ok(());
    };
    let history = open_history(history_path)?;
    let criteria = filters.to_criteria();

    let request = PickRequest::new(&catalog, &criteria, &history);
    let pool = candidate_pool(&request);

    display_match_count(pool.len(), catalog.len(), &criteria);
    if list {
        display_drink_list(&pool, "Matching drinks");
    }

    Ok(())
}

fn cmd_search(catalog_path: &str, query: &str) -> Result<()> {
    if !catalog_exists(catalog_path) {
        return Ok(());
    }
    let (catalog, brands) = load_catalog_with_brands(catalog_path)?;

    let results = search_drinks(&catalog, &brands, query);
    display_drink_list(&results, &format!("Results for '{}'", query));
    Ok(())
}

/// Rate a drink and append the rating to the history file.
fn cmd_rate(catalog_path: &str, history_path: &str, sugar: Option<SweetnessLevel>) -> Result<()> {
    let Some(catalog) = open_catalog(catalog_path)? else {
        return Ok(());
    };
    let mut history = open_history(history_path)?;

    let Some(drink) = prompt_drink(&catalog)? else {
        println!("Nothing rated.");
        return Ok(());
    };

    let rating = prompt_rating(&drink.name)?;
    let comment = prompt_comment()?;

    let mut entry = HistoryEntry::new(&drink.id, rating)?.with_comment(&comment)?;
    if let Some(level) = sugar {
        entry = entry.with_sugar_level(level);
    }
    history.push(entry);

    save_history(history_path, &history)?;
    println!("Rated {} {} stars. History saved.", drink.name, rating);
    Ok(())
}

fn cmd_export_history(history_path: &str, csv_path: &str) -> Result<()> {
    let history = open_history(history_path)?;
    export_history_csv(csv_path, &history)?;
    println!("Exported {} ratings to {}", history.len(), csv_path);
    Ok(())
}

fn cmd_import_history(history_path: &str, csv_path: &str) -> Result<()> {
    let mut history = open_history(history_path)?;
    let imported = import_history_csv(csv_path)?;
    let count = imported.len();

    history.extend(imported);
    save_history(history_path, &history)?;
    println!("Imported {} ratings. History saved.", count);
    Ok(())
}
