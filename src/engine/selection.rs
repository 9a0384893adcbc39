use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand::seq::SliceRandom;
use strsim::jaro_winkler;
use tracing::debug;

use crate::engine::constants::{
    FUZZY_MATCH_THRESHOLD, MIN_PRIORITY_POOL, PRIORITY_PROBABILITY_STEPS, TOP_RATED_WEIGHT,
};
use crate::engine::history::{high_rated_ids, low_rated_ids, top_rated_ids, unique_item_count};
use crate::models::{Brand, Drink, FilterCriteria, HistoryEntry};

/// Inputs for one pick. Everything is borrowed and left untouched.
#[derive(Debug, Clone, Copy)]
pub struct PickRequest<'a> {
    pub catalog: &'a [Drink],
    pub criteria: &'a FilterCriteria,
    pub history: &'a [HistoryEntry],
}

impl<'a> PickRequest<'a> {
    pub fn new(
        catalog: &'a [Drink],
        criteria: &'a FilterCriteria,
        history: &'a [HistoryEntry],
    ) -> Self {
        Self {
            catalog,
            criteria,
            history,
        }
    }
}

/// Result of a pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickOutcome<'a> {
    Picked(&'a Drink),
    /// Nothing survived filtering; the caller should offer to relax filters.
    NoMatch,
}

impl<'a> PickOutcome<'a> {
    pub fn drink(&self) -> Option<&'a Drink> {
        match self {
            PickOutcome::Picked(drink) => Some(drink),
            PickOutcome::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, PickOutcome::Picked(_))
    }
}

/// Drinks that pass the criteria, minus disliked drinks when avoid mode is on.
///
/// Catalog order is preserved.
pub fn candidate_pool<'a>(request: &PickRequest<'a>) -> Vec<&'a Drink> {
    let criteria = request.criteria;

    let mut pool: Vec<&Drink> = if criteria.is_empty() {
        request.catalog.iter().collect()
    } else {
        request
            .catalog
            .iter()
            .filter(|drink| criteria.matches(drink))
            .collect()
    };
    debug!(
        "Filtered {} drinks down to {} ({} active filters)",
        request.catalog.len(),
        pool.len(),
        criteria.active_filter_count()
    );

    if criteria.avoid_low_rated {
        let disliked = low_rated_ids(request.history);
        let before = pool.len();
        pool.retain(|drink| !disliked.contains(drink.id.as_str()));
        debug!("Avoid mode removed {} disliked drinks", before - pool.len());
    }

    pool
}

/// Chance of drawing from the priority pool, or `None` when the history is too
/// small to bias the pick.
pub fn priority_probability(unique_count: usize) -> Option<f64> {
    PRIORITY_PROBABILITY_STEPS
        .iter()
        .rev()
        .find(|(min_count, _)| unique_count >= *min_count)
        .map(|(_, probability)| *probability)
}

/// Expand the priority pool so favorites appear `TOP_RATED_WEIGHT` times.
///
/// A uniform draw over the result gives favorites 3:1 odds over other liked drinks.
pub fn weighted_expansion<'a>(priority: &[&'a Drink], top_ids: &HashSet<&str>) -> Vec<&'a Drink> {
    priority
        .iter()
        .flat_map(|drink| {
            let copies = if top_ids.contains(drink.id.as_str()) {
                TOP_RATED_WEIGHT
            } else {
                1
            };
            std::iter::repeat_n(*drink, copies)
        })
        .collect()
}

/// Bias a pool toward liked drinks once the history is large enough.
///
/// Returns the pool unchanged with fewer than ten distinct drinks rated. Never returns an empty
/// pool unless given one.
pub fn smart_pool<'a, R: Rng + ?Sized>(
    pool: Vec<&'a Drink>,
    history: &[HistoryEntry],
    rng: &mut R,
) -> Vec<&'a Drink> {
    let unique_count = unique_item_count(history);
    let Some(probability) = priority_probability(unique_count) else {
        debug!(
            "Only {} distinct drinks rated, skipping smart priority",
            unique_count
        );
        return pool;
    };

    let liked = high_rated_ids(history);
    let (priority, exploration): (Vec<&Drink>, Vec<&Drink>) = pool
        .iter()
        .copied()
        .partition(|drink| liked.contains(drink.id.as_str()));

    if priority.len() < MIN_PRIORITY_POOL {
        debug!(
            "Priority pool too small ({}), exploring {} drinks",
            priority.len(),
            exploration.len()
        );
        return if exploration.is_empty() {
            pool
        } else {
            exploration
        };
    }

    let roll: f64 = rng.r#gen();
    if roll < probability {
        let favorites = top_rated_ids(history);
        let expanded = weighted_expansion(&priority, &favorites);
        debug!(
            "Rolled {:.3} < {:.2}, drawing from {} priority entries",
            roll,
            probability,
            expanded.len()
        );
        expanded
    } else if exploration.is_empty() {
        pool
    } else {
        debug!(
            "Rolled {:.3} >= {:.2}, exploring {} drinks",
            roll,
            probability,
            exploration.len()
        );
        exploration
    }
}

/// Final pool the pick is drawn from: filtering, avoid mode, then smart priority.
pub fn selection_pool<'a, R: Rng + ?Sized>(
    request: &PickRequest<'a>,
    rng: &mut R,
) -> Vec<&'a Drink> {
    let pool = candidate_pool(request);
    if request.criteria.smart_priority {
        smart_pool(pool, request.history, rng)
    } else {
        pool
    }
}

/// Pick one drink uniformly from the selection pool.
pub fn pick_drink<'a, R: Rng + ?Sized>(request: &PickRequest<'a>, rng: &mut R) -> PickOutcome<'a> {
    let pool = selection_pool(request, rng);
    match pool.choose(rng).copied() {
        Some(drink) => {
            debug!("Picked {}", drink.debug_string());
            PickOutcome::Picked(drink)
        }
        None => PickOutcome::NoMatch,
    }
}

/// `pick_drink` using the thread-local generator.
pub fn pick_drink_thread_rng<'a>(request: &PickRequest<'a>) -> PickOutcome<'a> {
    pick_drink(request, &mut rand::thread_rng())
}

/// Case-insensitive substring search over drink names, brand ids and brand names.
///
/// An empty query returns the whole catalog.
pub fn search_drinks<'a>(catalog: &'a [Drink], brands: &[Brand], query: &str) -> Vec<&'a Drink> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return catalog.iter().collect();
    }

    let brand_names: HashMap<&str, String> = brands
        .iter()
        .map(|brand| (brand.id.as_str(), brand.name.to_lowercase()))
        .collect();

    catalog
        .iter()
        .filter(|drink| {
            drink.name.to_lowercase().contains(&query)
                || drink.brand_id.to_lowercase().contains(&query)
                || brand_names
                    .get(drink.brand_id.as_str())
                    .is_some_and(|name| name.contains(&query))
        })
        .collect()
}

/// Drinks whose name is close to `query`, best match first.
pub fn fuzzy_matches<'a>(catalog: &'a [Drink], query: &str) -> Vec<(&'a Drink, f64)> {
    let query = query.trim().to_lowercase();
    let mut candidates: Vec<(&Drink, f64)> = catalog
        .iter()
        .map(|drink| (drink, jaro_winkler(&drink.name.to_lowercase(), &query)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates
}
