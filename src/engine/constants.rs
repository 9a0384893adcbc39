/// Calories contributed by one gram of sugar.
pub const KCAL_PER_SUGAR_GRAM: f64 = 4.0;

/// Inclusive calorie bounds for each range bucket.
pub const LOW_CALORIE_RANGE: (i32, i32) = (0, 199);
pub const MEDIUM_CALORIE_RANGE: (i32, i32) = (200, 500);
pub const HIGH_CALORIE_RANGE: (i32, i32) = (501, 9999);

// ─────────────────────────────────────────────────────────────────────────────
// Rating buckets
// ─────────────────────────────────────────────────────────────────────────────

/// Highest rating still counted as disliked.
pub const LOW_RATING_MAX: u8 = 2;

/// Lowest rating counted as liked.
pub const HIGH_RATING_MIN: u8 = 4;

/// Rating counted as a favorite.
pub const TOP_RATING: u8 = 5;

// ─────────────────────────────────────────────────────────────────────────────
// Smart priority
// ─────────────────────────────────────────────────────────────────────────────

/// Distinct rated drinks needed before history biases the pick.
pub const MIN_HISTORY_FOR_PRIORITY: usize = 10;

/// Liked drinks needed in the pool before the priority pool is used.
pub const MIN_PRIORITY_POOL: usize = 3;

/// Copies of each favorite in the expanded priority pool.
pub const TOP_RATED_WEIGHT: usize = 3;

/// Probability of drawing from the priority pool, by distinct history size.
///
/// Each entry is (minimum distinct count, probability); the last matching row wins.
pub const PRIORITY_PROBABILITY_STEPS: [(usize, f64); 4] =
    [(MIN_HISTORY_FOR_PRIORITY, 0.20), (20, 0.50), (30, 0.70), (50, 0.90)];

// ─────────────────────────────────────────────────────────────────────────────
// Collaborator limits
// ─────────────────────────────────────────────────────────────────────────────

/// Show an interstitial on every Nth pick of the day.
pub const INTERSTITIAL_PICK_THRESHOLD: u32 = 3;

/// Maximum characters in a history comment.
pub const MAX_COMMENT_LENGTH: usize = 30;

/// Minimum Jaro-Winkler similarity for a fuzzy drink-name match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;
