use serde::{Deserialize, Serialize};

use crate::engine::constants::MAX_COMMENT_LENGTH;
use crate::error::{PickError, Result};
use crate::models::drink::SweetnessLevel;

/// One past rating of a drink.
///
/// The same drink may be rated many times; entries are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub drink_id: String,

    pub rating: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar_level: Option<SweetnessLevel>,

    #[serde(default)]
    pub comment: String,
}

impl HistoryEntry {
    /// Create an entry, rejecting ratings outside 1..=5.
    pub fn new(drink_id: &str, rating: u8) -> Result<Self> {
        check_rating(rating)?;
        Ok(Self {
            drink_id: drink_id.to_string(),
            rating,
            sugar_level: None,
            comment: String::new(),
        })
    }

    pub fn with_sugar_level(mut self, level: SweetnessLevel) -> Self {
        self.sugar_level = Some(level);
        self
    }

    /// Attach a short comment, counted in characters.
    pub fn with_comment(mut self, comment: &str) -> Result<Self> {
        check_comment(comment)?;
        self.comment = comment.to_string();
        Ok(self)
    }

    /// Re-check an entry that did not go through `new`, such as one read from disk.
    pub fn validate(&self) -> Result<()> {
        check_rating(self.rating)?;
        check_comment(&self.comment)
    }
}

fn check_rating(rating: u8) -> Result<()> {
    if !(1..=5).contains(&rating) {
        return Err(PickError::InvalidRating(rating));
    }
    Ok(())
}

fn check_comment(comment: &str) -> Result<()> {
    let len = comment.chars().count();
    if len > MAX_COMMENT_LENGTH {
        return Err(PickError::CommentTooLong {
            len,
            max: MAX_COMMENT_LENGTH,
        });
    }
    Ok(())
}
