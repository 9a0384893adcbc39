use thiserror::Error;

#[derive(Debug, Error)]
pub enum PickError {
    #[error("Drink not found: {0}")]
    DrinkNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Comment exceeds {max} characters ({len})")]
    CommentTooLong { len: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, PickError>;
