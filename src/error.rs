//! Error type for the fallible entry points (input decoding and configuration).
//!
//! The layout pass itself never fails; see [`crate::layout_score`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    /// Score or configuration JSON could not be decoded
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration leaves no room for content
    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
