//! Script Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Failed to parse AI response as JSON: {0}")]
    MalformedResponse(String),

    #[error("Malformed script block at index {index}: {reason}")]
    MalformedBlock { index: usize, reason: String },
}

impl ExtractError {
    pub(crate) fn block(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedBlock {
            index,
            reason: reason.into(),
        }
    }
}
