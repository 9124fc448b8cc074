//! Error types for the aggregator
//!
//! Provider failures never surface here; they are logged and recorded per
//! attempt. Only invalid inputs reach the caller.

use mana_schema::SchemaError;

/// Errors returned by [`crate::BuildAggregator`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregatorError {
    /// Champion identity failed validation
    #[error("invalid champion: {0}")]
    InvalidChampion(String),

    /// Position or game mode could not be interpreted
    #[error("invalid request: {0}")]
    Schema(#[from] SchemaError),
}

impl AggregatorError {
    /// Check if the caller passed a bad champion record
    #[inline]
    #[must_use]
    pub fn is_invalid_champion(&self) -> bool {
        matches!(self, Self::InvalidChampion(_))
    }
}
