//! Error types for the build schema
//!
//! These are programmer errors: malformed identities handed to the
//! aggregator by its caller.

/// Schema validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Position string outside the closed set
    #[error("unknown position: '{0}'")]
    UnknownPosition(String),

    /// Game mode identifier was empty
    #[error("game mode must not be empty")]
    EmptyGameMode,

    /// Champion record is missing identity fields
    #[error("invalid champion: {0}")]
    InvalidChampion(String),
}
