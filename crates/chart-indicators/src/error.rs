// File: crates/chart-indicators/src/error.rs
// Summary: Error types for linking, indicator creation and chart mutations.

use thiserror::Error;

/// Parent series could not be resolved when binding an indicator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("indicator requires `linkedTo` to be set")]
    MissingLinkedTo,
    #[error("series {0} not found, check `linkedTo`")]
    ParentNotFound(String),
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error("unknown indicator kind: {0}")]
    UnknownKind(String),
    #[error("invalid indicator params: {0}")]
    InvalidParams(String),
    #[error("series id already in use: {0}")]
    DuplicateId(String),
    #[error("series not found: {0}")]
    SeriesNotFound(String),
    #[error("axis not found: {0}")]
    AxisNotFound(usize),
    #[error("invalid indicator options: {0}")]
    Options(#[from] serde_json::Error),
}
