//! Error types for the commission pipeline.

use thiserror::Error;

use crate::source::{RecordError, ShapeError, SourceError};

/// Top-level error returned by [`run`](crate::run).
///
/// Every variant is terminal for the current invocation; nothing is
/// retried internally, and the core never writes to an output stream
/// itself.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("record source unavailable: {0}")]
    Source(#[from] SourceError),

    #[error("invalid input: {0}")]
    Shape(#[from] ShapeError),

    #[error("processing failed: {0}")]
    Record(#[from] RecordError),

    #[error("no commissions were produced from the input")]
    EmptyResult,
}
