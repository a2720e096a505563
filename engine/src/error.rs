//! Error types for the lot ordering engine.

use thiserror::Error;

/// Hard failures surfaced to the caller.
///
/// Malformed lot data (unparsable lot numbers, blank team names) is never an
/// error; it is absorbed by the placement rules. Only missing required inputs
/// and malformed requests end up here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("canonical ordering is empty")]
    EmptyCanonical,

    #[error("lot collection is missing")]
    MissingLots,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
