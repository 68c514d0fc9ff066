//! WKT parse error type.

use thiserror::Error;

/// Errors produced by `psim-wkt` parsing.
///
/// Offending input is embedded in the message (truncated where it could be
/// arbitrarily long) so error logs are actionable without the raw payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WktError {
    #[error("expected {expected} geometry, got `{input}`")]
    UnexpectedKeyword { expected: &'static str, input: String },

    #[error("unbalanced parentheses in `{0}`")]
    Unbalanced(String),

    #[error("{0} geometry has no coordinates")]
    Empty(&'static str),

    #[error("malformed coordinate pair `{0}`")]
    BadCoordinate(String),
}

pub type WktResult<T> = Result<T, WktError>;
