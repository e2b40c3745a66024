//! Crate-wide error type.

use thiserror::Error;

/// Failures surfaced by the map and its companion containers.
///
/// A missing key is not an error: lookups return `None` and deletes
/// return `false`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("storage allocation failed")]
    AllocationFailure,
}

pub type Result<T> = core::result::Result<T, Error>;
