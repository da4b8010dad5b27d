//! Unified error handling for the client layer.
//!
//! Only locally recoverable conditions surface here: bad user input and
//! local persistence failures. Remote unavailability is deliberately absent,
//! it degrades sync instead of failing an operation.

use crate::store::StoreError;

/// Client error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Engine(#[from] pantry_engine::Error),

    #[error("local store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
