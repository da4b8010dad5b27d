//! Error types for the Pantry engine.

use crate::FoodId;
use thiserror::Error;

/// All possible errors from the Pantry engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    // Validation errors
    #[error("food name must not be empty")]
    EmptyName,

    #[error("energy must be a finite positive number, got {0}")]
    InvalidEnergy(f64),

    // Lookup errors
    #[error("food record not found: {0}")]
    RecordNotFound(FoodId),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
