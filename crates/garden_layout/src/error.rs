//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! rejected `add` requests, invalid configuration, catalog loading and a poisoned shared garden.
//!
//! Running out of free cells is deliberately not an error: a partially satisfied request is
//! reported through [`crate::garden::PlacementResult`].
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid quantity {quantity}: at least one item must be requested")]
    InvalidQuantity { quantity: usize },

    #[error("unknown item type '{item_type}'")]
    UnknownItemType { item_type: String },

    #[error("duplicate item type '{item_type}'")]
    DuplicateItemType { item_type: String },

    #[error("a grid of side {size} cannot be allocated")]
    GridTooLarge { size: usize },

    #[error("request for {requested} more items exceeds the garden's capacity")]
    TooManyItems { requested: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("configuration parse error: {0}")]
    Parse(String),

    #[error("garden lock poisoned by a panicking writer")]
    Poisoned,
}

impl Error {
    pub(crate) fn unknown(item_type: impl Into<String>) -> Self {
        Error::UnknownItemType {
            item_type: item_type.into(),
        }
    }
}
