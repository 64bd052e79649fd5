//! Error types raised while building alias data.

use stockpile_core::{ErrorSeverity, IndexError, ItemKey, StockError};
use thiserror::Error;

/// Errors surfaced by [`OreDictionary`](crate::OreDictionary).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OreError {
    #[error("ore name must not be empty")]
    EmptyName,

    #[error("key {0} carries a range-bound tag and cannot join an ore group")]
    BoundTag(ItemKey),

    #[error("alias index error: {0}")]
    Index(#[from] IndexError),
}

impl StockError for OreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyName | Self::BoundTag(_) => ErrorSeverity::Validation,
            Self::Index(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "ORE_EMPTY_NAME",
            Self::BoundTag(_) => "ORE_BOUND_TAG",
            Self::Index(inner) => inner.error_code(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_are_validation_failures() {
        let bound = OreError::BoundTag(ItemKey::plain(1, 0));
        assert_eq!(OreError::EmptyName.severity(), ErrorSeverity::Validation);
        assert_eq!(OreError::EmptyName.error_code(), "ORE_EMPTY_NAME");
        assert_eq!(bound.severity(), ErrorSeverity::Validation);
        assert_eq!(bound.error_code(), "ORE_BOUND_TAG");
    }

    #[test]
    fn index_errors_keep_their_classification() {
        let error = OreError::from(IndexError::Frozen);
        assert_eq!(error.severity(), ErrorSeverity::Internal);
        assert_eq!(error.error_code(), "INDEX_FROZEN");
    }
}
