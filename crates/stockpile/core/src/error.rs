//! Common error infrastructure for stockpile-core.
//!
//! Lookups and merges on the ledger never fail; absent data is an empty
//! answer. Errors are reserved for misuse of stateful structures, such as
//! writing to a frozen equivalence index.

/// Severity level of an error, used for categorization and logging priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    Validation,

    /// Programming error: an API was used outside its lifecycle.
    ///
    /// These indicate bugs in the caller and should be investigated.
    Internal,
}

/// Common trait for all stockpile errors.
pub trait StockError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Lifecycle violations of an [`EquivalenceIndex`](crate::EquivalenceIndex).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// `put` was called after `freeze`.
    #[error("equivalence index is frozen; clear it before adding entries")]
    Frozen,

    /// `get` was called before `freeze`.
    #[error("equivalence index is still being built; freeze it before querying")]
    NotFrozen,
}

impl StockError for IndexError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Frozen => "INDEX_FROZEN",
            Self::NotFrozen => "INDEX_NOT_FROZEN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_errors_are_internal() {
        for (error, code) in [
            (IndexError::Frozen, "INDEX_FROZEN"),
            (IndexError::NotFrozen, "INDEX_NOT_FROZEN"),
        ] {
            assert_eq!(error.severity(), ErrorSeverity::Internal);
            assert_eq!(error.error_code(), code);
        }
    }
}
