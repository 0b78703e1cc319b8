//! Service Layer Error Types
//!
//! Not-found is not an error at this layer: lookups return `Option` and
//! deletes return `bool`. What remains is invalid input and store failures.

use crate::mapper::MappingError;
use crate::store::StoreError;
use thiserror::Error;

/// Content service errors
#[derive(Error, Debug)]
pub enum ContentServiceError {
    /// Input failed presence/non-blank validation
    #[error("{0}")]
    Validation(#[from] MappingError),

    /// The store failed while serving a use case
    #[error("{context}: {source}")]
    Store {
        context: String,
        #[source]
        source: StoreError,
    },
}

impl ContentServiceError {
    /// Wrap a store error with use-case context
    pub fn store(context: impl Into<String>, source: StoreError) -> Self {
        Self::Store {
            context: context.into(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
