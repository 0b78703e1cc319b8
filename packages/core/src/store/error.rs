//! Tree store error types
//!
//! Unknown ids are not errors: lookups return `None` and deletes return
//! `false`. The only store failure is a poisoned lock left behind by a
//! panicking writer.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store lock was poisoned by a panic in another thread
    #[error("Content store lock poisoned during {operation}")]
    LockPoisoned { operation: &'static str },
}

impl StoreError {
    pub fn lock_poisoned(operation: &'static str) -> Self {
        Self::LockPoisoned { operation }
    }
}
