//! Content Tree Store
//!
//! - [`ContentStore`] - thread-safe in-memory store with a flat id index
//! - [`StoreError`] - store failures (lock poisoning only)

mod content_store;
mod error;

pub use content_store::ContentStore;
pub use error::StoreError;
