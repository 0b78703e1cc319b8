//! Business Services
//!
//! - `ContentService` - create/read/search/update/delete over content trees
//!
//! Services coordinate between the mapper, the tree store and callers,
//! attaching use-case context to store failures.

pub mod content_service;
pub mod error;

pub use content_service::ContentService;
pub use error::ContentServiceError;
