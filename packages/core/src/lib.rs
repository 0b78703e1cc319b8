//! ContentSpace Core
//!
//! In-memory content repository core: a tree of content nodes (pages,
//! sections, fragments) with store-assigned identity, repository-style
//! metadata, tag/author search, subtree replacement and cascade deletes.
//!
//! # Modules
//!
//! - [`models`] - Internal `Node` and boundary `ContentDto`
//! - [`store`] - Thread-safe tree store with a flat id index
//! - [`mapper`] - DTO ↔ node translation with input validation
//! - [`services`] - `ContentService` use cases
//! - [`config`] - Store behaviour settings

pub mod config;
pub mod mapper;
pub mod models;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use config::{ReplacedChildren, StoreConfig};
pub use mapper::{ContentMapper, MappingError};
pub use models::{ContentDto, Node};
pub use services::{ContentService, ContentServiceError};
pub use store::{ContentStore, StoreError};
