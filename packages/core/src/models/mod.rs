//! Data Models
//!
//! - `Node` - internal content node owned by the tree store
//! - `ContentDto` - boundary representation exchanged with callers

mod content_dto;
mod node;

pub use content_dto::{is_blank, ContentDto};
pub use node::{
    creation_metadata, format_timestamp, Node, CREATED_KEY, LAST_MODIFIED_KEY, MAX_TAGS,
    MAX_TITLE_LENGTH, PRIMARY_TYPE_KEY, UNSTRUCTURED_PRIMARY_TYPE,
};
