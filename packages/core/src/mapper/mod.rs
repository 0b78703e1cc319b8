//! Translation between boundary DTOs and internal nodes
//!
//! Inbound conversion validates that the required text fields are present and
//! non-blank, recursively through `children`. Outbound conversion is a plain
//! structural mirror.

use thiserror::Error;

use crate::models::{is_blank, ContentDto, Node};

/// Errors raised while converting a `ContentDto` into a `Node`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// No DTO was supplied
    #[error("ContentDTO cannot be null")]
    MissingContent,

    /// A required text field is absent or blank
    #[error("{0} is mandatory for ContentDTO")]
    MissingField(&'static str),
}

/// Stateless converter between `ContentDto` and `Node`
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentMapper;

impl ContentMapper {
    pub fn new() -> Self {
        Self
    }

    /// Convert a boundary DTO (and its children) into an internal node
    ///
    /// Checks title, body and author in that order; the first absent or blank
    /// field fails the conversion. Id, tags, timestamps, path and metadata are
    /// copied as given (the store overwrites identity on save).
    pub fn to_internal(&self, dto: Option<&ContentDto>) -> Result<Node, MappingError> {
        let dto = dto.ok_or(MappingError::MissingContent)?;

        let required = [
            ("Title", dto.title.as_deref()),
            ("Body", dto.body.as_deref()),
            ("Author", dto.author.as_deref()),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| is_blank(*value)) {
            return Err(MappingError::MissingField(*field));
        }

        let children = dto
            .children()
            .iter()
            .map(|child| self.to_internal(Some(child)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Node {
            id: dto.id.clone().unwrap_or_default(),
            title: dto.title.clone().unwrap_or_default(),
            body: dto.body.clone().unwrap_or_default(),
            author: dto.author.clone().unwrap_or_default(),
            tags: dto.tags.clone().unwrap_or_default(),
            created_at: dto.created_at,
            updated_at: dto.updated_at,
            path: dto.path.clone().unwrap_or_default(),
            metadata: dto.jcr_metadata.clone().unwrap_or_default(),
            children,
        })
    }

    /// Convert an internal node (and its children) into the boundary shape
    pub fn to_external(&self, node: &Node) -> ContentDto {
        ContentDto {
            id: Some(node.id.clone()),
            title: Some(node.title.clone()),
            body: Some(node.body.clone()),
            author: Some(node.author.clone()),
            tags: Some(node.tags.clone()),
            created_at: node.created_at,
            updated_at: node.updated_at,
            path: Some(node.path.clone()),
            jcr_metadata: Some(node.metadata.clone()),
            children: Some(
                node.children
                    .iter()
                    .map(|child| self.to_external(child))
                    .collect(),
            ),
        }
    }
}
