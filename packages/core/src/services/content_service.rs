//! Content Service
//!
//! Orchestrates the mapper and the tree store for each content use case.
//! Callers exchange `ContentDto` values; the service validates and converts
//! them, runs the store operation and converts the result back.

use std::sync::Arc;

use crate::mapper::ContentMapper;
use crate::models::ContentDto;
use crate::services::ContentServiceError;
use crate::store::ContentStore;

pub type Result<T> = std::result::Result<T, ContentServiceError>;

/// Create/read/search/update/delete over content trees
#[derive(Debug, Clone)]
pub struct ContentService {
    store: Arc<ContentStore>,
    mapper: ContentMapper,
}

impl ContentService {
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self {
            store,
            mapper: ContentMapper::new(),
        }
    }

    /// Shared handle to the underlying store
    pub fn store(&self) -> &Arc<ContentStore> {
        &self.store
    }

    /// Validate and persist a new content tree
    pub fn create_content(&self, dto: Option<ContentDto>) -> Result<ContentDto> {
        let node = self.mapper.to_internal(dto.as_ref())?;
        let saved = self
            .store
            .save(node)
            .map_err(|e| ContentServiceError::store("Failed to create content", e))?;

        tracing::debug!("Created content {}", saved.id);
        Ok(self.mapper.to_external(&saved))
    }

    /// Fetch a content tree by id (`None` if unknown)
    pub fn get_content(&self, id: &str) -> Result<Option<ContentDto>> {
        let node = self.store.find_by_id(id).map_err(|e| {
            ContentServiceError::store(format!("Failed to retrieve content with id: {}", id), e)
        })?;
        Ok(node.map(|node| self.mapper.to_external(&node)))
    }

    /// Search by optional tag and optional author
    pub fn search_content(
        &self,
        tag: Option<&str>,
        author: Option<&str>,
    ) -> Result<Vec<ContentDto>> {
        let nodes = self
            .store
            .find_by_tag_or_author(tag, author)
            .map_err(|e| ContentServiceError::store("Failed to search content", e))?;
        Ok(nodes
            .iter()
            .map(|node| self.mapper.to_external(node))
            .collect())
    }

    /// Replace tags and children of an existing node (`None` if unknown)
    ///
    /// Input is validated first; an invalid body is reported even when the id
    /// does not exist.
    pub fn update_content(&self, id: &str, dto: Option<ContentDto>) -> Result<Option<ContentDto>> {
        let node = self.mapper.to_internal(dto.as_ref())?;
        let updated = self.store.update(id, node).map_err(|e| {
            ContentServiceError::store(format!("Failed to update content with id: {}", id), e)
        })?;

        match &updated {
            Some(node) => tracing::debug!("Updated content {}", node.id),
            None => tracing::debug!("Update skipped, content {} not found", id),
        }
        Ok(updated.map(|node| self.mapper.to_external(&node)))
    }

    /// Delete a node and its descendants (`false` if unknown)
    pub fn delete_content(&self, id: &str) -> Result<bool> {
        self.store.delete(id).map_err(|e| {
            ContentServiceError::store(format!("Failed to delete content with id: {}", id), e)
        })
    }
}
