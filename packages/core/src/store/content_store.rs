//! In-memory content tree store
//!
//! # Architecture
//!
//! The store keeps a single flat index `id → StoredNode`. Every node at any
//! depth has its own entry, so descendants are addressable by id exactly like
//! roots. A stored node does not embed its children; it records their ids in
//! insertion order and the nested `children` of a returned [`Node`] are
//! assembled at read time by walking those ids. The flat index is therefore
//! the only owner of node data and the nested view can never diverge from it.
//!
//! # Concurrency
//!
//! All state sits behind one `RwLock`. Mutations (`save`, `update`, `delete`)
//! hold the write lock for their whole read-modify-write sequence, and reads
//! hold the read lock while assembling their result, so a reader observes
//! either the state before a mutation or after it, never a partial subtree.
//!
//! # Isolation
//!
//! Every returned node is built fresh from the index, so callers can mutate
//! results freely without affecting the store or other results.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::config::{ReplacedChildren, StoreConfig};
use crate::models::{creation_metadata, format_timestamp, Node, LAST_MODIFIED_KEY};
use crate::store::StoreError;

type NodeIndex = HashMap<String, StoredNode>;

/// A node as held in the flat index
#[derive(Debug, Clone)]
struct StoredNode {
    id: String,
    title: String,
    body: String,
    author: String,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    path: String,
    metadata: HashMap<String, serde_json::Value>,
    child_ids: Vec<String>,
}

impl StoredNode {
    fn to_node(&self, children: Vec<Node>) -> Node {
        Node {
            id: self.id.clone(),
            title: self.title.clone(),
            body: self.body.clone(),
            author: self.author.clone(),
            tags: self.tags.clone(),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
            path: self.path.clone(),
            metadata: self.metadata.clone(),
            children,
        }
    }

    fn matches(&self, tag: Option<&str>, author: Option<&str>) -> bool {
        let tag_matches = tag.map_or(true, |tag| self.tags.iter().any(|t| t == tag));
        let author_matches =
            author.map_or(true, |author| self.author.to_lowercase() == author.to_lowercase());
        tag_matches && author_matches
    }
}

/// Thread-safe in-memory store for content trees
///
/// Construct one per process (or per test) and share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct ContentStore {
    nodes: RwLock<NodeIndex>,
    config: StoreConfig,
}

impl ContentStore {
    /// Create an empty store with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            nodes: RwLock::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Persist a node and its whole subtree
    ///
    /// Assigns a fresh id, timestamps and metadata to every node in the
    /// subtree (top-down), ignoring any id the caller supplied. Each node gets
    /// its own flat entry. Returns the saved root with its populated subtree.
    pub fn save(&self, node: Node) -> Result<Node, StoreError> {
        let mut nodes = self.write("save")?;
        let now = Utc::now();
        let saved = insert_subtree(&mut nodes, node, now);

        tracing::debug!(
            "Saved content tree {} ({} nodes)",
            saved.id,
            saved.subtree_size()
        );
        Ok(saved)
    }

    /// Fetch a node with its assembled subtree
    ///
    /// Returns `None` when the id is unknown.
    pub fn find_by_id(&self, id: &str) -> Result<Option<Node>, StoreError> {
        let nodes = self.read("find_by_id")?;
        Ok(assemble(&nodes, id))
    }

    /// Find every node matching an optional tag and an optional author
    ///
    /// A node matches when (`tag` is `None` or listed in its tags) and
    /// (`author` is `None` or equal to its author ignoring case). All flat
    /// entries are scanned, so descendants match in their own right. Result
    /// order is unspecified.
    pub fn find_by_tag_or_author(
        &self,
        tag: Option<&str>,
        author: Option<&str>,
    ) -> Result<Vec<Node>, StoreError> {
        let nodes = self.read("find_by_tag_or_author")?;
        let results: Vec<Node> = nodes
            .values()
            .filter(|stored| stored.matches(tag, author))
            .filter_map(|stored| assemble(&nodes, &stored.id))
            .collect();

        tracing::debug!(
            "Search tag={:?} author={:?} matched {} nodes",
            tag,
            author,
            results.len()
        );
        Ok(results)
    }

    /// Replace a node's tags and children
    ///
    /// Returns `None` when the id is unknown. Otherwise the node's tags become
    /// `update.tags`, `updated_at` moves strictly forward and is recorded as
    /// `jcr:lastModified`, and the children are replaced by a freshly saved
    /// copy of `update.children`. Title, body, author and path are left
    /// untouched. What happens to the previous children depends on
    /// [`StoreConfig::replaced_children`].
    pub fn update(&self, id: &str, update: Node) -> Result<Option<Node>, StoreError> {
        let mut nodes = self.write("update")?;

        let (now, old_child_ids) = match nodes.get_mut(id) {
            Some(existing) => {
                let now = next_timestamp(existing.updated_at);
                existing.tags = update.tags;
                existing.updated_at = now;
                existing.metadata.insert(
                    LAST_MODIFIED_KEY.to_string(),
                    serde_json::Value::String(format_timestamp(&now)),
                );
                (now, std::mem::take(&mut existing.child_ids))
            }
            None => return Ok(None),
        };

        if self.config.replaced_children == ReplacedChildren::Purge {
            let purged: usize = old_child_ids
                .iter()
                .map(|child_id| remove_subtree(&mut nodes, child_id))
                .sum();
            tracing::debug!("Purged {} replaced descendants of {}", purged, id);
        }

        let child_ids: Vec<String> = update
            .children
            .into_iter()
            .map(|child| insert_subtree(&mut nodes, child, now).id)
            .collect();

        if let Some(existing) = nodes.get_mut(id) {
            existing.child_ids = child_ids;
        }

        Ok(assemble(&nodes, id))
    }

    /// Delete a node together with all of its descendants
    ///
    /// Returns `false` when the id is unknown. A deleted node is also detached
    /// from whichever parent referenced it.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut nodes = self.write("delete")?;
        if !nodes.contains_key(id) {
            return Ok(false);
        }

        let removed = remove_subtree(&mut nodes, id);
        // No parent back-reference is kept, so detaching scans every entry.
        for stored in nodes.values_mut() {
            stored.child_ids.retain(|child_id| child_id != id);
        }

        tracing::debug!("Deleted {} ({} nodes removed)", id, removed);
        Ok(true)
    }

    /// Whether a node with this id is currently stored
    pub fn contains(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.read("contains")?.contains_key(id))
    }

    /// Total number of flat entries (roots and descendants)
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read("len")?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read("is_empty")?.is_empty())
    }

    /// Drop every stored node
    pub fn clear(&self) -> Result<(), StoreError> {
        self.write("clear")?.clear();
        Ok(())
    }

    fn read(&self, operation: &'static str) -> Result<RwLockReadGuard<'_, NodeIndex>, StoreError> {
        self.nodes
            .read()
            .map_err(|_| StoreError::lock_poisoned(operation))
    }

    fn write(
        &self,
        operation: &'static str,
    ) -> Result<RwLockWriteGuard<'_, NodeIndex>, StoreError> {
        self.nodes
            .write()
            .map_err(|_| StoreError::lock_poisoned(operation))
    }
}

/// Assign identity to `node` and its descendants and index them all
///
/// Ids are assigned top-down: the parent gets its id before any child.
fn insert_subtree(nodes: &mut NodeIndex, node: Node, now: DateTime<Utc>) -> Node {
    let id = Uuid::new_v4().to_string();

    let saved_children: Vec<Node> = node
        .children
        .into_iter()
        .map(|child| insert_subtree(nodes, child, now))
        .collect();

    let stored = StoredNode {
        id: id.clone(),
        title: node.title,
        body: node.body,
        author: node.author,
        tags: node.tags,
        created_at: now,
        updated_at: now,
        path: node.path,
        metadata: creation_metadata(&now),
        child_ids: saved_children.iter().map(|child| child.id.clone()).collect(),
    };

    let saved = stored.to_node(saved_children);
    nodes.insert(id, stored);
    saved
}

/// Build an independent copy of the node at `id` with its full subtree
fn assemble(nodes: &NodeIndex, id: &str) -> Option<Node> {
    let stored = nodes.get(id)?;
    let children = stored
        .child_ids
        .iter()
        .filter_map(|child_id| assemble(nodes, child_id))
        .collect();
    Some(stored.to_node(children))
}

/// Remove a node's descendants (deepest first) and then the node itself
///
/// Returns the number of entries removed.
fn remove_subtree(nodes: &mut NodeIndex, id: &str) -> usize {
    let child_ids = match nodes.get(id) {
        Some(stored) => stored.child_ids.clone(),
        None => return 0,
    };

    let mut removed: usize = child_ids
        .iter()
        .map(|child_id| remove_subtree(nodes, child_id))
        .sum();

    if nodes.remove(id).is_some() {
        removed += 1;
    }
    removed
}

/// Current time, forced strictly after `previous`
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + chrono::Duration::nanoseconds(1)
    }
}

#[cfg(test)]
#[path = "content_store_test.rs"]
mod content_store_test;
